//! Domain entities

pub mod product;

pub use product::{NewProduct, Product, ProductId};
