//! HTTP handlers

pub mod products;

pub use products::{create_product, delete_product, list_products};
