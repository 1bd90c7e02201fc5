//! Application layer - request dispatch and the product service

pub mod dispatch;
pub mod paging;
pub mod product_service;

pub use paging::PagedResult;
pub use product_service::{
    CreateProduct, DeleteProduct, ListProducts, ProductListItem, ProductService,
};
