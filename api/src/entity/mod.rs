//! SeaORM entity models

pub mod products;
