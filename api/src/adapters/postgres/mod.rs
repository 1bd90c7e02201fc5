//! PostgreSQL adapters (SeaORM)

pub mod product_repo;
pub mod unit_of_work;

pub use unit_of_work::SeaOrmUowProvider;
