//! Adapters implementing the domain port traits

pub mod postgres;
pub mod restful;

pub use postgres::SeaOrmUowProvider;
pub use restful::RestfulApiClient;
