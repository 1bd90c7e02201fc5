//! Port traits
//!
//! Interfaces the core requires from its collaborators. Implementations are
//! provided by adapters (PostgreSQL, restful-api.dev) and by the in-memory
//! test doubles.

pub mod remote;
pub mod repositories;

pub use remote::{RemoteProduct, RemoteProductApi};
pub use repositories::{ProductFilter, ProductRepository, UnitOfWork, UnitOfWorkProvider};
