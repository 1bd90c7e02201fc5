//! restful-api.dev client adapter

pub mod client;

pub use client::RestfulApiClient;
