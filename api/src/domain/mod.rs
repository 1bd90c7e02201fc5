//! Domain layer - entities, validation rules, and port traits

pub mod entities;
pub mod ports;
pub mod validation;
