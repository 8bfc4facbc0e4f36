//! Product catalog domain models.

mod products_model;

pub use products_model::*;
