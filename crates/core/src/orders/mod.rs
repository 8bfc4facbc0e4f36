//! Order domain models.

mod orders_model;

pub use orders_model::*;
