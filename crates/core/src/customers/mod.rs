//! Customer domain models.

mod customers_model;

pub use customers_model::*;
