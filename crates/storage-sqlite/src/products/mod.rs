//! SQLite storage for the product catalog.

mod model;

pub use model::ProductDB;
