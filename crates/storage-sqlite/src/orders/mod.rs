//! SQLite storage for orders.

mod model;

pub use model::OrderDB;
