//! SQLite storage for customers.

mod model;

pub use model::CustomerDB;
