//! SQLite storage for the job result audit trail.

mod model;
mod repository;

pub use model::JobResultDB;
pub use repository::JobResultRepository;
