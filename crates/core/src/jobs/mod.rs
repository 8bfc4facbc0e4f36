//! Job result audit trail and the task runner that writes it.

mod job_result_model;
mod job_result_service;
mod runner;

pub use job_result_model::*;
pub use job_result_service::*;
pub use runner::*;
