pub mod problem_service;

pub use problem_service::{start_of_day, start_of_today, DueOffset, ProblemService, ServiceError};
