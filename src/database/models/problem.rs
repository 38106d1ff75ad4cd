use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// A practice problem row from the `problems` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Problem {
    pub problem_number: i32,
    pub problem_name: String,
    pub last_solved_on: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    #[serde(rename = "number_of_times_solved")]
    pub number_times_solved: i32,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.problem_number, self.problem_name)
    }
}
