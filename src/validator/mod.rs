use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::database::models::Problem;

pub const PROBLEM_NUMBER_KEY: &str = "problem number";
pub const DUE_DATE_KEY: &str = "due date";
pub const TIMES_SOLVED_KEY: &str = "times solved";

/// Field name -> message. Empty means valid.
pub type ValidationErrors = BTreeMap<String, String>;

/// Collects field errors; every check runs and the first message per field wins.
#[derive(Debug, Default, Clone)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, key: &str, message: &str) {
        self.errors
            .entry(key.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn check(&mut self, ok: bool, key: &str, message: &str) {
        if !ok {
            self.add_error(key, message);
        }
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}

/// Run every record-level check against `problem`, comparing the due date with `now`.
pub fn validate_problem(v: &mut Validator, problem: &Problem, now: DateTime<Utc>) {
    v.check(
        problem.problem_number >= 1,
        PROBLEM_NUMBER_KEY,
        "problem number must be greater than 0",
    );
    v.check(
        problem.due_date > now,
        DUE_DATE_KEY,
        "due date must be later than the current time",
    );
    v.check(
        problem.number_times_solved >= 0,
        TIMES_SOLVED_KEY,
        "number of times must be >=0",
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn candidate(number: i32, due_in: Duration, solved: i32) -> (Problem, DateTime<Utc>) {
        let now = Utc::now();
        let problem = Problem {
            problem_number: number,
            problem_name: "Two Sum".to_string(),
            last_solved_on: now,
            due_date: now + due_in,
            number_times_solved: solved,
        };
        (problem, now)
    }

    fn errors_for(number: i32, due_in: Duration, solved: i32) -> ValidationErrors {
        let (problem, now) = candidate(number, due_in, solved);
        let mut v = Validator::new();
        validate_problem(&mut v, &problem, now);
        v.into_errors()
    }

    #[test]
    fn valid_record_has_no_errors() {
        assert!(errors_for(1, Duration::days(7), 1).is_empty());
        assert!(errors_for(42, Duration::seconds(1), 0).is_empty());
    }

    #[test]
    fn non_positive_problem_number_is_rejected() {
        for number in [0, -1, i32::MIN] {
            let errors = errors_for(number, Duration::days(7), 1);
            assert_eq!(
                errors.get(PROBLEM_NUMBER_KEY).map(String::as_str),
                Some("problem number must be greater than 0")
            );
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn due_date_must_be_strictly_in_the_future() {
        for offset in [Duration::zero(), Duration::days(-1)] {
            let errors = errors_for(1, offset, 1);
            assert_eq!(
                errors.get(DUE_DATE_KEY).map(String::as_str),
                Some("due date must be later than the current time")
            );
        }
    }

    #[test]
    fn negative_times_solved_is_rejected() {
        let errors = errors_for(1, Duration::days(1), -1);
        assert_eq!(
            errors.get(TIMES_SOLVED_KEY).map(String::as_str),
            Some("number of times must be >=0")
        );
    }

    #[test]
    fn all_failures_are_reported_together() {
        let errors = errors_for(0, Duration::days(-2), -5);
        let keys: Vec<&str> = errors.keys().map(String::as_str).collect();
        assert_eq!(keys, vec![DUE_DATE_KEY, PROBLEM_NUMBER_KEY, TIMES_SOLVED_KEY]);
    }

    #[test]
    fn first_message_per_field_wins() {
        let mut v = Validator::new();
        v.add_error(DUE_DATE_KEY, "first");
        v.check(false, DUE_DATE_KEY, "second");
        v.check(true, PROBLEM_NUMBER_KEY, "never");
        assert!(!v.is_valid());
        assert_eq!(v.errors().len(), 1);
        assert_eq!(v.errors()[DUE_DATE_KEY], "first");
    }
}
