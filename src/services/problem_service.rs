use chrono::{
    DateTime, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, TimeZone, Utc,
};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::database::manager::DatabaseError;
use crate::database::models::Problem;
use crate::database::repository::ProblemRepository;
use crate::validator::{validate_problem, ValidationErrors, Validator, DUE_DATE_KEY};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed: {0:?}")]
    Validation(ValidationErrors),
    #[error("problem {0} not found")]
    NotFound(i32),
    #[error("persistence error: {0}")]
    Persistence(#[from] DatabaseError),
}

/// Calendar offset from the solve time to the due date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DueOffset {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl DueOffset {
    pub fn new(years: i32, months: i32, days: i32) -> Self {
        Self { years, months, days }
    }

    pub fn days(days: i32) -> Self {
        Self::new(0, 0, days)
    }

    /// Months (years folded in) first, clamping to the end of shorter months,
    /// then days. `None` when the result leaves chrono's range.
    pub fn apply(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let months = i64::from(self.years) * 12 + i64::from(self.months);
        let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
        let shifted = if months >= 0 {
            from.checked_add_months(magnitude)?
        } else {
            from.checked_sub_months(magnitude)?
        };
        shifted.checked_add_signed(Duration::days(i64::from(self.days)))
    }
}

/// Upsert and read operations over a [`ProblemRepository`].
#[derive(Clone)]
pub struct ProblemService {
    repo: Arc<dyn ProblemRepository>,
}

impl ProblemService {
    pub fn new(repo: Arc<dyn ProblemRepository>) -> Self {
        Self { repo }
    }

    /// Record a solve of `problem_number`.
    ///
    /// The candidate (trimmed name, fresh timestamps, counter at 1) is validated
    /// once before storage is touched. An existing row keeps its name, gets the
    /// new timestamps and has its counter bumped; otherwise the candidate is
    /// inserted. Lookup and write are separate statements, so two concurrent
    /// first solves of the same number can both insert.
    pub async fn create_or_resolve(
        &self,
        problem_number: i32,
        problem_name: &str,
        offset: DueOffset,
    ) -> Result<Problem, ServiceError> {
        let now = Self::now();
        let mut v = Validator::new();

        let due_date = offset.apply(now).unwrap_or_else(|| {
            v.add_error(DUE_DATE_KEY, "due date offset is out of range");
            now
        });

        let mut candidate = Problem {
            problem_number,
            problem_name: problem_name.trim().to_string(),
            last_solved_on: now,
            due_date,
            number_times_solved: 1,
        };

        validate_problem(&mut v, &candidate, Utc::now());
        if !v.is_valid() {
            debug!("Rejected problem {}: {:?}", problem_number, v.errors());
            return Err(ServiceError::Validation(v.into_errors()));
        }

        match self.repo.find_by_number(problem_number).await? {
            Some(existing) => {
                candidate.number_times_solved = existing.number_times_solved.saturating_add(1);
                candidate.problem_name = existing.problem_name;

                if self.repo.update(&candidate).await? == 0 {
                    return Err(ServiceError::NotFound(problem_number));
                }
                info!(
                    "Re-solved problem {} ({} times)",
                    problem_number, candidate.number_times_solved
                );
            }
            None => {
                self.repo.insert(&candidate).await?;
                info!("Added problem {}", candidate);
            }
        }

        Ok(candidate)
    }

    pub async fn get(&self, problem_number: i32) -> Result<Problem, ServiceError> {
        self.repo
            .find_by_number(problem_number)
            .await?
            .ok_or(ServiceError::NotFound(problem_number))
    }

    pub async fn list(&self) -> Result<Vec<Problem>, ServiceError> {
        Ok(self.repo.list().await?)
    }

    pub async fn list_due_on_or_after(&self, date: DateTime<Utc>) -> Result<Vec<Problem>, ServiceError> {
        Ok(self.repo.list_due_on_or_after(date).await?)
    }

    /// `Ok(true)` when a row was removed, `Ok(false)` when none matched.
    pub async fn delete(&self, problem_number: i32) -> Result<bool, ServiceError> {
        let removed = self.repo.delete(problem_number).await?;
        if removed > 0 {
            info!("Deleted problem {}", problem_number);
        }
        Ok(removed > 0)
    }

    /// Current time at the precision PostgreSQL stores.
    fn now() -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }
}

/// First local instant of `date`, expressed in UTC.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    first_instant_of_day(date, |local| {
        Local
            .from_local_datetime(&local)
            .earliest()
            .map(|t| t.with_timezone(&Utc))
    })
}

/// Midnight can fall inside a DST gap, so later wall-clock times are tried in
/// quarter-hour steps until `resolve` maps one to a real instant.
fn first_instant_of_day<F>(date: NaiveDate, resolve: F) -> DateTime<Utc>
where
    F: Fn(NaiveDateTime) -> Option<DateTime<Utc>>,
{
    let midnight = date.and_time(NaiveTime::MIN);
    (0..24 * 4)
        .map(|step| midnight + Duration::minutes(15 * step))
        .find_map(&resolve)
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

pub fn start_of_today() -> DateTime<Utc> {
    start_of_day(Local::now().date_naive())
}
