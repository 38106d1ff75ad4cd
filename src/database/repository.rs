use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::future::Future;
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::database::manager::DatabaseError;
use crate::database::models::Problem;

/// Storage seam for problems. Identity is `problem_number`, but nothing here
/// enforces uniqueness: callers look up before inserting.
#[async_trait]
pub trait ProblemRepository: Send + Sync + 'static {
    async fn insert(&self, problem: &Problem) -> Result<(), DatabaseError>;

    async fn find_by_number(&self, problem_number: i32) -> Result<Option<Problem>, DatabaseError>;

    /// Overwrite the mutable fields of the row keyed by `problem_number`.
    /// Returns the number of rows touched.
    async fn update(&self, problem: &Problem) -> Result<u64, DatabaseError>;

    async fn list(&self) -> Result<Vec<Problem>, DatabaseError>;

    async fn list_due_on_or_after(&self, date: DateTime<Utc>) -> Result<Vec<Problem>, DatabaseError>;

    /// Returns the number of rows removed.
    async fn delete(&self, problem_number: i32) -> Result<u64, DatabaseError>;
}

const SELECT_COLUMNS: &str =
    "SELECT problem_number, problem_name, last_solved_on, due_date, number_times_solved FROM problems";

pub struct PgProblemRepository {
    pool: PgPool,
    query_timeout: Duration,
    scan_timeout: Duration,
}

impl PgProblemRepository {
    pub fn new(pool: PgPool, config: &DatabaseConfig) -> Self {
        Self {
            pool,
            query_timeout: config.query_timeout(),
            scan_timeout: config.scan_timeout(),
        }
    }
}

async fn bounded<T, F>(operation: &'static str, after: Duration, fut: F) -> Result<T, DatabaseError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(after, fut).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(DatabaseError::Timeout { operation, after }),
    }
}

#[async_trait]
impl ProblemRepository for PgProblemRepository {
    async fn insert(&self, problem: &Problem) -> Result<(), DatabaseError> {
        let query = sqlx::query(
            "INSERT INTO problems (problem_number, problem_name, last_solved_on, due_date, number_times_solved)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(problem.problem_number)
        .bind(&problem.problem_name)
        .bind(problem.last_solved_on)
        .bind(problem.due_date)
        .bind(problem.number_times_solved);

        bounded("insert problem", self.query_timeout, query.execute(&self.pool)).await?;
        Ok(())
    }

    async fn find_by_number(&self, problem_number: i32) -> Result<Option<Problem>, DatabaseError> {
        let sql = format!("{} WHERE problem_number = $1", SELECT_COLUMNS);
        let query = sqlx::query_as::<_, Problem>(&sql).bind(problem_number);

        bounded("select problem", self.query_timeout, query.fetch_optional(&self.pool)).await
    }

    async fn update(&self, problem: &Problem) -> Result<u64, DatabaseError> {
        let query = sqlx::query(
            "UPDATE problems SET last_solved_on = $1, due_date = $2, number_times_solved = $3
             WHERE problem_number = $4",
        )
        .bind(problem.last_solved_on)
        .bind(problem.due_date)
        .bind(problem.number_times_solved)
        .bind(problem.problem_number);

        let result = bounded("update problem", self.query_timeout, query.execute(&self.pool)).await?;
        Ok(result.rows_affected())
    }

    async fn list(&self) -> Result<Vec<Problem>, DatabaseError> {
        let query = sqlx::query_as::<_, Problem>(SELECT_COLUMNS);

        bounded("list problems", self.scan_timeout, query.fetch_all(&self.pool)).await
    }

    async fn list_due_on_or_after(&self, date: DateTime<Utc>) -> Result<Vec<Problem>, DatabaseError> {
        let sql = format!("{} WHERE due_date >= $1", SELECT_COLUMNS);
        let query = sqlx::query_as::<_, Problem>(&sql).bind(date);

        bounded("list due problems", self.scan_timeout, query.fetch_all(&self.pool)).await
    }

    async fn delete(&self, problem_number: i32) -> Result<u64, DatabaseError> {
        let query = sqlx::query("DELETE FROM problems WHERE problem_number = $1").bind(problem_number);

        let result = bounded("delete problem", self.query_timeout, query.execute(&self.pool)).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bounded_reports_timeout() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, sqlx::Error>(())
        };
        let err = bounded("slow statement", Duration::from_millis(10), slow)
            .await
            .unwrap_err();
        match err {
            DatabaseError::Timeout { operation, after } => {
                assert_eq!(operation, "slow statement");
                assert_eq!(after, Duration::from_millis(10));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn bounded_passes_through_sqlx_errors() {
        let failing = async { Err::<(), _>(sqlx::Error::RowNotFound) };
        let err = bounded("lookup", Duration::from_secs(1), failing).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Sqlx(sqlx::Error::RowNotFound)));
    }
}
