use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::Problem;
use crate::database::repository::ProblemRepository;

/// Process-local problem store with the same contract as the `problems` table,
/// including the lack of a unique constraint on `problem_number`.
#[derive(Debug, Default)]
pub struct InMemoryProblemRepository {
    rows: RwLock<Vec<Problem>>,
}

impl InMemoryProblemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Problem>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    /// Number of stored rows, duplicates included.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl ProblemRepository for InMemoryProblemRepository {
    async fn insert(&self, problem: &Problem) -> Result<(), DatabaseError> {
        self.rows.write().await.push(problem.clone());
        Ok(())
    }

    async fn find_by_number(&self, problem_number: i32) -> Result<Option<Problem>, DatabaseError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|p| p.problem_number == problem_number).cloned())
    }

    async fn update(&self, problem: &Problem) -> Result<u64, DatabaseError> {
        let mut rows = self.rows.write().await;
        let mut touched = 0;
        for row in rows.iter_mut().filter(|p| p.problem_number == problem.problem_number) {
            row.last_solved_on = problem.last_solved_on;
            row.due_date = problem.due_date;
            row.number_times_solved = problem.number_times_solved;
            touched += 1;
        }
        Ok(touched)
    }

    async fn list(&self) -> Result<Vec<Problem>, DatabaseError> {
        Ok(self.rows.read().await.clone())
    }

    async fn list_due_on_or_after(&self, date: DateTime<Utc>) -> Result<Vec<Problem>, DatabaseError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|p| p.due_date >= date).cloned().collect())
    }

    async fn delete(&self, problem_number: i32) -> Result<u64, DatabaseError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|p| p.problem_number != problem_number);
        Ok((before - rows.len()) as u64)
    }
}
