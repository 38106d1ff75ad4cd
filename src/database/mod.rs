pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;

use std::sync::Arc;

use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::{AppConfig, StorageBackend};

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::InMemoryProblemRepository;
pub use models::Problem;
pub use repository::{PgProblemRepository, ProblemRepository};

/// The repository chosen by configuration, plus the pool behind it when there is one.
pub struct Storage {
    pub repo: Arc<dyn ProblemRepository>,
    pool: Option<PgPool>,
}

impl Storage {
    pub async fn open(config: &AppConfig) -> Result<Self, DatabaseError> {
        match config.server.storage {
            StorageBackend::Postgres => {
                let pool = DatabaseManager::connect(&config.database).await?;
                let repo = PgProblemRepository::new(pool.clone(), &config.database);
                Ok(Self {
                    repo: Arc::new(repo),
                    pool: Some(pool),
                })
            }
            StorageBackend::Memory => {
                warn!("Using in-memory storage; problems are lost on exit");
                Ok(Self::in_memory())
            }
        }
    }

    pub fn in_memory() -> Self {
        Self {
            repo: Arc::new(InMemoryProblemRepository::new()),
            pool: None,
        }
    }

    pub async fn close(self) {
        if let Some(pool) = self.pool {
            DatabaseManager::close(pool).await;
        } else {
            info!("In-memory storage released");
        }
    }
}
