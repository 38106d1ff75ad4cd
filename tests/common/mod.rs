#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use problem_tracker::app::{app, AppState};
use problem_tracker::config::{AppConfig, Environment};
use problem_tracker::database::{InMemoryProblemRepository, ProblemRepository};
use reqwest::StatusCode;

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub repo: Arc<InMemoryProblemRepository>,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/healthcheck")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

/// Serve the router on a free port, backed by a fresh in-memory repository.
///
/// Each test gets its own server: the task lives on that test's runtime.
pub async fn spawn_server() -> Result<TestServer> {
    let repo = Arc::new(InMemoryProblemRepository::new());
    spawn_with_repo(repo.clone(), repo).await
}

pub async fn spawn_with_repo(
    repo: Arc<dyn ProblemRepository>,
    handle: Arc<InMemoryProblemRepository>,
) -> Result<TestServer> {
    spawn_with_config(repo, handle, AppConfig::for_environment(Environment::Development)).await
}

pub async fn spawn_with_config(
    repo: Arc<dyn ProblemRepository>,
    handle: Arc<InMemoryProblemRepository>,
    config: AppConfig,
) -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;

    let router = app(AppState::new(repo, config));
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    let server = TestServer {
        port,
        base_url,
        repo: handle,
        client: reqwest::Client::new(),
    };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}
