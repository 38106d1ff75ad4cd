use anyhow::Context;
use clap::Parser;
use problem_tracker::{cli::Cli, config::AppConfig, database::Storage, services::ProblemService, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    telemetry::init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    let storage = Storage::open(&config)
        .await
        .context("failed to open problem storage")?;
    let service = ProblemService::new(storage.repo.clone());

    let result = problem_tracker::cli::run(cli, service).await;
    storage.close().await;

    if let Err(e) = result {
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => tracing::debug!("command failed: {e}"),
        }
        std::process::exit(1);
    }

    Ok(())
}
