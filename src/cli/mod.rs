pub mod menu;
pub mod utils;

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::services::{start_of_today, DueOffset, ProblemService, ServiceError};
use utils::{output_problem, output_problems, output_service_error, output_success};

#[derive(Parser)]
#[command(name = "problems")]
#[command(about = "Problem tracker CLI - record solves and review what is due")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Add a problem, or record another solve of an existing one")]
    Add {
        #[arg(help = "Problem number")]
        number: i32,
        #[arg(help = "Problem name")]
        name: String,
        #[arg(long, allow_hyphen_values = true, help = "Days until due (1 when no offset is given)")]
        days: Option<i32>,
        #[arg(long, allow_hyphen_values = true, help = "Months until due")]
        months: Option<i32>,
        #[arg(long, allow_hyphen_values = true, help = "Years until due")]
        years: Option<i32>,
    },

    #[command(about = "List problems")]
    List {
        #[arg(long, help = "Only problems due today or later")]
        due: bool,
    },

    #[command(about = "Show a single problem")]
    Show {
        #[arg(help = "Problem number")]
        number: i32,
    },

    #[command(about = "Delete a problem")]
    Delete {
        #[arg(help = "Problem number")]
        number: i32,
    },

    #[command(about = "Interactive menu on stdin/stdout")]
    Menu,
}

/// Due offset used by `add` when none of `--days`, `--months`, `--years` is set.
pub const DEFAULT_DUE_DAYS: i32 = 1;

/// Offset from the `add` flags; unset flags count as zero.
pub fn due_offset(days: Option<i32>, months: Option<i32>, years: Option<i32>) -> DueOffset {
    match (days, months, years) {
        (None, None, None) => DueOffset::days(DEFAULT_DUE_DAYS),
        _ => DueOffset::new(years.unwrap_or(0), months.unwrap_or(0), days.unwrap_or(0)),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Run one command against `service`. Service errors are printed, then
/// returned so the binary exits non-zero.
pub async fn run(cli: Cli, service: ProblemService) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command {
        Commands::Menu => {
            let stdin = io::stdin();
            return menu::Menu::new(service, stdin.lock(), out).run().await;
        }
        Commands::Add {
            number,
            name,
            days,
            months,
            years,
        } => service
            .create_or_resolve(number, &name, due_offset(days, months, years))
            .await
            .map(|problem| output_problem(&mut out, &output_format, "problem_added", &problem)),
        Commands::List { due } => {
            let listed = if due {
                service.list_due_on_or_after(start_of_today()).await
            } else {
                service.list().await
            };
            listed.map(|problems| output_problems(&mut out, &output_format, &problems, "No problems solved."))
        }
        Commands::Show { number } => service
            .get(number)
            .await
            .map(|problem| output_problem(&mut out, &output_format, "problem", &problem)),
        Commands::Delete { number } => match service.delete(number).await {
            Ok(true) => Ok(output_success(
                &mut out,
                &output_format,
                &format!("Deleted problem with number: {}", number),
                Some(json!({ "problem_number": number })),
            )),
            Ok(false) => Err(ServiceError::NotFound(number)),
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(written) => written,
        Err(e) => {
            output_service_error(&mut out, &output_format, &e)?;
            out.flush()?;
            Err(e.into())
        }
    }
}
