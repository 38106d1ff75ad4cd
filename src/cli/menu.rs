use std::io::{BufRead, Write};

use crate::cli::utils::{output_problems, output_service_error, problem_line};
use crate::cli::OutputFormat;
use crate::services::{DueOffset, ProblemService};

const BAD_INPUT: &str = "Incorrect input entered, returning to menu";

/// Interactive text menu over the same service operations as the HTTP API.
pub struct Menu<R, W> {
    service: ProblemService,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(service: ProblemService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Loop until the user picks exit or input runs out.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            writeln!(self.output, "Welcome to the menu")?;
            writeln!(self.output, "1. Add a problem")?;
            writeln!(self.output, "2. Display problems")?;
            writeln!(self.output, "3. Delete problem")?;
            writeln!(self.output, "0. Exit")?;
            self.output.flush()?;

            let Some(choice) = self.read_line()? else {
                writeln!(self.output, "Exiting program")?;
                return Ok(());
            };

            match choice.parse::<i64>() {
                Ok(1) => self.add_problem().await?,
                Ok(2) => self.display_problems().await?,
                Ok(3) => self.delete_problem().await?,
                Ok(0) => {
                    writeln!(self.output, "Exiting program")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Please enter valid input")?,
            }
            writeln!(self.output)?;
        }
    }

    async fn add_problem(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "Adding problem")?;

        let Some(number) = self.prompt_number("Enter problem number")? else {
            return Ok(());
        };
        writeln!(self.output, "Enter problem name")?;
        self.output.flush()?;
        let Some(name) = self.read_line()? else {
            writeln!(self.output, "{}", BAD_INPUT)?;
            return Ok(());
        };
        let Some(days) = self.prompt_number("Enter days")? else {
            return Ok(());
        };
        let Some(months) = self.prompt_number("Enter months")? else {
            return Ok(());
        };
        let Some(years) = self.prompt_number("Enter years")? else {
            return Ok(());
        };

        match self
            .service
            .create_or_resolve(number, &name, DueOffset::new(years, months, days))
            .await
        {
            Ok(problem) if problem.number_times_solved > 1 => {
                writeln!(self.output, "Problem already exists. Updated {}", problem_line(&problem))?;
            }
            Ok(problem) => {
                writeln!(self.output, "Added {}", problem_line(&problem))?;
            }
            Err(e) => output_service_error(&mut self.output, &OutputFormat::Text, &e)?,
        }
        Ok(())
    }

    async fn display_problems(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "Displays problems solved and their information")?;
        match self.service.list().await {
            Ok(problems) => {
                output_problems(&mut self.output, &OutputFormat::Text, &problems, "No problems solved.")?
            }
            Err(e) => output_service_error(&mut self.output, &OutputFormat::Text, &e)?,
        }
        Ok(())
    }

    async fn delete_problem(&mut self) -> anyhow::Result<()> {
        let Some(number) = self.prompt_number("Enter problem number to delete")? else {
            return Ok(());
        };

        match self.service.delete(number).await {
            Ok(true) => writeln!(self.output, "Deleted problem with number: {}", number)?,
            Ok(false) => writeln!(self.output, "No problem with number: {}", number)?,
            Err(e) => output_service_error(&mut self.output, &OutputFormat::Text, &e)?,
        }
        Ok(())
    }

    /// Prompt and parse an integer; prints the bad-input notice and yields
    /// `None` on anything else.
    fn prompt_number(&mut self, prompt: &str) -> anyhow::Result<Option<i32>> {
        writeln!(self.output, "{}", prompt)?;
        self.output.flush()?;
        match self.read_line()?.map(|line| line.parse::<i32>()) {
            Some(Ok(n)) => Ok(Some(n)),
            _ => {
                writeln!(self.output, "{}", BAD_INPUT)?;
                Ok(None)
            }
        }
    }

    /// Next line without its terminator, `None` at end of input.
    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
