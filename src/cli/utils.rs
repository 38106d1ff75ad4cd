use std::io::Write;

use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::database::Problem;
use crate::services::ServiceError;

/// One text line per problem: number, name, due date and solve count.
pub fn problem_line(problem: &Problem) -> String {
    format!(
        "{}  (due {}, solved {} time{})",
        problem,
        problem.due_date.format("%Y-%m-%d"),
        problem.number_times_solved,
        if problem.number_times_solved == 1 { "" } else { "s" }
    )
}

/// Output a single problem in the appropriate format
pub fn output_problem(
    out: &mut impl Write,
    output_format: &OutputFormat,
    key: &str,
    problem: &Problem,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&json!({ key: problem }))?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "{}", problem_line(problem))?;
        }
    }
    Ok(())
}

/// Output a collection of problems, or `empty_message` in text mode when there are none
pub fn output_problems(
    out: &mut impl Write,
    output_format: &OutputFormat,
    problems: &[Problem],
    empty_message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&json!({ "problem": problems }))?)?;
        }
        OutputFormat::Text if problems.is_empty() => {
            writeln!(out, "{}", empty_message)?;
        }
        OutputFormat::Text => {
            for problem in problems {
                writeln!(out, "{}", problem_line(problem))?;
            }
        }
    }
    Ok(())
}

/// Output a success message in the appropriate format
pub fn output_success(
    out: &mut impl Write,
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({ "message": message });
            if let (Some(Value::Object(extra)), Some(obj)) = (data, response.as_object_mut()) {
                obj.extend(extra);
            }
            writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "✓ {}", message)?;
        }
    }
    Ok(())
}

/// Output a service error in the appropriate format. Validation errors list
/// each field on its own line in text mode.
pub fn output_service_error(
    out: &mut impl Write,
    output_format: &OutputFormat,
    err: &ServiceError,
) -> anyhow::Result<()> {
    match (output_format, err) {
        (OutputFormat::Json, ServiceError::Validation(errors)) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&json!({ "error": errors }))?)?;
        }
        (OutputFormat::Json, other) => {
            writeln!(
                out,
                "{}",
                serde_json::to_string_pretty(&json!({ "error": other.to_string() }))?
            )?;
        }
        (OutputFormat::Text, ServiceError::Validation(errors)) => {
            for (field, message) in errors {
                writeln!(out, "Invalid {}: {}", field, message)?;
            }
        }
        (OutputFormat::Text, other) => {
            writeln!(out, "Error: {}", other)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn sample(times: i32) -> Problem {
        Problem {
            problem_number: 15,
            problem_name: "3Sum".to_string(),
            last_solved_on: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
            due_date: Utc.with_ymd_and_hms(2024, 5, 8, 8, 0, 0).unwrap(),
            number_times_solved: times,
        }
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn text_line_pluralises() {
        assert_eq!(problem_line(&sample(1)), "15 3Sum  (due 2024-05-08, solved 1 time)");
        assert_eq!(problem_line(&sample(3)), "15 3Sum  (due 2024-05-08, solved 3 times)");
    }

    #[test]
    fn empty_collection_prints_message() {
        let text = render(|out| output_problems(out, &OutputFormat::Text, &[], "No problems solved."));
        assert_eq!(text, "No problems solved.\n");
    }

    #[test]
    fn json_collection_uses_envelope() {
        let text = render(|out| output_problems(out, &OutputFormat::Json, &[sample(2)], ""));
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["problem"][0]["number_of_times_solved"], 2);
    }

    #[test]
    fn validation_errors_are_listed_per_field() {
        let mut errors = BTreeMap::new();
        errors.insert("problem number".to_string(), "problem number must be greater than 0".to_string());
        let err = ServiceError::Validation(errors);
        let text = render(|out| output_service_error(out, &OutputFormat::Text, &err));
        assert_eq!(text, "Invalid problem number: problem number must be greater than 0\n");
    }
}
