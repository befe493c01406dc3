//! Maps command failures to a one-line hint for the terminal.

use catalog_core::{CourseFormError, LoadGuardError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Transport,
    Validation,
    Unknown,
}

/// Backend calls propagate `reqwest::Error` unchanged; a save failure wraps
/// it in `CourseFormError::Persist`.
fn find_http_error(err: &anyhow::Error) -> Option<&reqwest::Error> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<reqwest::Error>())
        .or_else(|| match err.downcast_ref::<CourseFormError>() {
            Some(CourseFormError::Persist(inner)) => inner
                .chain()
                .find_map(|cause| cause.downcast_ref::<reqwest::Error>()),
            _ => None,
        })
}

fn categorize_http(err: &reqwest::Error) -> FailureCategory {
    if err.is_connect() || err.is_timeout() || err.is_status() || err.is_request() {
        FailureCategory::Transport
    } else if err.is_builder() {
        FailureCategory::Validation
    } else {
        FailureCategory::Unknown
    }
}

pub fn categorize(err: &anyhow::Error) -> FailureCategory {
    if let Some(CourseFormError::MissingField(_) | CourseFormError::MissingCourse) =
        err.downcast_ref::<CourseFormError>()
    {
        return FailureCategory::Validation;
    }
    if err.downcast_ref::<LoadGuardError>().is_some() {
        return FailureCategory::Transport;
    }
    if let Some(http) = find_http_error(err) {
        return categorize_http(http);
    }

    let lower = format!("{err:#}").to_ascii_lowercase();
    if lower.contains("connection refused") || lower.contains("timed out") {
        FailureCategory::Transport
    } else if lower.contains("invalid") || lower.contains("not found") {
        FailureCategory::Validation
    } else {
        FailureCategory::Unknown
    }
}

pub fn describe(err: &anyhow::Error) -> String {
    match categorize(err) {
        FailureCategory::Transport => {
            format!("Course service unreachable or failing; check --api-url and retry: {err:#}")
        }
        FailureCategory::Validation => format!("Invalid input: {err:#}"),
        FailureCategory::Unknown => format!("Error: {err:#}"),
    }
}

#[cfg(test)]
#[path = "tests/failure_tests.rs"]
mod tests;
