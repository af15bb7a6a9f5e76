//! Collaborator-facing request contract, validated before any work starts.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::LogProcessError;

/// Accepted range for the worker count.
pub const PARALLELISM_BOUNDS: RangeInclusive<i64> = 1..=30;

/// A log-processing request: how many fetch workers to run and which files
/// to pull.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogProcessRequest {
    pub parallel_file_processing_count: i64,
    pub log_files: Vec<String>,
}

impl LogProcessRequest {
    /// Range and shape checks; performed before any fetching begins.
    pub fn validate(&self) -> Result<(), LogProcessError> {
        if !PARALLELISM_BOUNDS.contains(&self.parallel_file_processing_count) {
            tracing::error!(
                count = self.parallel_file_processing_count,
                "parallel processing count out of bounds"
            );
            return Err(LogProcessError::validation(
                "Parallel Processing Count out of expected bounds",
            ));
        }
        if self.log_files.is_empty() {
            tracing::error!("no log files provided in request");
            return Err(LogProcessError::validation("No log files provided in request"));
        }
        Ok(())
    }
}

/// Structured failure payload returned for rejected requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureResponse {
    pub status: &'static str,
    pub reason: String,
}

impl FailureResponse {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { status: "failure", reason: reason.into() }
    }
}

impl From<&LogProcessError> for FailureResponse {
    fn from(err: &LogProcessError) -> Self {
        Self::new(err.to_string())
    }
}
