//! Concurrent log ingestion and 15-minute-bucket aggregation.
//!
//! A bounded pool of workers fetches newline-delimited log files over HTTP
//! (all-or-nothing), lines are sorted by their embedded timestamp, bucketed
//! into 15-minute UTC windows, and message occurrences are counted per
//! bucket into an ordered report.

pub mod aggregate;
pub mod bucket;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod report;
pub mod request;

pub use aggregate::aggregate;
pub use bucket::{bucket_label, parse_line, ParsedLine};
pub use error::{LogProcessError, ParseError};
pub use fetch::{LogFetcher, FETCH_TIMEOUT};
pub use pipeline::{bucket_and_aggregate, process};
pub use report::{BucketReport, LogProcessResponse, MessageCount};
pub use request::{FailureResponse, LogProcessRequest, PARALLELISM_BOUNDS};
