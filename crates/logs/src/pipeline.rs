//! End-to-end log processing: validate, fetch, sort, bucket, aggregate.

use std::time::Instant;

use crate::aggregate::aggregate;
use crate::bucket::{bucket_label, parse_line, ParsedLine};
use crate::error::LogProcessError;
use crate::fetch::LogFetcher;
use crate::report::{to_report, LogProcessResponse};
use crate::request::LogProcessRequest;

/// Run the whole flow for one request. Suspends until every fetch worker has
/// finished; there is no partial-result or streaming mode.
pub async fn process(request: &LogProcessRequest) -> Result<LogProcessResponse, LogProcessError> {
    let started = Instant::now();
    request.validate()?;

    tracing::info!(
        workers = request.parallel_file_processing_count,
        files = request.log_files.len(),
        "starting log processor"
    );

    let fetcher = LogFetcher::new(request.parallel_file_processing_count as usize)?;
    let raw_lines = fetcher.fetch_lines(&request.log_files).await?;
    let report = bucket_and_aggregate(&raw_lines);

    tracing::info!(
        lines = raw_lines.len(),
        buckets = report.response.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "processed log files"
    );
    Ok(report)
}

/// Pure tail of the pipeline: parse raw lines (skipping malformed ones with
/// a warning), sort by embedded timestamp, bucket into 15-minute windows,
/// and aggregate into the ordered report.
pub fn bucket_and_aggregate(lines: &[String]) -> LogProcessResponse {
    let mut parsed: Vec<ParsedLine> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(p) => parsed.push(p),
            Err(err) => tracing::warn!(error = %err, line = %line, "skipping malformed log line"),
        }
    }

    // Stable sort: lines with equal timestamps keep fetch (URL) order.
    parsed.sort_by_key(|p| p.timestamp);

    let events = parsed.into_iter().map(|p| (bucket_label(&p.timestamp), p.message));
    to_report(aggregate(events))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn lines_are_sorted_by_timestamp_before_bucketing() {
        // 00:50 UTC and 00:44 UTC on 1970-01-01, supplied out of order.
        let report = bucket_and_aggregate(&lines(&[
            "id2 3000000 LateWindow",
            "id1 2640000 EarlyWindow",
        ]));
        let order: Vec<&str> =
            report.response.iter().map(|b| b.timestamp.as_str()).collect();
        assert_eq!(order, vec!["00:30-00:45", "00:45-01:00"]);
    }

    #[test]
    fn malformed_lines_are_skipped_not_fatal() {
        let report = bucket_and_aggregate(&lines(&[
            "id1 2640000 Timeout",
            "garbage",
            "",
            "id2 2640001 Timeout",
        ]));
        assert_eq!(report.response.len(), 1);
        assert_eq!(report.response[0].logs[0].count, 2);
    }

    #[test]
    fn identical_messages_in_one_window_are_counted_together() {
        let report = bucket_and_aggregate(&lines(&[
            "a 2640000 ConnectionReset",
            "b 2640500 ConnectionReset",
        ]));
        assert_eq!(
            report.response[0].logs[0],
            crate::report::MessageCount { exception: "ConnectionReset".into(), count: 2 }
        );
    }
}
