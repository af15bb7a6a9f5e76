//! Collaborator-facing report shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Occurrence count for one distinct message within a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCount {
    pub exception: String,
    pub count: u64,
}

/// All message counts for one 15-minute window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketReport {
    pub timestamp: String,
    pub logs: Vec<MessageCount>,
}

/// Success payload: `{"response": [...]}` in bucket-discovery order, with
/// each bucket's messages in lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogProcessResponse {
    pub response: Vec<BucketReport>,
}

/// Shape aggregated counts into the ordered report.
pub fn to_report(buckets: Vec<(String, BTreeMap<String, u64>)>) -> LogProcessResponse {
    let response = buckets
        .into_iter()
        .map(|(timestamp, counts)| BucketReport {
            timestamp,
            logs: counts
                .into_iter()
                .map(|(exception, count)| MessageCount { exception, count })
                .collect(),
        })
        .collect();
    LogProcessResponse { response }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_to_the_wire_shape() {
        let report = to_report(vec![(
            "10:00-10:15".to_string(),
            BTreeMap::from([("Timeout".to_string(), 2)]),
        )]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "response": [
                    {"timestamp": "10:00-10:15", "logs": [{"exception": "Timeout", "count": 2}]}
                ]
            })
        );
    }

    #[test]
    fn messages_come_out_lexicographically_within_a_bucket() {
        let report = to_report(vec![(
            "10:00-10:15".to_string(),
            BTreeMap::from([
                ("Timeout".to_string(), 1),
                ("Deadlock".to_string(), 1),
                ("AssertionError".to_string(), 1),
            ]),
        )]);
        let order: Vec<&str> =
            report.response[0].logs.iter().map(|l| l.exception.as_str()).collect();
        assert_eq!(order, vec!["AssertionError", "Deadlock", "Timeout"]);
    }
}
