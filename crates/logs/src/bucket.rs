//! Per-line parsing and 15-minute wall-clock bucketing.

use chrono::{DateTime, TimeZone, Timelike, Utc};

use crate::error::ParseError;

/// A log line split into its wire components: `<id> <timestampMs> <message…>`.
/// The message is everything after the second token, trailing whitespace
/// trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Parse one raw log line.
///
/// At least three space-separated tokens are required; the timestamp token
/// must be integer epoch milliseconds (UTC). Either failure is a
/// [`ParseError`] the caller recovers from per line.
pub fn parse_line(line: &str) -> Result<ParsedLine, ParseError> {
    let mut tokens = line.splitn(3, ' ');
    let (Some(id), Some(raw_timestamp), Some(message)) =
        (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(ParseError::MissingTokens {
            found: line.split(' ').filter(|t| !t.is_empty()).count(),
        });
    };

    let millis: i64 = raw_timestamp
        .parse()
        .map_err(|_| ParseError::InvalidTimestamp(raw_timestamp.to_string()))?;
    let timestamp = Utc
        .timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| ParseError::InvalidTimestamp(raw_timestamp.to_string()))?;

    Ok(ParsedLine {
        id: id.to_string(),
        timestamp,
        message: message.trim_end().to_string(),
    })
}

/// Label of the half-open 15-minute window containing `timestamp`.
///
/// `[0,15) -> "HH:00-HH:15"`, `[15,30) -> "HH:15-HH:30"`,
/// `[30,45) -> "HH:30-HH:45"`, `[45,60) -> "HH:45-(HH+1):00"`. Hour 23's
/// last window is labeled `"23:45-00:00"`; labels never roll the calendar
/// day.
pub fn bucket_label(timestamp: &DateTime<Utc>) -> String {
    let (hour, minute) = (timestamp.hour(), timestamp.minute());
    if minute >= 45 {
        let next_hour = if hour == 23 { 0 } else { hour + 1 };
        format!("{hour:02}:45-{next_hour:02}:00")
    } else {
        let window_start = minute / 15 * 15;
        format!("{hour:02}:{window_start:02}-{hour:02}:{:02}", window_start + 15)
    }
}
