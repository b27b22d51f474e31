use chrono::{DateTime, TimeZone};
use rand::{Rng, distr::Alphanumeric};

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Formats a run timestamp as the `MM/DD/YYYY` date used in playlist names and records.
pub fn run_date<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%m/%d/%Y").to_string()
}

/// Batch marker shared by all rows of one run.
pub fn creation_id<Tz: TimeZone>(now: &DateTime<Tz>) -> i64 {
    now.timestamp_millis()
}

/// Spells out small counts for playlist descriptions.
pub fn count_word(n: usize) -> String {
    const WORDS: [&str; 11] = [
        "Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
    ];
    WORDS
        .get(n)
        .map(|w| w.to_string())
        .unwrap_or_else(|| n.to_string())
}
