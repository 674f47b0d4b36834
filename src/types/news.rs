use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Publication time of a headline. Providers occasionally send dates that do
/// not parse; those are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Published {
    At(DateTime<Utc>),
    Raw(String),
}

impl Published {
    pub fn parse_rfc2822(raw: &str) -> Self {
        match DateTime::parse_from_rfc2822(raw.trim()) {
            Ok(dt) => Published::At(dt.with_timezone(&Utc)),
            Err(_) => Published::Raw(raw.to_string()),
        }
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Published::At(dt) => Some(*dt),
            Published::Raw(_) => None,
        }
    }
}

impl fmt::Display for Published {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Published::At(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M UTC")),
            Published::Raw(raw) => write!(f, "{}", raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub published: Published,
    pub source: String,
}
