//! Crawler status types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder for fields Glue leaves unset
pub const NOT_AVAILABLE: &str = "N/A";

/// Snapshot of a crawler as reported by Glue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlerStatus {
    /// Crawler name
    pub name: String,
    /// `READY`, `RUNNING` or `STOPPING`
    pub state: String,
    /// Target database, `N/A` when unset
    pub database: String,
    /// Metadata of the most recent run, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_crawl: Option<LastCrawl>,
}

impl CrawlerStatus {
    /// Whether the crawler is idle and can be started
    pub fn is_ready(&self) -> bool {
        self.state.eq_ignore_ascii_case("READY")
    }

    /// Whether a run is in progress
    pub fn is_running(&self) -> bool {
        self.state.eq_ignore_ascii_case("RUNNING")
    }
}

/// Outcome of the most recent crawl
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastCrawl {
    /// `SUCCEEDED`, `CANCELLED` or `FAILED`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_stream: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
}

impl std::fmt::Display for LastCrawl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.status.as_deref().unwrap_or(NOT_AVAILABLE))?;
        if let Some(start) = &self.start_time {
            write!(f, " at {}", start.to_rfc3339())?;
        }
        if let Some(message) = &self.error_message {
            write!(f, " ({message})")?;
        }
        Ok(())
    }
}
