//! Crawler module
//!
//! Starts Glue crawlers and reports their state. The [`CrawlerApi`] trait is
//! the seam between the discovery facade and AWS.

mod client;
mod types;

pub use client::{CrawlerApi, GlueCrawlerClient};
pub use types::{CrawlerStatus, LastCrawl, NOT_AVAILABLE};
