//! Glue crawler client

use super::types::{CrawlerStatus, LastCrawl, NOT_AVAILABLE};
use crate::error::{Error, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_glue::error::DisplayErrorContext;
use aws_sdk_glue::types::{Crawler, LastCrawlInfo};
use aws_sdk_glue::Client;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Start and inspect cataloging jobs by name
#[async_trait]
pub trait CrawlerApi: Send + Sync {
    /// Start a crawler run
    ///
    /// Returns [`Error::CrawlerRunning`] if a run is already in progress.
    async fn start_crawler(&self, name: &str) -> Result<()>;

    /// Fetch the current state of a crawler
    async fn get_crawler(&self, name: &str) -> Result<CrawlerStatus>;
}

/// [`CrawlerApi`] backed by the AWS Glue API
#[derive(Debug, Clone)]
pub struct GlueCrawlerClient {
    client: Client,
}

impl GlueCrawlerClient {
    /// Wrap an existing Glue client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Load AWS configuration from the environment for the given region
    pub async fn connect(region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self::new(Client::new(&sdk_config))
    }
}

#[async_trait]
impl CrawlerApi for GlueCrawlerClient {
    async fn start_crawler(&self, name: &str) -> Result<()> {
        match self.client.start_crawler().name(name).send().await {
            Ok(_) => {
                debug!(crawler = name, "StartCrawler accepted");
                Ok(())
            }
            Err(err) => {
                let err = err.into_service_error();
                if err.is_crawler_running_exception() {
                    Err(Error::CrawlerRunning {
                        name: name.to_string(),
                    })
                } else if err.is_entity_not_found_exception() {
                    Err(Error::CrawlerNotFound {
                        name: name.to_string(),
                    })
                } else {
                    Err(Error::crawler(DisplayErrorContext(&err).to_string()))
                }
            }
        }
    }

    async fn get_crawler(&self, name: &str) -> Result<CrawlerStatus> {
        let output = match self.client.get_crawler().name(name).send().await {
            Ok(output) => output,
            Err(err) => {
                let err = err.into_service_error();
                return if err.is_entity_not_found_exception() {
                    Err(Error::CrawlerNotFound {
                        name: name.to_string(),
                    })
                } else {
                    Err(Error::crawler(DisplayErrorContext(&err).to_string()))
                };
            }
        };

        let crawler = output.crawler().ok_or_else(|| Error::CrawlerNotFound {
            name: name.to_string(),
        })?;

        Ok(crawler_status(name, crawler))
    }
}

fn crawler_status(requested: &str, crawler: &Crawler) -> CrawlerStatus {
    CrawlerStatus {
        name: crawler.name().unwrap_or(requested).to_string(),
        state: crawler
            .state()
            .map_or(NOT_AVAILABLE, |s| s.as_str())
            .to_string(),
        database: crawler
            .database_name()
            .unwrap_or(NOT_AVAILABLE)
            .to_string(),
        last_crawl: crawler.last_crawl().map(last_crawl),
    }
}

fn last_crawl(info: &LastCrawlInfo) -> LastCrawl {
    LastCrawl {
        status: info.status().map(|s| s.as_str().to_string()),
        error_message: info.error_message().map(str::to_string),
        log_group: info.log_group().map(str::to_string),
        log_stream: info.log_stream().map(str::to_string),
        start_time: info
            .start_time()
            .and_then(|t| DateTime::<Utc>::from_timestamp(t.secs(), t.subsec_nanos())),
    }
}
