//! CLI commands and argument parsing

use crate::config::{DiscoveryConfig, DEFAULT_BUCKET, DEFAULT_REGION, DEFAULT_SCHEMA_VERSION};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Discover and manage blockchain dataset schemas in S3
#[derive(Parser, Debug)]
#[command(name = "chain-catalog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// S3 bucket name
    #[arg(long, global = true, default_value = DEFAULT_BUCKET)]
    pub bucket: String,

    /// AWS region
    #[arg(long, global = true, default_value = DEFAULT_REGION)]
    pub region: String,

    /// Schema version prefix to scan
    #[arg(long, global = true, default_value = DEFAULT_SCHEMA_VERSION)]
    pub schema_version: String,

    /// Custom S3-compatible endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Do not send requester-pays headers
    #[arg(long, global = true)]
    pub no_request_payer: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Discovery settings from the global flags
    pub fn discovery_config(&self) -> DiscoveryConfig {
        let config = DiscoveryConfig::new(&self.bucket)
            .with_region(&self.region)
            .with_schema_version(&self.schema_version)
            .with_request_payer(!self.no_request_payer);

        match &self.endpoint {
            Some(endpoint) => config.with_endpoint(endpoint),
            None => config,
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all namespaces (blockchains) in the bucket
    #[command(alias = "list-blockchains")]
    ListNamespaces,

    /// List datasets (tables) for a namespace
    #[command(alias = "list-tables")]
    ListDatasets {
        /// Namespace name (e.g., btc, eth, ton)
        namespace: String,
    },

    /// Discover the schema of a dataset from its Parquet files
    DiscoverSchema {
        /// Namespace name
        namespace: String,

        /// Dataset name
        dataset: String,

        /// Write the schema to a file (.json, .yaml or .yml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a CloudFormation AWS::Glue::Table resource
        #[arg(long)]
        cloudformation: bool,
    },

    /// Start a Glue crawler
    TriggerCrawler {
        /// Name of the crawler
        crawler_name: String,
    },

    /// Show the state of a Glue crawler
    CrawlerStatus {
        /// Name of the crawler
        crawler_name: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summaries
    Text,
    /// JSON output (one message per line)
    Json,
    /// Pretty-printed JSON
    Pretty,
}
