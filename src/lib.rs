// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # chain-catalog
//!
//! Discovers the schema of blockchain datasets stored in S3 and produces
//! AWS Glue catalog definitions for them.
//!
//! ## Features
//!
//! - **Namespace Discovery**: walk `<version>/<namespace>/<dataset>/` prefixes
//! - **Schema Inference**: read the embedded Arrow schema of one sample Parquet file
//! - **Type Mapping**: Arrow type names to Glue/Hive types
//! - **CloudFormation**: render an `AWS::Glue::Table` resource per dataset
//! - **Crawlers**: start Glue crawlers and report their state
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chain_catalog::{DiscoveryConfig, SchemaDiscovery, Result};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<()> {
//!     let discovery = SchemaDiscovery::connect(DiscoveryConfig::default()).await?;
//!
//!     for namespace in discovery.list_namespaces().await {
//!         println!("{namespace}");
//!     }
//!
//!     if let Some(schema) = discovery.discover_schema("btc", "blocks").await {
//!         println!("{}", discovery.render_template(&schema));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       SchemaDiscovery                        │
//! │  list_namespaces  list_datasets  discover_schema  crawlers   │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──┬──────────────┬─────────────┐
//! │   Storage    │     Schema       │   Template   │   Crawler   │
//! ├──────────────┼──────────────────┼──────────────┼─────────────┤
//! │ S3 listing   │ Type mapping     │ {{ vars }}   │ StartCrawler│
//! │ Sample fetch │ Partition keys   │ Glue table   │ GetCrawler  │
//! │ Parquet meta │ Descriptors      │              │             │
//! └──────────────┴──────────────────┴──────────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Discovery configuration
pub mod config;

/// Schema model, type mapping and partition detection
pub mod schema;

/// S3 listing and sample file access
pub mod storage;

/// Template interpolation and CloudFormation rendering
pub mod template;

/// Glue crawler client
pub mod crawler;

/// Operator-facing discovery facade
pub mod discovery;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::DiscoveryConfig;
pub use discovery::{export_descriptor, load_descriptor, SchemaDiscovery};
pub use error::{Error, Result};
pub use schema::{map_type, SchemaDescriptor};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
