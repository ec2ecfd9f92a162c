//! CLI module
//!
//! Command-line interface for schema discovery.
//!
//! # Commands
//!
//! - `list-namespaces` - List namespaces under the schema version
//! - `list-datasets` - List datasets of a namespace
//! - `discover-schema` - Read a dataset's schema, optionally export it and
//!   print a CloudFormation resource
//! - `trigger-crawler` - Start a Glue crawler
//! - `crawler-status` - Show a Glue crawler's state

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
