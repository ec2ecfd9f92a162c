//! Storage module
//!
//! Read-only access to the dataset bucket.
//!
//! # Overview
//!
//! - Delimiter listings to walk `<version>/<namespace>/<dataset>/`
//! - Bounded scans for a sample `.parquet` file
//! - Sample download and embedded schema extraction

mod sample;
mod store;

pub use sample::read_parquet_columns;
pub use store::{DatasetStore, SAMPLE_EXTENSION};
