//! Discovery configuration
//!
//! Where the datasets live and how far the tool looks when sampling them.

use serde::{Deserialize, Serialize};

/// Default bucket holding the public blockchain datasets
pub const DEFAULT_BUCKET: &str = "aws-public-blockchain";

/// Default AWS region
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default schema-version prefix
pub const DEFAULT_SCHEMA_VERSION: &str = "v1.0";

/// Settings shared by every discovery operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// S3 bucket containing the datasets
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// AWS region for S3 and Glue
    #[serde(default = "default_region")]
    pub region: String,

    /// Top-level prefix, e.g. `v1.0`
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Custom S3-compatible endpoint (LocalStack, MinIO)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Send `x-amz-request-payer: requester` on S3 requests
    #[serde(default = "default_true")]
    pub request_payer: bool,

    /// Number of keys inspected when looking for a sample file
    #[serde(default = "default_sample_scan_limit")]
    pub sample_scan_limit: usize,

    /// Number of sub-prefixes inspected when probing for partitions
    #[serde(default = "default_partition_probe_limit")]
    pub partition_probe_limit: usize,
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_schema_version() -> String {
    DEFAULT_SCHEMA_VERSION.to_string()
}

fn default_true() -> bool {
    true
}

fn default_sample_scan_limit() -> usize {
    10
}

fn default_partition_probe_limit() -> usize {
    5
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            region: default_region(),
            schema_version: default_schema_version(),
            endpoint: None,
            request_payer: true,
            sample_scan_limit: default_sample_scan_limit(),
            partition_probe_limit: default_partition_probe_limit(),
        }
    }
}

impl DiscoveryConfig {
    /// Create a config for the given bucket with defaults for everything else
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Default::default()
        }
    }

    /// Set the AWS region
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the schema-version prefix
    #[must_use]
    pub fn with_schema_version(mut self, version: impl Into<String>) -> Self {
        self.schema_version = version.into();
        self
    }

    /// Set a custom S3 endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Enable/disable requester-pays requests
    #[must_use]
    pub fn with_request_payer(mut self, enabled: bool) -> Self {
        self.request_payer = enabled;
        self
    }

    /// Set how many keys are scanned for a sample file
    #[must_use]
    pub fn with_sample_scan_limit(mut self, limit: usize) -> Self {
        self.sample_scan_limit = limit;
        self
    }

    /// Set how many sub-prefixes are probed for partitions
    #[must_use]
    pub fn with_partition_probe_limit(mut self, limit: usize) -> Self {
        self.partition_probe_limit = limit;
        self
    }

    /// Key prefix under which namespaces are listed: `v1.0`
    pub fn version_prefix(&self) -> String {
        self.schema_version.trim_matches('/').to_string()
    }

    /// Key prefix of a namespace: `v1.0/btc`
    pub fn namespace_prefix(&self, namespace: &str) -> String {
        format!("{}/{namespace}", self.version_prefix())
    }

    /// Key prefix of a dataset: `v1.0/btc/blocks`
    pub fn dataset_prefix(&self, namespace: &str, dataset: &str) -> String {
        format!("{}/{namespace}/{dataset}", self.version_prefix())
    }

    /// Public location of a dataset: `s3://bucket/v1.0/btc/blocks/`
    pub fn dataset_location(&self, namespace: &str, dataset: &str) -> String {
        format!(
            "s3://{}/{}/",
            self.bucket,
            self.dataset_prefix(namespace, dataset)
        )
    }
}
