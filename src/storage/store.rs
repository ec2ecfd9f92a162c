//! Object store access for dataset listing and sample downloads

use crate::config::DiscoveryConfig;
use crate::error::{Error, Result};
use bytes::Bytes;
use futures::{StreamExt, TryStreamExt};
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::sync::Arc;
use tracing::debug;

/// File extension of sample files
pub const SAMPLE_EXTENSION: &str = ".parquet";

/// Read-only view of the bucket holding the datasets
#[derive(Debug, Clone)]
pub struct DatasetStore {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Bucket name, used to build `s3://` locations
    bucket: String,
}

impl DatasetStore {
    /// Wrap an existing object store
    pub fn new(store: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    /// Build an S3 store from the discovery config
    ///
    /// Credentials come from the `AWS_*` environment variables or the
    /// instance/container metadata endpoint.
    pub fn from_config(config: &DiscoveryConfig) -> Result<Self> {
        if config.bucket.trim().is_empty() {
            return Err(Error::config("Bucket name must not be empty"));
        }

        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region)
            .with_request_payer(config.request_payer);

        if let Some(endpoint) = &config.endpoint {
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(endpoint.starts_with("http://"));
        }

        let store = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create S3 client: {e}")))?;

        Ok(Self::new(Arc::new(store), &config.bucket))
    }

    /// Bucket name
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// `s3://bucket/key`
    pub fn uri(&self, key: &str) -> String {
        format!("s3://{}/{key}", self.bucket)
    }

    /// Full paths of the common prefixes directly under `prefix`, in listing order
    pub async fn common_prefixes(&self, prefix: &str) -> Result<Vec<String>> {
        let path = ObjectPath::from(prefix);
        let listing = self
            .store
            .list_with_delimiter(Some(&path))
            .await
            .map_err(|e| Error::listing(prefix, e.to_string()))?;

        debug!(
            prefix,
            prefixes = listing.common_prefixes.len(),
            objects = listing.objects.len(),
            "Listed prefix"
        );

        Ok(listing
            .common_prefixes
            .iter()
            .map(|p| p.as_ref().to_string())
            .collect())
    }

    /// Sorted, deduplicated names of the child prefixes directly under `prefix`
    pub async fn child_names(&self, prefix: &str) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .common_prefixes(prefix)
            .await?
            .iter()
            .filter_map(|p| p.rsplit('/').next())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        names.sort();
        names.dedup();
        Ok(names)
    }

    /// First `.parquet` key among the first `scan_limit` keys under `prefix`
    pub async fn find_sample_file(&self, prefix: &str, scan_limit: usize) -> Result<Option<String>> {
        let path = ObjectPath::from(prefix);
        let objects: Vec<_> = self
            .store
            .list(Some(&path))
            .take(scan_limit)
            .try_collect()
            .await
            .map_err(|e| Error::listing(prefix, e.to_string()))?;

        Ok(objects
            .into_iter()
            .map(|meta| meta.location.to_string())
            .find(|key| key.ends_with(SAMPLE_EXTENSION)))
    }

    /// Download an object
    pub async fn fetch(&self, key: &str) -> Result<Bytes> {
        let path = ObjectPath::from(key);
        let result = self.store.get(&path).await?;
        let data = result.bytes().await?;
        debug!(key, size = data.len(), "Downloaded object");
        Ok(data)
    }
}
