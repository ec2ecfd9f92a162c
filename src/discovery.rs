//! Schema discovery facade
//!
//! Operator-facing operations over the bucket and the crawler. Every
//! collaborator failure is logged here and turned into an empty result, so
//! callers never see an error from these methods.

use crate::config::DiscoveryConfig;
use crate::crawler::{CrawlerApi, CrawlerStatus, GlueCrawlerClient};
use crate::error::{Error, Result};
use crate::schema::{
    assemble_descriptor, detect_partitions_in_paths, DatasetRef, PartitionKey, SchemaDescriptor,
};
use crate::storage::{read_parquet_columns, DatasetStore};
use crate::template;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Discovers dataset schemas and drives the crawler
pub struct SchemaDiscovery {
    config: DiscoveryConfig,
    store: DatasetStore,
    crawler: Arc<dyn CrawlerApi>,
}

impl SchemaDiscovery {
    /// Create a discovery facade from explicit collaborators
    pub fn new(config: DiscoveryConfig, store: DatasetStore, crawler: Arc<dyn CrawlerApi>) -> Self {
        Self {
            config,
            store,
            crawler,
        }
    }

    /// Build S3 and Glue clients from the config
    pub async fn connect(config: DiscoveryConfig) -> Result<Self> {
        let store = DatasetStore::from_config(&config)?;
        let crawler = GlueCrawlerClient::connect(&config.region).await;
        Ok(Self::new(config, store, Arc::new(crawler)))
    }

    /// Active configuration
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    // ========================================================================
    // Namespaces and datasets
    // ========================================================================

    /// Names of all namespaces under the schema-version prefix
    pub async fn list_namespaces(&self) -> Vec<String> {
        let prefix = self.config.version_prefix();
        info!("Scanning s3://{}/{prefix}/", self.config.bucket);

        match self.store.child_names(&prefix).await {
            Ok(namespaces) => {
                info!(
                    "Found {} namespace(s): {}",
                    namespaces.len(),
                    namespaces.join(", ")
                );
                namespaces
            }
            Err(e) => {
                error!("Error listing namespaces: {e}");
                Vec::new()
            }
        }
    }

    /// Names of all datasets in a namespace
    pub async fn list_datasets(&self, namespace: &str) -> Vec<String> {
        info!("Discovering datasets for {namespace}");
        let prefix = self.config.namespace_prefix(namespace);

        match self.store.child_names(&prefix).await {
            Ok(datasets) => {
                info!(
                    "Found {} dataset(s): {}",
                    datasets.len(),
                    datasets.join(", ")
                );
                datasets
            }
            Err(e) => {
                error!("Error listing datasets: {e}");
                Vec::new()
            }
        }
    }

    // ========================================================================
    // Schema
    // ========================================================================

    /// Discover the schema of one dataset from its first Parquet file
    ///
    /// `None` when the dataset has no sample file or anything along the
    /// way fails.
    pub async fn discover_schema(&self, namespace: &str, dataset: &str) -> Option<SchemaDescriptor> {
        info!("Discovering schema for {namespace}.{dataset}");

        match self.try_discover_schema(namespace, dataset).await {
            Ok(Some(descriptor)) => {
                info!("Discovered {} columns", descriptor.columns.len());
                Some(descriptor)
            }
            Ok(None) => None,
            Err(e) => {
                error!("Error discovering schema: {e}");
                None
            }
        }
    }

    async fn try_discover_schema(
        &self,
        namespace: &str,
        dataset: &str,
    ) -> Result<Option<SchemaDescriptor>> {
        let prefix = self.config.dataset_prefix(namespace, dataset);
        let dataset_ref = DatasetRef::new(namespace, dataset, &self.config.schema_version);
        let location = self.config.dataset_location(namespace, dataset);

        let Some(sample_key) = self
            .store
            .find_sample_file(&prefix, self.config.sample_scan_limit)
            .await?
        else {
            warn!("No parquet files found in {prefix}/");
            return Ok(None);
        };

        info!("Reading schema from: {}", self.store.uri(&sample_key));
        let data = self.store.fetch(&sample_key).await?;
        let columns = read_parquet_columns(&sample_key, data)?;
        let partitions = self.detect_partitions(&prefix, &sample_key).await;

        Ok(assemble_descriptor(
            &dataset_ref,
            location,
            Some(&sample_key),
            &columns,
            partitions,
        ))
    }

    /// Partition keys seen in the first sub-prefixes and the sample file's directory
    async fn detect_partitions(&self, prefix: &str, sample_key: &str) -> Vec<PartitionKey> {
        let relative = |path: &str| -> String {
            path.strip_prefix(prefix)
                .unwrap_or(path)
                .trim_start_matches('/')
                .to_string()
        };

        let mut paths: Vec<String> = match self.store.common_prefixes(prefix).await {
            Ok(prefixes) => prefixes
                .iter()
                .take(self.config.partition_probe_limit)
                .map(|p| relative(p.as_str()))
                .collect(),
            Err(e) => {
                warn!("Could not detect partitions: {e}");
                return Vec::new();
            }
        };
        // File names are never partition candidates, only directories
        let sample_dir = sample_key.rsplit_once('/').map_or("", |(dir, _)| dir);
        paths.push(relative(sample_dir));

        let partitions = detect_partitions_in_paths(&paths);
        debug!(prefix, count = partitions.len(), "Detected partitions");
        partitions
    }

    /// Render the CloudFormation snippet for a descriptor
    pub fn render_template(&self, descriptor: &SchemaDescriptor) -> String {
        template::render_table_template(descriptor)
    }

    // ========================================================================
    // Crawler
    // ========================================================================

    /// Start a crawler; `false` if it is already running or the call failed
    pub async fn trigger_crawler(&self, name: &str) -> bool {
        info!("Starting crawler: {name}");

        match self.crawler.start_crawler(name).await {
            Ok(()) => {
                info!("Crawler started successfully");
                true
            }
            Err(e) if e.is_crawler_running() => {
                warn!("Crawler {name} is already running");
                false
            }
            Err(e) => {
                error!("Error starting crawler: {e}");
                false
            }
        }
    }

    /// Current crawler state; `None` if the lookup failed
    pub async fn crawler_status(&self, name: &str) -> Option<CrawlerStatus> {
        match self.crawler.get_crawler(name).await {
            Ok(status) => Some(status),
            Err(e) => {
                error!("Error getting crawler status: {e}");
                None
            }
        }
    }
}

// ============================================================================
// Export
// ============================================================================

/// Whether a path should be written as YAML rather than JSON
fn is_yaml_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Write a descriptor to disk; `.yaml`/`.yml` as YAML, anything else as JSON
pub fn export_descriptor(descriptor: &SchemaDescriptor, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let contents = if is_yaml_path(path) {
        serde_yaml::to_string(descriptor)?
    } else {
        serde_json::to_string_pretty(descriptor)?
    };

    std::fs::write(path, contents)?;
    info!("Schema exported to: {}", path.display());
    Ok(())
}

/// Read a descriptor previously written by [`export_descriptor`]
pub fn load_descriptor(path: impl AsRef<Path>) -> Result<SchemaDescriptor> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read {}: {e}", path.display())))?;

    if is_yaml_path(path) {
        Ok(serde_yaml::from_str(&contents)?)
    } else {
        Ok(serde_json::from_str(&contents)?)
    }
}
