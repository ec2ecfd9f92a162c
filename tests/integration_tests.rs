//! Integration tests against an in-memory bucket
//!
//! Tests the full flow: S3 layout → sample Parquet → descriptor → CloudFormation/export

use arrow::array::{ArrayRef, Int64Array, ListArray, StringArray};
use arrow::datatypes::{DataType, Field, Int64Type, Schema};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use bytes::Bytes;
use chain_catalog::cli::{Cli, Runner};
use chain_catalog::crawler::{CrawlerApi, CrawlerStatus};
use chain_catalog::storage::DatasetStore;
use chain_catalog::{
    export_descriptor, load_descriptor, DiscoveryConfig, Error, Result, SchemaDiscovery,
};
use clap::Parser;
use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, RetryConfig};
use parquet::arrow::ArrowWriter;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Fixtures
// ============================================================================

fn write_parquet(batch: &RecordBatch) -> Bytes {
    let mut writer = ArrowWriter::try_new(Vec::new(), batch.schema(), None).unwrap();
    writer.write(batch).unwrap();
    Bytes::from(writer.into_inner().unwrap())
}

fn blocks_parquet() -> Bytes {
    let schema = Arc::new(Schema::new(vec![
        Field::new("height", DataType::Int64, false),
        Field::new("hash", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(vec![840_000, 840_001])),
            Arc::new(StringArray::from(vec![Some("0000abcd"), Some("0000ef01")])),
        ],
    )
    .unwrap();
    write_parquet(&batch)
}

fn transactions_parquet() -> Bytes {
    let inputs = ListArray::from_iter_primitive::<Int64Type, _, _>(vec![
        Some(vec![Some(1), Some(2)]),
        None,
    ]);
    let columns: Vec<(&str, ArrayRef)> = vec![
        ("tx_hash", Arc::new(StringArray::from(vec!["a", "b"]))),
        ("input_values", Arc::new(inputs)),
    ];
    write_parquet(&RecordBatch::try_from_iter(columns).unwrap())
}

async fn bucket() -> Arc<InMemory> {
    let memory = InMemory::new();
    let objects = [
        ("v1.0/btc/blocks/part-0.parquet", blocks_parquet()),
        (
            "v1.0/btc/transactions/date=2024-01-01/hour=00/part-0.parquet",
            transactions_parquet(),
        ),
        (
            "v1.0/btc/transactions/date=2024-01-02/hour=00/part-0.parquet",
            transactions_parquet(),
        ),
        ("v1.0/btc/empty/_SUCCESS", Bytes::new()),
        ("v1.0/eth/blocks/part-0.parquet", blocks_parquet()),
        ("v1.1/ton/blocks/part-0.parquet", blocks_parquet()),
    ];
    for (key, data) in objects {
        memory.put(&ObjectPath::from(key), data.into()).await.unwrap();
    }
    Arc::new(memory)
}

/// Crawler stub with a fixed start outcome
struct StubCrawler {
    running: bool,
}

#[async_trait]
impl CrawlerApi for StubCrawler {
    async fn start_crawler(&self, name: &str) -> Result<()> {
        match name {
            "missing" => Err(Error::CrawlerNotFound {
                name: name.to_string(),
            }),
            _ if self.running => Err(Error::CrawlerRunning {
                name: name.to_string(),
            }),
            _ => Ok(()),
        }
    }

    async fn get_crawler(&self, name: &str) -> Result<CrawlerStatus> {
        if name == "missing" {
            return Err(Error::CrawlerNotFound {
                name: name.to_string(),
            });
        }
        Ok(CrawlerStatus {
            name: name.to_string(),
            state: if self.running { "RUNNING" } else { "READY" }.to_string(),
            database: "btc".to_string(),
            last_crawl: None,
        })
    }
}

async fn discovery_with(running: bool) -> SchemaDiscovery {
    let config = DiscoveryConfig::new("test-bucket");
    let store = DatasetStore::new(bucket().await, "test-bucket");
    SchemaDiscovery::new(config, store, Arc::new(StubCrawler { running }))
}

async fn discovery() -> SchemaDiscovery {
    discovery_with(false).await
}

/// A store whose every request fails fast
fn unreachable_store() -> DatasetStore {
    let store = AmazonS3Builder::new()
        .with_bucket_name("test-bucket")
        .with_region("us-east-1")
        .with_endpoint("http://127.0.0.1:1")
        .with_allow_http(true)
        .with_access_key_id("test")
        .with_secret_access_key("test")
        .with_retry(RetryConfig {
            max_retries: 0,
            retry_timeout: Duration::from_secs(1),
            ..Default::default()
        })
        .build()
        .unwrap();
    DatasetStore::new(Arc::new(store), "test-bucket")
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_list_namespaces() {
    let discovery = discovery().await;
    assert_eq!(discovery.list_namespaces().await, vec!["btc", "eth"]);
}

#[tokio::test]
async fn test_list_namespaces_other_version() {
    let store = DatasetStore::new(bucket().await, "test-bucket");
    let config = DiscoveryConfig::new("test-bucket").with_schema_version("v1.1");
    let discovery = SchemaDiscovery::new(config, store, Arc::new(StubCrawler { running: false }));
    assert_eq!(discovery.list_namespaces().await, vec!["ton"]);
}

#[tokio::test]
async fn test_list_datasets() {
    let discovery = discovery().await;
    assert_eq!(
        discovery.list_datasets("btc").await,
        vec!["blocks", "empty", "transactions"]
    );
    assert!(discovery.list_datasets("doge").await.is_empty());
}

#[tokio::test]
async fn test_listing_failure_yields_empty() {
    let discovery = SchemaDiscovery::new(
        DiscoveryConfig::new("test-bucket"),
        unreachable_store(),
        Arc::new(StubCrawler { running: false }),
    );

    assert!(discovery.list_namespaces().await.is_empty());
    assert!(discovery.list_datasets("btc").await.is_empty());
    assert!(discovery.discover_schema("btc", "blocks").await.is_none());
}

// ============================================================================
// Schema discovery
// ============================================================================

#[tokio::test]
async fn test_discover_btc_blocks() {
    let discovery = discovery().await;
    let descriptor = discovery.discover_schema("btc", "blocks").await.unwrap();

    assert_eq!(descriptor.namespace, "btc");
    assert_eq!(descriptor.dataset, "blocks");
    assert_eq!(descriptor.schema_version, "v1.0");
    assert_eq!(descriptor.location, "s3://test-bucket/v1.0/btc/blocks/");
    assert_eq!(descriptor.sample_file, "v1.0/btc/blocks/part-0.parquet");

    let types: Vec<(&str, &str)> = descriptor
        .columns
        .iter()
        .map(|c| (c.name.as_str(), c.target_type.as_str()))
        .collect();
    assert_eq!(types, vec![("height", "bigint"), ("hash", "string")]);
    assert!(!descriptor.columns[0].nullable);
    assert!(descriptor.columns[1].nullable);
    assert!(descriptor.partitions.is_empty());
}

#[tokio::test]
async fn test_discover_partitioned_dataset() {
    let discovery = discovery().await;
    let descriptor = discovery
        .discover_schema("btc", "transactions")
        .await
        .unwrap();

    let partitions: Vec<&str> = descriptor
        .partitions
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(partitions, vec!["date", "hour"]);
    assert!(descriptor.partitions.iter().all(|p| p.key_type == "string"));

    let inputs = descriptor.column("input_values").unwrap();
    assert_eq!(inputs.source_type, "list<item: int64>");
    assert_eq!(inputs.target_type, "array<list<item: int64>>");
}

#[tokio::test]
async fn test_file_names_are_not_partitions() {
    let memory = InMemory::new();
    let objects = [
        ("v1.0/btc/logs/run=7.parquet", blocks_parquet()),
        ("v1.0/btc/traces/date=2024-01-01/part=3.parquet", blocks_parquet()),
    ];
    for (key, data) in objects {
        memory.put(&ObjectPath::from(key), data.into()).await.unwrap();
    }
    let discovery = SchemaDiscovery::new(
        DiscoveryConfig::new("test-bucket"),
        DatasetStore::new(Arc::new(memory), "test-bucket"),
        Arc::new(StubCrawler { running: false }),
    );

    let logs = discovery.discover_schema("btc", "logs").await.unwrap();
    assert_eq!(logs.sample_file, "v1.0/btc/logs/run=7.parquet");
    assert!(logs.partitions.is_empty());

    let traces = discovery.discover_schema("btc", "traces").await.unwrap();
    let partitions: Vec<&str> = traces.partitions.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(partitions, vec!["date"]);
}

#[tokio::test]
async fn test_discover_without_parquet_is_none() {
    let discovery = discovery().await;
    assert!(discovery.discover_schema("btc", "empty").await.is_none());
    assert!(discovery.discover_schema("btc", "nothing").await.is_none());
}

#[tokio::test]
async fn test_discover_then_render_template() {
    let discovery = discovery().await;
    let descriptor = discovery
        .discover_schema("btc", "transactions")
        .await
        .unwrap();
    let rendered = discovery.render_template(&descriptor);

    assert!(rendered.contains("GlueTableTransactionsBTC:"));
    assert!(rendered.contains("DatabaseName: !Ref GlueDatabaseBTC"));
    assert!(rendered.contains("            - Name: tx_hash\n              Type: string\n"));
    assert!(rendered.contains("          - Name: date\n            Type: string\n"));
    assert!(rendered.contains("          - Name: hour\n            Type: string\n"));
}

// ============================================================================
// Export
// ============================================================================

#[tokio::test]
async fn test_export_round_trip_json_and_yaml() {
    let discovery = discovery().await;
    let descriptor = discovery.discover_schema("btc", "blocks").await.unwrap();
    let dir = tempfile::tempdir().unwrap();

    let json_path = dir.path().join("blocks.json");
    export_descriptor(&descriptor, &json_path).unwrap();
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(raw["columns"][0]["type"], "bigint");
    assert_eq!(raw["columns"][0]["arrow_type"], "int64");
    assert_eq!(load_descriptor(&json_path).unwrap(), descriptor);

    let yaml_path = dir.path().join("blocks.yaml");
    export_descriptor(&descriptor, &yaml_path).unwrap();
    assert!(std::fs::read_to_string(&yaml_path)
        .unwrap()
        .contains("namespace: btc"));
    assert_eq!(load_descriptor(&yaml_path).unwrap(), descriptor);
}

#[test]
fn test_export_to_missing_directory_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("schema.json");
    let descriptor: chain_catalog::SchemaDescriptor = serde_json::from_value(serde_json::json!({
        "namespace": "btc",
        "dataset": "blocks",
        "schema_version": "v1.0",
        "location": "s3://b/v1.0/btc/blocks/",
        "columns": [],
        "partitions": [],
        "discovered_at": "2024-01-01T00:00:00Z",
        "sample_file": "v1.0/btc/blocks/part-0.parquet"
    }))
    .unwrap();

    assert!(export_descriptor(&descriptor, &path).is_err());
}

// ============================================================================
// Crawler facade
// ============================================================================

#[tokio::test]
async fn test_trigger_crawler_outcomes() {
    assert!(discovery_with(false).await.trigger_crawler("btc").await);
    assert!(!discovery_with(true).await.trigger_crawler("btc").await);
    assert!(!discovery_with(false).await.trigger_crawler("missing").await);
}

#[tokio::test]
async fn test_crawler_status() {
    let discovery = discovery_with(true).await;
    let status = discovery.crawler_status("btc").await.unwrap();
    assert_eq!(status.state, "RUNNING");
    assert!(discovery.crawler_status("missing").await.is_none());
}

// ============================================================================
// CLI runner
// ============================================================================

#[tokio::test]
async fn test_cli_connect_failure_ends_cleanly() {
    let cli = Cli::parse_from(["chain-catalog", "--bucket", "", "list-namespaces"]);
    assert!(Runner::new(cli).run().await.is_ok());
}

async fn run_cli(args: &[&str]) -> String {
    let cli = Cli::parse_from(std::iter::once("chain-catalog").chain(args.iter().copied()));
    let discovery = discovery().await;
    let mut out = Vec::new();
    Runner::new(cli).execute(&discovery, &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn test_cli_list_namespaces_text() {
    assert_eq!(run_cli(&["list-namespaces"]).await, "btc\neth\n");
}

#[tokio::test]
async fn test_cli_list_datasets_json() {
    let output = run_cli(&["list-tables", "btc", "--format", "json"]).await;
    let msg: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
    assert_eq!(msg["type"], "DATASETS");
    assert_eq!(msg["namespace"], "btc");
    assert_eq!(
        msg["names"],
        serde_json::json!(["blocks", "empty", "transactions"])
    );
}

#[tokio::test]
async fn test_cli_discover_schema_with_export_and_template() {
    let dir = tempfile::tempdir().unwrap();
    let export_path = dir.path().join("blocks.json");

    let output = run_cli(&[
        "discover-schema",
        "btc",
        "blocks",
        "--output",
        export_path.to_str().unwrap(),
        "--cloudformation",
    ])
    .await;

    assert!(output.starts_with("Schema Summary:\n   Namespace: btc\n   Dataset: blocks\n"));
    assert!(output.contains("   Columns: 2\n   Partitions: 0\n"));
    assert!(output.contains("CloudFormation Template:"));
    assert!(output.contains("GlueTableBlocksBTC:"));
    assert!(export_path.exists());
}

#[tokio::test]
async fn test_cli_discover_missing_dataset_prints_nothing() {
    assert_eq!(run_cli(&["discover-schema", "btc", "empty"]).await, "");
}

#[tokio::test]
async fn test_cli_export_failure_is_not_fatal() {
    let output = run_cli(&[
        "discover-schema",
        "btc",
        "blocks",
        "--output",
        "/nonexistent-dir/blocks.json",
    ])
    .await;
    assert!(output.contains("Schema Summary:"));
}

#[tokio::test]
async fn test_cli_crawler_status_text() {
    let output = run_cli(&["crawler-status", "btc-crawler"]).await;
    assert_eq!(
        output,
        "Crawler Status:\n   Name: btc-crawler\n   State: READY\n   Database: btc\n"
    );
}

#[tokio::test]
async fn test_cli_trigger_crawler_json() {
    let output = run_cli(&["trigger-crawler", "btc-crawler", "-f", "json"]).await;
    let msg: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
    assert_eq!(msg["type"], "CRAWLER_START");
    assert_eq!(msg["started"], true);
}
