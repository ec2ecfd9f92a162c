//! Schema types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Partition values are never inspected, so every key is typed as a string
pub const PARTITION_KEY_TYPE: &str = "string";

/// A field of the sample file's embedded schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Field name
    pub name: String,
    /// Canonical Arrow type name, e.g. `int64` or `list<item: string>`
    pub source_type: String,
    /// Whether the field is nullable
    pub nullable: bool,
}

impl Column {
    /// Create a column
    pub fn new(name: impl Into<String>, source_type: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            source_type: source_type.into(),
            nullable,
        }
    }
}

/// A column expressed in the Glue/Hive type grammar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedColumn {
    /// Column name
    pub name: String,

    /// Glue type, e.g. `bigint`, `array<...>`, `decimal(10,2)`
    #[serde(rename = "type")]
    pub target_type: String,

    /// Arrow type the column was mapped from
    #[serde(rename = "arrow_type", default)]
    pub source_type: String,

    /// Nullability as reported by the sample file
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

fn default_nullable() -> bool {
    true
}

impl MappedColumn {
    /// Create a mapped column with no source information
    pub fn new(name: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_type: target_type.into(),
            source_type: String::new(),
            nullable: true,
        }
    }
}

/// A partition key inferred from a `key=value` path segment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartitionKey {
    /// Key name (left-hand side of `=`)
    pub name: String,
    /// Always `string`
    #[serde(rename = "type")]
    pub key_type: String,
}

impl PartitionKey {
    /// Create a string-typed partition key
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key_type: PARTITION_KEY_TYPE.to_string(),
        }
    }
}

/// Identifies one dataset in the bucket hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRef {
    /// Top-level group, e.g. `btc`
    pub namespace: String,
    /// Dataset name, e.g. `blocks`
    pub dataset: String,
    /// Schema-version prefix, e.g. `v1.0`
    pub schema_version: String,
}

impl DatasetRef {
    /// Create a dataset reference
    pub fn new(
        namespace: impl Into<String>,
        dataset: impl Into<String>,
        schema_version: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            dataset: dataset.into(),
            schema_version: schema_version.into(),
        }
    }
}

impl std::fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.namespace, self.dataset)
    }
}

/// Everything learned about one dataset in a single discovery run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    /// Top-level group, e.g. `btc`
    #[serde(alias = "blockchain")]
    pub namespace: String,

    /// Dataset name, e.g. `blocks`
    #[serde(alias = "table")]
    pub dataset: String,

    /// Schema-version prefix
    pub schema_version: String,

    /// `s3://bucket/<version>/<namespace>/<dataset>/`
    pub location: String,

    /// Columns in file order
    pub columns: Vec<MappedColumn>,

    /// Partition keys in first-seen order
    pub partitions: Vec<PartitionKey>,

    /// When the descriptor was assembled
    pub discovered_at: DateTime<Utc>,

    /// Object key the columns were read from
    pub sample_file: String,
}

impl SchemaDescriptor {
    /// Dataset reference for this descriptor
    pub fn dataset_ref(&self) -> DatasetRef {
        DatasetRef::new(&self.namespace, &self.dataset, &self.schema_version)
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&MappedColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Whether the dataset is partitioned
    pub fn is_partitioned(&self) -> bool {
        !self.partitions.is_empty()
    }
}
