//! Schema descriptor assembly

use super::mapping::map_type;
use super::types::{Column, DatasetRef, MappedColumn, PartitionKey, SchemaDescriptor};
use chrono::Utc;

/// Map every column into the Glue type grammar, keeping file order
pub fn map_columns(columns: &[Column]) -> Vec<MappedColumn> {
    columns
        .iter()
        .map(|c| MappedColumn {
            name: c.name.clone(),
            target_type: map_type(&c.source_type),
            source_type: c.source_type.clone(),
            nullable: c.nullable,
        })
        .collect()
}

/// Combine a dataset's identifiers, sample file and schema into a descriptor
///
/// Returns `None` when no sample file was found under the dataset prefix.
pub fn assemble_descriptor(
    dataset: &DatasetRef,
    location: impl Into<String>,
    sample_file: Option<&str>,
    columns: &[Column],
    partitions: Vec<PartitionKey>,
) -> Option<SchemaDescriptor> {
    let sample_file = sample_file?;

    Some(SchemaDescriptor {
        namespace: dataset.namespace.clone(),
        dataset: dataset.dataset.clone(),
        schema_version: dataset.schema_version.clone(),
        location: location.into(),
        columns: map_columns(columns),
        partitions,
        discovered_at: Utc::now(),
        sample_file: sample_file.to_string(),
    })
}
