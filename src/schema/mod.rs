//! Schema module
//!
//! Turns the embedded schema of a sample Parquet file into a catalog
//! description.
//!
//! # Features
//!
//! - **Type Mapping**: Arrow type names to Glue/Hive types via an ordered rule table
//! - **Arrow Type Naming**: canonical names for Arrow data types
//! - **Partition Detection**: Hive-style `key=value` path segments
//! - **Descriptor Assembly**: one immutable [`SchemaDescriptor`] per dataset

mod descriptor;
mod mapping;
mod partition;
mod types;

pub use descriptor::{assemble_descriptor, map_columns};
pub use mapping::{arrow_type_name, map_type, DEFAULT_TARGET_TYPE, SCALAR_TYPE_RULES};
pub use partition::{detect_partitions, detect_partitions_in_paths};
pub use types::{
    Column, DatasetRef, MappedColumn, PartitionKey, SchemaDescriptor, PARTITION_KEY_TYPE,
};
