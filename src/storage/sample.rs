//! Embedded schema extraction from Parquet files

use crate::error::{Error, Result};
use crate::schema::{arrow_type_name, Column};
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

/// Read the Arrow schema embedded in a Parquet file
///
/// Only the footer is decoded; no row groups are read. `key` is used for
/// error messages.
pub fn read_parquet_columns(key: &str, data: Bytes) -> Result<Vec<Column>> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(data)
        .map_err(|e| Error::schema_read(key, e.to_string()))?;

    Ok(builder
        .schema()
        .fields()
        .iter()
        .map(|field| {
            Column::new(
                field.name(),
                arrow_type_name(field.data_type()),
                field.is_nullable(),
            )
        })
        .collect())
}
