//! Template interpolation and CloudFormation rendering
//!
//! Handles `{{ variable }}` interpolation with nested access like
//! `{{ table.logical_name }}`, and renders an `AWS::Glue::Table` resource
//! from a [`SchemaDescriptor`].

use crate::schema::SchemaDescriptor;
use regex::{Captures, Regex};
use serde_json::{json, Value};
use std::sync::LazyLock;

/// Regex for matching template variables: {{ variable.path }}
static TEMPLATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)*)\s*\}\}").unwrap()
});

/// CloudFormation resource for one Glue table
pub const GLUE_TABLE_TEMPLATE: &str = r#"
  {{ table.logical_name }}:
    Type: AWS::Glue::Table
    Properties:
      CatalogId: !Ref AWS::AccountId
      DatabaseName: !Ref {{ table.database_ref }}
      TableInput:
        Owner: owner
        Retention: 0
        Name: {{ table.name }}
        StorageDescriptor:
          Columns:
{{ table.columns }}
          InputFormat: org.apache.hadoop.hive.ql.io.parquet.MapredParquetInputFormat
          Location: !Join
            - ""
            - - s3://
              - !Ref S3Bucket
              - /
              - !Ref SchemaVersion
              - /{{ table.namespace }}/{{ table.name }}
          OutputFormat: org.apache.hadoop.hive.ql.io.parquet.MapredParquetOutputFormat
          Compressed: false
          NumberOfBuckets: -1
          SerdeInfo:
            SerializationLibrary: org.apache.hadoop.hive.ql.io.parquet.serde.ParquetHiveSerDe
            Parameters:
              serialization.format: "1"
          BucketColumns: []
          SortColumns: []
          StoredAsSubDirectories: false
        PartitionKeys:
{{ table.partitions }}
        TableType: EXTERNAL_TABLE
"#;

/// Values available to a template, addressed as `table.<key>`
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    /// Values describing the table being rendered
    pub table: Value,
}

impl TemplateContext {
    /// Create context with table values
    pub fn with_table(table: Value) -> Self {
        Self { table }
    }

    /// Get a value by path (e.g., "table.name")
    pub fn get(&self, path: &str) -> Option<&Value> {
        let parts: Vec<&str> = path.split('.').collect();

        match parts.split_first() {
            Some((&"table", [])) => Some(&self.table),
            Some((&"table", rest)) => get_nested_value(&self.table, rest),
            _ => None,
        }
    }
}

/// Get a nested value from a JSON value by path
fn get_nested_value<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for part in path {
        match current {
            Value::Object(map) => {
                current = map.get(*part)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Render a template, leaving unknown variables in place
///
/// Each placeholder of `template` is substituted once; substituted values
/// are never scanned again.
pub fn render(template: &str, ctx: &TemplateContext) -> String {
    TEMPLATE_REGEX
        .replace_all(template, |caps: &Captures<'_>| match ctx.get(&caps[1]) {
            Some(value) => value_to_string(value),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Convert a JSON value to a string for template substitution
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        // For complex types, use JSON serialization
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

// ============================================================================
// CloudFormation
// ============================================================================

/// `token_transfers` -> `TokenTransfers`
pub fn camel_case(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Logical resource name, e.g. `GlueTableBlocksBTC`
pub fn logical_table_name(descriptor: &SchemaDescriptor) -> String {
    format!(
        "GlueTable{}{}",
        camel_case(&descriptor.dataset),
        descriptor.namespace.to_uppercase()
    )
}

/// Logical name of the namespace's Glue database, e.g. `GlueDatabaseBTC`
pub fn logical_database_name(namespace: &str) -> String {
    format!("GlueDatabase{}", namespace.to_uppercase())
}

fn columns_block(descriptor: &SchemaDescriptor) -> String {
    descriptor
        .columns
        .iter()
        .map(|c| {
            format!(
                "            - Name: {}\n              Type: {}",
                c.name, c.target_type
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn partitions_block(descriptor: &SchemaDescriptor) -> String {
    if descriptor.partitions.is_empty() {
        return "          []".to_string();
    }
    descriptor
        .partitions
        .iter()
        .map(|p| {
            format!(
                "          - Name: {}\n            Type: {}",
                p.name, p.key_type
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the interpolation context for a descriptor
pub fn table_context(descriptor: &SchemaDescriptor) -> TemplateContext {
    TemplateContext::with_table(json!({
        "logical_name": logical_table_name(descriptor),
        "database_ref": logical_database_name(&descriptor.namespace),
        "name": descriptor.dataset,
        "namespace": descriptor.namespace,
        "columns": columns_block(descriptor),
        "partitions": partitions_block(descriptor),
    }))
}

/// Render the `AWS::Glue::Table` resource for a descriptor
///
/// The output is not validated; that is CloudFormation's job.
pub fn render_table_template(descriptor: &SchemaDescriptor) -> String {
    render(GLUE_TABLE_TEMPLATE, &table_context(descriptor))
}
