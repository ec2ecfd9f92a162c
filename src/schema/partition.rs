//! Hive-style partition key detection from `key=value` path segments

use super::types::PartitionKey;

/// Extract partition keys from path segments
///
/// Keys are deduplicated by name and keep their first-seen order.
pub fn detect_partitions<I, S>(segments: I) -> Vec<PartitionKey>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut partitions: Vec<PartitionKey> = Vec::new();

    for segment in segments {
        let Some(key) = partition_key(segment.as_ref()) else {
            continue;
        };
        if !partitions.iter().any(|p| p.name == key) {
            partitions.push(PartitionKey::new(key));
        }
    }

    partitions
}

/// Extract partition keys from slash-separated relative paths
pub fn detect_partitions_in_paths<I, S>(paths: I) -> Vec<PartitionKey>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let segments: Vec<String> = paths
        .into_iter()
        .flat_map(|path| {
            path.as_ref()
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();

    detect_partitions(segments)
}

/// Key of a `key=value` segment; split on the first `=`
fn partition_key(segment: &str) -> Option<&str> {
    let (key, _value) = segment.split_once('=')?;
    (!key.is_empty()).then_some(key)
}
