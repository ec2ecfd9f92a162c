//! Arrow to Glue type mapping

use arrow::datatypes::{DataType, Field, IntervalUnit, TimeUnit};

/// Ordered substring rules for scalar types; the first hit wins.
///
/// Matching is by substring, so `uint32` maps to `int` and a dictionary
/// with `int32` indices maps to `int`. Those results are relied on.
pub const SCALAR_TYPE_RULES: &[(&str, &str)] = &[
    ("int32", "int"),
    ("int64", "bigint"),
    ("float", "float"),
    ("double", "double"),
    ("string", "string"),
    ("bool", "boolean"),
    ("timestamp", "timestamp"),
    ("date32", "date"),
    ("binary", "binary"),
];

/// Glue type used when nothing else matches
pub const DEFAULT_TARGET_TYPE: &str = "string";

/// Map an Arrow type name to a Glue/Hive type string
pub fn map_type(source_type: &str) -> String {
    let lower = source_type.to_lowercase();

    if lower.contains("list") {
        return format!("array<{source_type}>");
    }
    if lower.contains("struct") {
        return format!("struct<{source_type}>");
    }
    if lower.contains("decimal") {
        return source_type.replace("decimal128", "decimal");
    }

    SCALAR_TYPE_RULES
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map_or(DEFAULT_TARGET_TYPE, |(_, target)| target)
        .to_string()
}

/// Canonical Arrow name of a data type (`int64`, `list<item: string>`, ...)
///
/// Nested children that are not nullable are suffixed with ` not null`,
/// e.g. `struct<height: int64 not null>`.
///
/// These are the names data producers see in their own tooling, and the
/// vocabulary [`map_type`] matches against.
pub fn arrow_type_name(data_type: &DataType) -> String {
    match data_type {
        DataType::Null => "null".to_string(),
        DataType::Boolean => "bool".to_string(),
        DataType::Int8 => "int8".to_string(),
        DataType::Int16 => "int16".to_string(),
        DataType::Int32 => "int32".to_string(),
        DataType::Int64 => "int64".to_string(),
        DataType::UInt8 => "uint8".to_string(),
        DataType::UInt16 => "uint16".to_string(),
        DataType::UInt32 => "uint32".to_string(),
        DataType::UInt64 => "uint64".to_string(),
        DataType::Float16 => "halffloat".to_string(),
        DataType::Float32 => "float".to_string(),
        DataType::Float64 => "double".to_string(),
        DataType::Utf8 => "string".to_string(),
        DataType::LargeUtf8 => "large_string".to_string(),
        DataType::Utf8View => "string_view".to_string(),
        DataType::Binary => "binary".to_string(),
        DataType::LargeBinary => "large_binary".to_string(),
        DataType::BinaryView => "binary_view".to_string(),
        DataType::FixedSizeBinary(size) => format!("fixed_size_binary[{size}]"),
        DataType::Date32 => "date32[day]".to_string(),
        DataType::Date64 => "date64[ms]".to_string(),
        DataType::Time32(unit) => format!("time32[{}]", time_unit_name(unit)),
        DataType::Time64(unit) => format!("time64[{}]", time_unit_name(unit)),
        DataType::Timestamp(unit, None) => format!("timestamp[{}]", time_unit_name(unit)),
        DataType::Timestamp(unit, Some(tz)) => {
            format!("timestamp[{}, tz={tz}]", time_unit_name(unit))
        }
        DataType::Duration(unit) => format!("duration[{}]", time_unit_name(unit)),
        DataType::Interval(IntervalUnit::YearMonth) => "month_interval".to_string(),
        DataType::Interval(IntervalUnit::DayTime) => "day_time_interval".to_string(),
        DataType::Interval(IntervalUnit::MonthDayNano) => "month_day_nano_interval".to_string(),
        DataType::Decimal128(precision, scale) => format!("decimal128({precision}, {scale})"),
        DataType::Decimal256(precision, scale) => format!("decimal256({precision}, {scale})"),
        DataType::List(field) => format!("list<{}>", child_field_name(field)),
        DataType::LargeList(field) => format!("large_list<{}>", child_field_name(field)),
        DataType::FixedSizeList(field, size) => {
            format!("fixed_size_list<{}>[{size}]", child_field_name(field))
        }
        DataType::Struct(fields) => {
            let inner: Vec<String> = fields.iter().map(|f| child_field_name(f)).collect();
            format!("struct<{}>", inner.join(", "))
        }
        DataType::Map(entries, _) => match entries.data_type() {
            DataType::Struct(kv) if kv.len() == 2 => format!(
                "map<{}, {}>",
                arrow_type_name(kv[0].data_type()),
                arrow_type_name(kv[1].data_type())
            ),
            other => format!("map<{}>", arrow_type_name(other)),
        },
        DataType::Dictionary(key, value) => format!(
            "dictionary<values={}, indices={}, ordered=0>",
            arrow_type_name(value),
            arrow_type_name(key)
        ),
        // Remaining variants (unions, views, run-end encoding) have no Glue
        // counterpart; their debug form falls through to the default rule.
        other => format!("{other:?}").to_lowercase(),
    }
}

/// `name: type` of a nested field; non-nullable children carry ` not null`
fn child_field_name(field: &Field) -> String {
    let type_name = arrow_type_name(field.data_type());
    if field.is_nullable() {
        format!("{}: {type_name}", field.name())
    } else {
        format!("{}: {type_name} not null", field.name())
    }
}

fn time_unit_name(unit: &TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Second => "s",
        TimeUnit::Millisecond => "ms",
        TimeUnit::Microsecond => "us",
        TimeUnit::Nanosecond => "ns",
    }
}
