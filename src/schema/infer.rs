//! Schema inference over untyped record data.
//!
//! Inference is total: rows that are not objects are skipped, never rejected.

use super::{DataPreview, DataSchema, FieldType, SchemaField};
use ahash::AHashMap;
use chrono::{Datelike, NaiveDateTime};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

pub const DEFAULT_SAMPLE_SIZE: usize = 100;

const MAX_TIMESTAMP_LEN: usize = 24;
const MIN_DATE_YEAR: i32 = 1900;
const MAX_DATE_YEAR: i32 = 2100;

static ISO_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{3})?Z?$")
        .expect("timestamp pattern is valid")
});

/// Classifies a single value. `null` counts as a string.
pub fn detect_field_type(value: &Value) -> FieldType {
    match value {
        Value::Null => FieldType::String,
        Value::Bool(_) => FieldType::Boolean,
        Value::Number(_) => FieldType::Number,
        Value::String(s) if is_timestamp(s) => FieldType::Date,
        Value::String(_) => FieldType::String,
        Value::Array(_) => FieldType::Array,
        Value::Object(_) => FieldType::Object,
    }
}

fn is_timestamp(s: &str) -> bool {
    if s.len() > MAX_TIMESTAMP_LEN || !ISO_TIMESTAMP.is_match(s) {
        return false;
    }
    let body = s.strip_suffix('Z').unwrap_or(s);
    let format = if body.contains('.') {
        "%Y-%m-%dT%H:%M:%S%.3f"
    } else {
        "%Y-%m-%dT%H:%M:%S"
    };
    NaiveDateTime::parse_from_str(body, format)
        .is_ok_and(|dt| (MIN_DATE_YEAR..=MAX_DATE_YEAR).contains(&dt.year()))
}

// Votes collected for one key, in the order its types were first seen.
struct FieldTally {
    name: String,
    votes: Vec<(FieldType, usize)>,
    nullable: bool,
}

impl FieldTally {
    fn vote(&mut self, field_type: FieldType) {
        match self.votes.iter_mut().find(|(t, _)| *t == field_type) {
            Some((_, count)) => *count += 1,
            None => self.votes.push((field_type, 1)),
        }
    }

    // Highest tally wins; on a tie the type seen first is kept.
    fn winner(&self) -> FieldType {
        let mut best: Option<(FieldType, usize)> = None;
        for &(field_type, count) in &self.votes {
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((field_type, count));
            }
        }
        best.map(|(t, _)| t).unwrap_or(FieldType::String)
    }
}

/// Infers a schema from `records`, keeping fields in first-discovery order.
pub fn generate_schema(records: &[Value]) -> DataSchema {
    let mut index: AHashMap<String, usize> = AHashMap::new();
    let mut tallies: Vec<FieldTally> = Vec::new();

    for record in records {
        let Value::Object(map) = record else {
            continue;
        };
        for (key, value) in map {
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                tallies.push(FieldTally {
                    name: key.clone(),
                    votes: Vec::new(),
                    nullable: false,
                });
                tallies.len() - 1
            });
            let tally = &mut tallies[slot];
            tally.vote(detect_field_type(value));
            if value.is_null() {
                tally.nullable = true;
            }
        }
    }

    let fields: Vec<SchemaField> = tallies
        .iter()
        .map(|t| SchemaField::new(t.name.clone(), t.winner(), t.nullable))
        .collect();
    debug!(rows = records.len(), fields = fields.len(), "inferred schema");
    DataSchema { fields }
}

/// Builds a preview holding at most `max_sample_size` leading records.
pub fn create_data_preview(
    records: &[Value],
    max_sample_size: usize,
    errors: Option<Vec<String>>,
) -> DataPreview {
    let sample_len = records.len().min(max_sample_size);
    DataPreview {
        sample: records[..sample_len].to_vec(),
        total_rows: records.len(),
        schema: generate_schema(records),
        errors,
    }
}

impl DataPreview {
    /// A preview with the default sample size and no errors.
    pub fn from_records(records: &[Value]) -> Self {
        create_data_preview(records, DEFAULT_SAMPLE_SIZE, None)
    }
}

/// Checks every record against `schema`, returning one message per problem found.
pub fn validate_data_against_schema(records: &[Value], schema: &DataSchema) -> Vec<String> {
    let mut errors = Vec::new();
    for (row, record) in records.iter().enumerate() {
        let Value::Object(map) = record else {
            errors.push(format!("Row {}: record is not an object", row));
            continue;
        };
        for field in &schema.fields {
            match map.get(&field.name) {
                None | Some(Value::Null) => {
                    if !field.nullable {
                        errors.push(format!(
                            "Row {}: field '{}' is required but missing or null",
                            row, field.name
                        ));
                    }
                }
                Some(value) => {
                    let actual = detect_field_type(value);
                    if actual != field.field_type {
                        errors.push(format!(
                            "Row {}: field '{}' expected {} but found {}",
                            row, field.name, field.field_type, actual
                        ));
                    }
                }
            }
        }
    }
    errors
}
