//! Per-type configuration checks.
//!
//! Validation never fails: every applicable rule runs and the problems are
//! collected so an editor can show all of them at once.

use crate::node::{
    Aggregation, ApiFetchConfig, ExportConfig, FilterConfig, JoinConfig, Lenient, LimitConfig,
    MathOperation, MathTransformConfig, NodeConfig, NodeType, PreviewConfig, SortConfig,
};
use serde::Serialize;
use serde_json::Value;
use url::Url;

const KNOWN_HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE"];
const LARGE_PREVIEW_ROWS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Checks `config` against the rules of `node_type`.
pub fn validate_node_config(node_type: NodeType, config: &NodeConfig) -> ValidationResult {
    if config.node_type() != node_type {
        return ValidationResult::from_parts(
            vec![format!(
                "Configuration does not match node type '{}'",
                node_type
            )],
            Vec::new(),
        );
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    match config {
        NodeConfig::ApiFetch(c) => check_api_fetch(c, &mut errors, &mut warnings),
        NodeConfig::Filter(c) => check_filter(c, &mut errors, &mut warnings),
        NodeConfig::Join(c) => check_join(c, &mut errors, &mut warnings),
        NodeConfig::Sort(c) => check_sort(c, &mut errors, &mut warnings),
        NodeConfig::Limit(c) => check_limit(c, &mut errors),
        NodeConfig::Export(c) => check_export(c, &mut errors, &mut warnings),
        NodeConfig::MathTransform(c) => check_math_transform(c, &mut warnings),
        NodeConfig::Preview(c) => check_preview(c, &mut warnings),
        NodeConfig::Reduce(c) => check_choice("operation", &c.operation, &mut warnings),
        NodeConfig::Aggregate(c) => check_aggregations(&c.aggregations, &mut warnings),
        NodeConfig::GroupBy(c) => check_aggregations(&c.aggregations, &mut warnings),
        NodeConfig::CsvUpload(_)
        | NodeConfig::JsonParser(_)
        | NodeConfig::Map(_)
        | NodeConfig::RenameFields(_) => {}
    }
    ValidationResult::from_parts(errors, warnings)
}

/// Validates a raw key-value configuration. A map that does not decode for the
/// type is reported as an invalid result rather than an error.
pub fn validate_config_value(node_type: NodeType, config: &Value) -> ValidationResult {
    match NodeConfig::from_value(node_type, config.clone()) {
        Ok(config) => validate_node_config(node_type, &config),
        Err(err) => ValidationResult::from_parts(vec![err.to_string()], Vec::new()),
    }
}

fn non_empty(value: Option<&str>) -> bool {
    value.is_some_and(|s| !s.trim().is_empty())
}

// A stored choice this crate does not recognise is kept, but flagged.
fn check_choice<T>(what: &str, choice: &Lenient<T>, warnings: &mut Vec<String>) {
    if let Some(raw) = choice.unknown() {
        warnings.push(format!("Unknown {} {}", what, raw));
    }
}

fn check_aggregations(aggregations: &[Aggregation], warnings: &mut Vec<String>) {
    for aggregation in aggregations {
        check_choice("operation", &aggregation.operation, warnings);
    }
}

fn check_api_fetch(config: &ApiFetchConfig, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    match config.url.as_deref().filter(|url| !url.trim().is_empty()) {
        None => errors.push("URL is required".to_string()),
        Some(raw) => match Url::parse(raw) {
            Ok(url) if url.scheme() == "http" => {
                warnings.push("Using insecure HTTP connection".to_string())
            }
            Ok(_) => {}
            Err(_) => errors.push("Invalid URL format".to_string()),
        },
    }
    check_choice("authentication", &config.authentication, warnings);

    if let Some(method) = config.method.as_deref() {
        if !KNOWN_HTTP_METHODS.contains(&method.to_ascii_uppercase().as_str()) {
            warnings.push(format!("Unusual HTTP method '{}'", method));
        }
    }
}

fn check_filter(config: &FilterConfig, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    if !non_empty(config.field.as_deref()) {
        errors.push("Field is required".to_string());
    }
    let has_value = match &config.value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    };
    if !non_empty(config.condition.as_deref()) && !has_value {
        errors.push("Condition or value is required".to_string());
    }
    check_choice("filter operator", &config.operator, warnings);
}

fn check_join(config: &JoinConfig, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    if !non_empty(config.left_key.as_deref()) {
        errors.push("Left key is required".to_string());
    }
    if !non_empty(config.right_key.as_deref()) {
        errors.push("Right key is required".to_string());
    }
    check_choice("join type", &config.join_type, warnings);
}

fn check_sort(config: &SortConfig, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    if !non_empty(config.field.as_deref()) {
        errors.push("Sort field is required".to_string());
    }
    check_choice("sort direction", &config.direction, warnings);
}

fn check_limit(config: &LimitConfig, errors: &mut Vec<String>) {
    // A missing or non-numeric count fails too.
    if config.count().is_none_or(|count| count <= 0.0) {
        errors.push("Count must be greater than 0".to_string());
    }
    let offset_given = match &config.raw_offset {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    };
    if offset_given && config.offset().is_none_or(|offset| offset < 0.0) {
        errors.push("Offset must be non-negative".to_string());
    }
}

fn check_export(config: &ExportConfig, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    if !non_empty(config.format.as_deref()) {
        errors.push("Export format is required".to_string());
    }
    if !non_empty(config.filename.as_deref()) {
        warnings.push("Filename not specified, a default name will be used".to_string());
    }
}

fn check_math_transform(config: &MathTransformConfig, warnings: &mut Vec<String>) {
    let divides = matches!(
        config.operation.known(),
        Some(MathOperation::Divide | MathOperation::Modulo)
    );
    if divides && config.operand == Some(0.0) {
        warnings.push("Division by zero will produce non-finite results".to_string());
    }
    check_choice("math operation", &config.operation, warnings);
}

fn check_preview(config: &PreviewConfig, warnings: &mut Vec<String>) {
    if config.max_rows.known().is_some_and(|&rows| rows > LARGE_PREVIEW_ROWS) {
        warnings.push(format!(
            "Previewing more than {} rows may be slow",
            LARGE_PREVIEW_ROWS
        ));
    }
}
