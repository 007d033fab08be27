use super::{DataSchema, FieldType, SchemaField};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityResult {
    pub compatible: bool,
    pub issues: Vec<String>,
}

/// Whether a consumer expecting `target` can accept a `source` column of a different type.
///
/// Only string columns may feed number, boolean or date consumers, which parse them.
fn coercible(source: FieldType, target: FieldType) -> bool {
    matches!(
        (target, source),
        (FieldType::Number, FieldType::String)
            | (FieldType::Boolean, FieldType::String)
            | (FieldType::Date, FieldType::String)
    )
}

/// Checks whether data shaped like `source` can flow into a consumer expecting `target`.
///
/// Fields only present in `source` are ignored.
pub fn schemas_compatible(source: &DataSchema, target: &DataSchema) -> CompatibilityResult {
    let mut issues = Vec::new();

    for wanted in &target.fields {
        let Some(offered) = source.field(&wanted.name) else {
            if !wanted.nullable {
                issues.push(format!("Missing required field '{}'", wanted.name));
            }
            continue;
        };

        if offered.field_type != wanted.field_type
            && !coercible(offered.field_type, wanted.field_type)
        {
            issues.push(format!(
                "Type mismatch for field '{}': source provides {}, target expects {}",
                wanted.name, offered.field_type, wanted.field_type
            ));
        }

        if offered.nullable && !wanted.nullable {
            issues.push(format!(
                "Field '{}' is nullable in source but required in target",
                wanted.name
            ));
        }
    }

    CompatibilityResult {
        compatible: issues.is_empty(),
        issues,
    }
}

/// Union of both schemas. Conflicting types collapse to `String`; nullability is OR-ed.
pub fn merge_schemas(a: &DataSchema, b: &DataSchema) -> DataSchema {
    let mut fields: Vec<SchemaField> = a.fields.clone();

    for incoming in &b.fields {
        match fields.iter_mut().find(|f| f.name == incoming.name) {
            Some(existing) => {
                if existing.field_type != incoming.field_type {
                    existing.field_type = FieldType::String;
                }
                existing.nullable |= incoming.nullable;
            }
            None => fields.push(incoming.clone()),
        }
    }

    DataSchema { fields }
}
