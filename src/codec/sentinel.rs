//! Tagged encoding for non-finite floats.
//!
//! JSON has no literal for `NaN` or the infinities, so those values are written as
//! `{"__type": "NaN"}`, `{"__type": "Infinity"}` or `{"__type": "-Infinity"}`.
//! Finite values are written as plain numbers. Use with `#[serde(with = "...")]`.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

pub const TAG_KEY: &str = "__type";

const UNKNOWN_TAG: &str = "unknown non-finite number tag";

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Finite(f64),
    Tagged {
        #[serde(rename = "__type")]
        tag: String,
    },
}

/// The sentinel tag for `value`, or `None` when it is finite.
pub fn tag_for(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("Infinity")
    } else if value == f64::NEG_INFINITY {
        Some("-Infinity")
    } else {
        None
    }
}

pub fn value_for(tag: &str) -> Option<f64> {
    match tag {
        "NaN" => Some(f64::NAN),
        "Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

fn unknown_tag_message(tag: &str) -> String {
    format!("{} '{}'", UNKNOWN_TAG, tag)
}

/// Recovers the offending tag from an error raised by this module, however many
/// layers of context were wrapped around its message.
pub fn unknown_tag_in(message: &str) -> Option<&str> {
    let start = message.find(UNKNOWN_TAG)? + UNKNOWN_TAG.len();
    let rest = message[start..].strip_prefix(" '")?;
    rest.find('\'').map(|end| &rest[..end])
}

/// If `value` is a sentinel object, returns its tag.
pub fn sentinel_tag(value: &Value) -> Option<&str> {
    match value {
        Value::Object(map) if map.len() == 1 => map.get(TAG_KEY).and_then(Value::as_str),
        _ => None,
    }
}

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match tag_for(*value) {
        Some(tag) => {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry(TAG_KEY, tag)?;
            map.end()
        }
        None => serializer.serialize_f64(*value),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Repr::deserialize(deserializer)? {
        Repr::Finite(value) => Ok(value),
        Repr::Tagged { tag } => {
            value_for(&tag).ok_or_else(|| D::Error::custom(unknown_tag_message(&tag)))
        }
    }
}

/// Optional numbers. Anything that is neither a number nor a sentinel decodes as
/// `None`, so a half-edited field does not make its owner undecodable. Unknown tags
/// are still rejected.
pub mod option {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => super::serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        match super::sentinel_tag(&raw) {
            Some(tag) => super::value_for(tag)
                .map(Some)
                .ok_or_else(|| D::Error::custom(super::unknown_tag_message(tag))),
            None => Ok(raw.as_f64()),
        }
    }
}
