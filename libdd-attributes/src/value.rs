// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::truncate::truncate_utf8;

/// A single attribute value: text, a double, or a boolean.
///
/// Storage is a closed sum. Statically-typed callers construct values through
/// the `From` impls and cannot produce an invalid shape; dynamically-typed
/// input funnels through [`AttributeValue::from_json`], which is where every
/// other shape (null, arrays, objects) is turned away.
///
/// All numbers are doubles, matching the single number type of the runtimes
/// these attributes come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Double(f64),
    Boolean(bool),
}

impl AttributeValue {
    /// Admits a dynamically-typed value, or rejects its shape.
    ///
    /// Strings, numbers, and booleans map onto their variants. Null, arrays,
    /// and objects yield `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<AttributeValue> {
        match value {
            serde_json::Value::String(s) => Some(AttributeValue::Text(s.clone())),
            serde_json::Value::Number(n) => n.as_f64().map(AttributeValue::Double),
            serde_json::Value::Bool(b) => Some(AttributeValue::Boolean(*b)),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            AttributeValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Read-time copy with text capped at `limit` bytes on a character
    /// boundary. Doubles and booleans come back unchanged.
    pub(crate) fn truncated(&self, limit: usize) -> AttributeValue {
        match self {
            AttributeValue::Text(s) if s.len() > limit => {
                AttributeValue::Text(truncate_utf8(s, limit).to_owned())
            }
            other => other.clone(),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> AttributeValue {
        AttributeValue::Text(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> AttributeValue {
        AttributeValue::Text(value)
    }
}

impl From<Cow<'_, str>> for AttributeValue {
    fn from(value: Cow<'_, str>) -> AttributeValue {
        AttributeValue::Text(value.into_owned())
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> AttributeValue {
        AttributeValue::Boolean(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> AttributeValue {
        AttributeValue::Double(value)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttributeValue {
                fn from(value: $ty) -> AttributeValue {
                    AttributeValue::Double(value as f64)
                }
            }
        )*
    };
}

impl_from_number!(f32, i8, i16, i32, i64, u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_accepts_primitives() {
        assert_eq!(
            AttributeValue::from_json(&json!("success")),
            Some(AttributeValue::Text("success".to_owned()))
        );
        assert_eq!(
            AttributeValue::from_json(&json!(4)),
            Some(AttributeValue::Double(4.0))
        );
        assert_eq!(
            AttributeValue::from_json(&json!(true)),
            Some(AttributeValue::Boolean(true))
        );
    }

    #[test]
    fn test_from_json_rejects_other_shapes() {
        assert_eq!(AttributeValue::from_json(&json!(null)), None);
        assert_eq!(AttributeValue::from_json(&json!(["second"])), None);
        assert_eq!(AttributeValue::from_json(&json!({"key": "third"})), None);
    }

    #[test]
    fn test_integer_conversions_go_through_f64() {
        assert_eq!(AttributeValue::from(200), AttributeValue::Double(200.0));
        assert_eq!(AttributeValue::from(7u64), AttributeValue::Double(7.0));
    }

    #[test]
    fn test_truncated_only_touches_oversized_text() {
        let short = AttributeValue::from("fits");
        assert_eq!(short.truncated(255), short);

        let long = AttributeValue::from("a".repeat(300));
        assert_eq!(
            long.truncated(255).as_text().map(str::len),
            Some(255)
        );

        let number = AttributeValue::Double(1e9);
        assert_eq!(number.truncated(1), number);
    }

    #[test]
    fn test_untagged_serialization() {
        assert_eq!(
            serde_json::to_value(AttributeValue::from("x")).unwrap(),
            json!("x")
        );
        assert_eq!(
            serde_json::to_value(AttributeValue::Double(2.5)).unwrap(),
            json!(2.5)
        );
        assert_eq!(
            serde_json::to_value(AttributeValue::Boolean(false)).unwrap(),
            json!(false)
        );
    }
}
