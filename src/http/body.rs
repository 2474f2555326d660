// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request body helpers: JSON bodies and url-encoded forms

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Body for the JSON convenience methods
///
/// Strings are assumed to be serialized already and are sent verbatim;
/// values are serialized to JSON text.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonBody {
    /// Pre-serialized JSON text
    Raw(String),
    /// Value to serialize
    Value(Value),
}

impl JsonBody {
    /// Serialize any value into a JSON body
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(JsonBody::Value(serde_json::to_value(value)?))
    }

    /// JSON text to send
    pub fn into_text(self) -> Result<String> {
        match self {
            JsonBody::Raw(text) => Ok(text),
            JsonBody::Value(value) => Ok(serde_json::to_string(&value)?),
        }
    }
}

impl From<&str> for JsonBody {
    fn from(text: &str) -> Self {
        JsonBody::Raw(text.to_string())
    }
}

impl From<String> for JsonBody {
    fn from(text: String) -> Self {
        JsonBody::Raw(text)
    }
}

impl From<Value> for JsonBody {
    fn from(value: Value) -> Self {
        JsonBody::Value(value)
    }
}

/// Encode a flat object as `application/x-www-form-urlencoded`
///
/// Keys and values are percent-encoded and joined with `&` in field order.
/// Only shallow objects are supported: a nested object anywhere in a value
/// is an [`Error::Encoding`].
pub fn encode_form<T: Serialize + ?Sized>(form: &T) -> Result<String> {
    let Value::Object(fields) = serde_json::to_value(form)? else {
        return Err(Error::encoding("form body must be an object"));
    };

    let mut pairs = Vec::with_capacity(fields.len());
    for (key, value) in &fields {
        let text = flat_value(key, value)?;
        pairs.push(format!(
            "{}={}",
            urlencoding::encode(key),
            urlencoding::encode(&text)
        ));
    }
    Ok(pairs.join("&"))
}

fn flat_value(key: &str, value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => Ok(String::new()),
                other => flat_value(key, other),
            })
            .collect::<Result<Vec<_>>>()
            .map(|parts| parts.join(",")),
        Value::Object(_) => Err(Error::encoding(format!(
            "field '{}' is a nested object; only flat objects can be url-encoded",
            key
        ))),
    }
}
