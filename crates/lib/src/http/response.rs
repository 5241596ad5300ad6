//! Response body decoding.
//!
//! The service answers with JSON, but some endpoints return a bare quoted
//! scalar that is not always valid JSON. Bodies that fail to parse are kept as
//! raw text with one surrounding pair of double quotes removed.

use std::fmt;

use serde_json::Value;

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    /// The body parsed as JSON.
    Json(Value),
    /// The body was not JSON. Holds the text after quote stripping.
    Raw(String),
}

impl ResponseData {
    pub fn into_value(self) -> Value {
        match self {
            ResponseData::Json(value) => value,
            ResponseData::Raw(text) => Value::String(text),
        }
    }
}

impl fmt::Display for ResponseData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseData::Json(value) => write!(f, "{value}"),
            ResponseData::Raw(text) => f.write_str(text),
        }
    }
}

/// Parse `body` as JSON, falling back to the raw text.
pub fn parse_response_body(body: &str) -> ResponseData {
    match serde_json::from_str(body) {
        Ok(value) => ResponseData::Json(value),
        Err(_) => ResponseData::Raw(strip_quotes(body).to_string()),
    }
}

/// Remove exactly one leading and one trailing `"` when both are present.
fn strip_quotes(text: &str) -> &str {
    if text.starts_with('"') && text.ends_with('"') {
        // A lone quote is both the opening and the closing one.
        if text.len() < 2 { "" } else { &text[1..text.len() - 1] }
    } else {
        text
    }
}
