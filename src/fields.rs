//! Data-field typing and text conversion
//!
//! A process instance carries named, typed data fields. The host exchanges
//! every value as text, so each runtime type owns a (parse, format) pair
//! collected in a dispatch table. Parsing happens before any remote update
//! is issued; formatting happens when fields are listed.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DATE_FIELD_FORMAT;
use crate::errors::{Error, Result};

/// Runtime type tag of a data field on the workflow server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Binary,
    Boolean,
    Date,
    Decimal,
    Double,
    Integer,
    Long,
    /// Default type for anything the server does not tag more specifically
    Text,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Binary => "binary",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Decimal => "decimal",
            FieldType::Double => "double",
            FieldType::Integer => "integer",
            FieldType::Long => "long",
            FieldType::Text => "text",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed data-field value, converted from or destined for its textual form.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Binary(Vec<u8>),
    Boolean(bool),
    Date(NaiveDateTime),
    Decimal(Decimal),
    Double(f64),
    Integer(i32),
    Long(i64),
    Text(String),
}

impl FieldValue {
    /// The runtime type tag this value belongs to.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Binary(_) => FieldType::Binary,
            FieldValue::Boolean(_) => FieldType::Boolean,
            FieldValue::Date(_) => FieldType::Date,
            FieldValue::Decimal(_) => FieldType::Decimal,
            FieldValue::Double(_) => FieldType::Double,
            FieldValue::Integer(_) => FieldType::Integer,
            FieldValue::Long(_) => FieldType::Long,
            FieldValue::Text(_) => FieldType::Text,
        }
    }
}

type ParseFn = fn(&str) -> std::result::Result<FieldValue, String>;
type FormatFn = fn(&FieldValue) -> String;

/// A (parse, format) pair for one runtime type.
struct FieldCodec {
    parse: ParseFn,
    format: FormatFn,
}

static BINARY_CODEC: FieldCodec = FieldCodec {
    parse: parse_binary,
    format: format_binary,
};
static BOOLEAN_CODEC: FieldCodec = FieldCodec {
    parse: parse_boolean,
    format: format_boolean,
};
static DATE_CODEC: FieldCodec = FieldCodec {
    parse: parse_date,
    format: format_date,
};
static DECIMAL_CODEC: FieldCodec = FieldCodec {
    parse: parse_decimal,
    format: text_fallback,
};
static DOUBLE_CODEC: FieldCodec = FieldCodec {
    parse: parse_double,
    format: text_fallback,
};
static INTEGER_CODEC: FieldCodec = FieldCodec {
    parse: parse_integer,
    format: text_fallback,
};
static LONG_CODEC: FieldCodec = FieldCodec {
    parse: parse_long,
    format: text_fallback,
};
static TEXT_CODEC: FieldCodec = FieldCodec {
    parse: parse_text,
    format: text_fallback,
};

fn codec_for(field_type: FieldType) -> &'static FieldCodec {
    match field_type {
        FieldType::Binary => &BINARY_CODEC,
        FieldType::Boolean => &BOOLEAN_CODEC,
        FieldType::Date => &DATE_CODEC,
        FieldType::Decimal => &DECIMAL_CODEC,
        FieldType::Double => &DOUBLE_CODEC,
        FieldType::Integer => &INTEGER_CODEC,
        FieldType::Long => &LONG_CODEC,
        FieldType::Text => &TEXT_CODEC,
    }
}

/// Converts a textual value to the typed form declared by `field_type`.
///
/// # Errors
/// Returns `Error::Conversion` if the text does not match the expected
/// format for the target type.
pub fn parse_field_value(field_type: FieldType, text: &str) -> Result<FieldValue> {
    (codec_for(field_type).parse)(text).map_err(|detail| Error::Conversion {
        field_type: field_type.to_string(),
        value: text.to_string(),
        detail,
    })
}

/// Converts a typed value back to its textual transport form.
pub fn format_field_value(value: &FieldValue) -> String {
    (codec_for(value.field_type()).format)(value)
}

fn parse_binary(text: &str) -> std::result::Result<FieldValue, String> {
    BASE64
        .decode(text)
        .map(FieldValue::Binary)
        .map_err(|e| e.to_string())
}

fn parse_boolean(text: &str) -> std::result::Result<FieldValue, String> {
    match text.to_lowercase().as_str() {
        "true" => Ok(FieldValue::Boolean(true)),
        "false" => Ok(FieldValue::Boolean(false)),
        _ => Err("expected 'true' or 'false'".to_string()),
    }
}

fn parse_date(text: &str) -> std::result::Result<FieldValue, String> {
    // Space-separated first, then the ISO 'T' separator, then a bare date.
    NaiveDateTime::parse_from_str(text, DATE_FIELD_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|e| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map(|d| d.and_time(NaiveTime::MIN))
                .map_err(|_| e)
        })
        .map(FieldValue::Date)
        .map_err(|e| e.to_string())
}

fn parse_decimal(text: &str) -> std::result::Result<FieldValue, String> {
    Decimal::from_str(text)
        .map(FieldValue::Decimal)
        .map_err(|e| e.to_string())
}

fn parse_double(text: &str) -> std::result::Result<FieldValue, String> {
    text.parse::<f64>()
        .map(FieldValue::Double)
        .map_err(|e| e.to_string())
}

fn parse_integer(text: &str) -> std::result::Result<FieldValue, String> {
    text.parse::<i32>()
        .map(FieldValue::Integer)
        .map_err(|e| e.to_string())
}

fn parse_long(text: &str) -> std::result::Result<FieldValue, String> {
    text.parse::<i64>()
        .map(FieldValue::Long)
        .map_err(|e| e.to_string())
}

fn parse_text(text: &str) -> std::result::Result<FieldValue, String> {
    Ok(FieldValue::Text(text.to_string()))
}

fn format_binary(value: &FieldValue) -> String {
    match value {
        FieldValue::Binary(bytes) => BASE64.encode(bytes),
        other => text_fallback(other),
    }
}

fn format_boolean(value: &FieldValue) -> String {
    match value {
        // The host platform renders booleans with an initial capital
        FieldValue::Boolean(true) => "True".to_string(),
        FieldValue::Boolean(false) => "False".to_string(),
        other => text_fallback(other),
    }
}

fn format_date(value: &FieldValue) -> String {
    match value {
        FieldValue::Date(dt) => dt.format(DATE_FIELD_FORMAT).to_string(),
        other => text_fallback(other),
    }
}

/// Default string conversion for every value kind.
fn text_fallback(value: &FieldValue) -> String {
    match value {
        FieldValue::Binary(bytes) => BASE64.encode(bytes),
        FieldValue::Boolean(true) => "True".to_string(),
        FieldValue::Boolean(false) => "False".to_string(),
        FieldValue::Date(dt) => dt.format(DATE_FIELD_FORMAT).to_string(),
        FieldValue::Decimal(d) => d.to_string(),
        FieldValue::Double(d) => d.to_string(),
        FieldValue::Integer(i) => i.to_string(),
        FieldValue::Long(l) => l.to_string(),
        FieldValue::Text(s) => s.clone(),
    }
}
