//! Document input shapes accepted by the validator.

use std::fmt;
use std::path::PathBuf;

use serde_json::Value;
use tokio::io::AsyncRead;

use crate::error::{Result, ValidatorError};

/// Readable source piped into the helper with backpressure
pub type XmlStream = Box<dyn AsyncRead + Send + Unpin>;

/// XML document to validate
pub enum XmlInput {
    /// In-memory document text
    Text(String),
    /// Stream copied into the helper's stdin
    Stream(XmlStream),
    /// Raw document bytes
    Bytes(Vec<u8>),
    /// File read by the helper itself
    File(PathBuf),
}

impl XmlInput {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        XmlInput::File(path.into())
    }

    pub fn stream(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        XmlInput::Stream(Box::new(reader))
    }

    /// Classify a dynamically shaped value.
    ///
    /// Strings are document text and `{ "file": "<path>" }` names a file on
    /// disk; everything else is rejected before any process is started.
    pub fn classify(raw: Value) -> Result<Self> {
        match raw {
            Value::String(text) => Ok(XmlInput::Text(text)),
            Value::Object(map) => match map.get("file") {
                Some(Value::String(path)) if !path.is_empty() => Ok(XmlInput::file(path)),
                _ => Err(ValidatorError::UnsupportedInputType {
                    found: "object without a file path".to_string(),
                }),
            },
            other => Err(ValidatorError::UnsupportedInputType {
                found: json_kind(&other).to_string(),
            }),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            XmlInput::Text(_) => "text",
            XmlInput::Stream(_) => "stream",
            XmlInput::Bytes(_) => "bytes",
            XmlInput::File(_) => "file",
        }
    }

    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            XmlInput::File(path) => Some(path),
            _ => None,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl fmt::Debug for XmlInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlInput::Text(text) => f.debug_tuple("Text").field(&text.len()).finish(),
            XmlInput::Stream(_) => f.write_str("Stream(..)"),
            XmlInput::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            XmlInput::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}

impl From<String> for XmlInput {
    fn from(text: String) -> Self {
        XmlInput::Text(text)
    }
}

impl From<&str> for XmlInput {
    fn from(text: &str) -> Self {
        XmlInput::Text(text.to_string())
    }
}

impl From<Vec<u8>> for XmlInput {
    fn from(bytes: Vec<u8>) -> Self {
        XmlInput::Bytes(bytes)
    }
}

impl From<&[u8]> for XmlInput {
    fn from(bytes: &[u8]) -> Self {
        XmlInput::Bytes(bytes.to_vec())
    }
}
