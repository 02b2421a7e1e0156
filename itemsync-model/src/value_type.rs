//! Item value types and their numeric wire codes.

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of value an item stores.
///
/// Locally the value type is written as a lowercase tag (`"float"`,
/// `"text"`, ...). The remote server identifies it by a small integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Float,
    Character,
    Log,
    Unsigned,
    Text,
}

impl ValueType {
    /// Every value type, in wire-code order.
    pub const ALL: [ValueType; 5] = [
        ValueType::Float,
        ValueType::Character,
        ValueType::Log,
        ValueType::Unsigned,
        ValueType::Text,
    ];

    /// Returns the remote code for this value type.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            ValueType::Float => 0,
            ValueType::Character => 1,
            ValueType::Log => 2,
            ValueType::Unsigned => 3,
            ValueType::Text => 4,
        }
    }

    /// Maps a remote code back to a value type.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ValueType::Float),
            1 => Some(ValueType::Character),
            2 => Some(ValueType::Log),
            3 => Some(ValueType::Unsigned),
            4 => Some(ValueType::Text),
            _ => None,
        }
    }

    /// Returns the local tag for this value type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ValueType::Float => "float",
            ValueType::Character => "character",
            ValueType::Log => "log",
            ValueType::Unsigned => "unsigned",
            ValueType::Text => "text",
        }
    }

    /// True for the free-form value types the server cannot aggregate.
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(self, ValueType::Log | ValueType::Text)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        ValueType::ALL
            .into_iter()
            .find(|vt| vt.as_str() == s)
            .ok_or_else(|| ModelError::UnknownValueType(s.to_string()))
    }
}
