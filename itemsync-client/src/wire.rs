//! Wire representation of items and item prototypes.
//!
//! Field names follow the server's object model (`key_`, `hostid`,
//! `preprocessing`, `discoveryRule`, ...). The server encodes numbers as
//! strings and is inconsistent about a few nested shapes, so decoding here is
//! lenient where the server is.

use itemsync_model::ValueType;
use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Remote item type code. Selects how the server collects values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    ZabbixAgent,
    Trapper,
    Simple,
    Internal,
    ZabbixAgentActive,
    External,
    Calculated,
    SnmpTrap,
    Dependent,
    HttpAgent,
    Snmp,
}

impl ItemType {
    pub const ALL: [ItemType; 11] = [
        ItemType::ZabbixAgent,
        ItemType::Trapper,
        ItemType::Simple,
        ItemType::Internal,
        ItemType::ZabbixAgentActive,
        ItemType::External,
        ItemType::Calculated,
        ItemType::SnmpTrap,
        ItemType::Dependent,
        ItemType::HttpAgent,
        ItemType::Snmp,
    ];

    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            ItemType::ZabbixAgent => 0,
            ItemType::Trapper => 2,
            ItemType::Simple => 3,
            ItemType::Internal => 5,
            ItemType::ZabbixAgentActive => 7,
            ItemType::External => 10,
            ItemType::Calculated => 15,
            ItemType::SnmpTrap => 17,
            ItemType::Dependent => 18,
            ItemType::HttpAgent => 19,
            ItemType::Snmp => 20,
        }
    }

    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        ItemType::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl Serialize for ItemType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code().to_string())
    }
}

impl<'de> Deserialize<'de> for ItemType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = NumericString::deserialize(deserializer)?
            .parse::<u16>()
            .map_err(D::Error::custom)?;
        ItemType::from_code(code)
            .ok_or_else(|| D::Error::custom(format!("unknown item type code {code}")))
    }
}

/// An item or item prototype as the server sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteItem {
    #[serde(rename = "itemid", default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(rename = "hostid")]
    pub host_id: String,
    #[serde(rename = "key_")]
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub history: String,
    #[serde(default)]
    pub trends: String,
    #[serde(with = "value_type_code")]
    pub value_type: ValueType,
    /// Always sent, so an empty list clears the remote pipeline.
    #[serde(rename = "preprocessing", default)]
    pub preprocessors: Vec<WirePreprocessor>,
    /// `None` leaves the parameter out, which servers from 5.4 require.
    /// `Some` of an empty list unlinks every application on older servers.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "applications::deserialize"
    )]
    pub applications: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Vec<WireTag>,
    /// Discovery rule a prototype is created under. Write-only.
    #[serde(rename = "ruleid", default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    /// Discovery rule echoed back on reads of prototypes.
    #[serde(
        rename = "discoveryRule",
        default,
        skip_serializing,
        deserialize_with = "discovery_rule::deserialize"
    )]
    pub discovery_rule: Option<DiscoveryRuleRef>,
    /// Kind-specific fields. Only the variant hooks write these.
    #[serde(flatten)]
    pub variant: VariantWire,
}

impl RemoteItem {
    /// An item with only the identifying fields set.
    pub fn new(
        host_id: impl Into<String>,
        key: impl Into<String>,
        name: impl Into<String>,
        value_type: ValueType,
    ) -> Self {
        Self {
            item_id: None,
            host_id: host_id.into(),
            key: key.into(),
            name: name.into(),
            description: String::new(),
            history: String::new(),
            trends: String::new(),
            value_type,
            preprocessors: Vec::new(),
            applications: None,
            tags: Vec::new(),
            rule_id: None,
            discovery_rule: None,
            variant: VariantWire::default(),
        }
    }
}

/// Kind-specific part of the remote object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantWire {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<String>,
    #[serde(rename = "interfaceid", default, skip_serializing_if = "Option::is_none")]
    pub interface_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snmp_oid: Option<String>,
    /// Formula of calculated items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
    #[serde(rename = "master_itemid", default, skip_serializing_if = "Option::is_none")]
    pub master_item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trapper_hosts: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_codes: Option<String>,
}

/// Preprocessing step on the wire: parameters are one separator-joined string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePreprocessor {
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub step_type: String,
    #[serde(default)]
    pub params: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub error_handler: String,
    #[serde(default)]
    pub error_handler_params: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTag {
    pub tag: String,
    #[serde(default)]
    pub value: String,
}

/// Reference to the discovery rule that owns a prototype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryRuleRef {
    #[serde(rename = "itemid")]
    pub item_id: String,
}

// ── Lenient decoding helpers ─────────────────────────────────────

/// A number the server may send either as a JSON string or a JSON number.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumericString {
    Text(String),
    Number(u64),
}

impl NumericString {
    fn into_string(self) -> String {
        match self {
            NumericString::Text(s) => s,
            NumericString::Number(n) => n.to_string(),
        }
    }

    fn parse<T>(self) -> Result<T, String>
    where
        T: std::str::FromStr,
        T::Err: fmt::Display,
    {
        let raw = self.into_string();
        raw.trim()
            .parse()
            .map_err(|e| format!("invalid number {raw:?}: {e}"))
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(NumericString::deserialize(deserializer)?.into_string())
}

mod value_type_code {
    use super::NumericString;
    use itemsync_model::ValueType;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &ValueType, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.code().to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ValueType, D::Error> {
        let code = NumericString::deserialize(deserializer)?
            .parse::<u8>()
            .map_err(D::Error::custom)?;
        ValueType::from_code(code)
            .ok_or_else(|| D::Error::custom(format!("unknown value type code {code}")))
    }
}

mod applications {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ApplicationEntry {
        Id(String),
        Object { applicationid: String },
    }

    /// Accepts bare ids or the `{applicationid, ...}` objects an expanded read returns.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<String>>, D::Error> {
        let entries = Vec::<ApplicationEntry>::deserialize(deserializer)?;
        Ok(Some(entries
            .into_iter()
            .map(|entry| match entry {
                ApplicationEntry::Id(id) => id,
                ApplicationEntry::Object { applicationid } => applicationid,
            })
            .collect()))
    }
}

mod discovery_rule {
    use super::DiscoveryRuleRef;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RuleField {
        Rule(DiscoveryRuleRef),
        Empty(Vec<serde_json::Value>),
        Null(()),
    }

    /// The server sends an object, or an empty array when there is no rule.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DiscoveryRuleRef>, D::Error> {
        Ok(match RuleField::deserialize(deserializer)? {
            RuleField::Rule(rule) => Some(rule),
            RuleField::Empty(_) | RuleField::Null(()) => None,
        })
    }
}
