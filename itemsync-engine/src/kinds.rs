//! Concrete item kinds.
//!
//! Each kind is a unit struct with its own field struct. Field defaults match
//! what the server assumes when the field is left out.

use crate::hooks::ItemKind;
use itemsync_client::{ItemType, RemoteItem, VariantWire};
use serde::{Deserialize, Serialize};

/// Polling interval used when a declaration does not set one.
pub const DEFAULT_DELAY: &str = "1m";

/// Interface id meaning "no interface".
pub const NO_INTERFACE: &str = "0";

fn default_delay() -> String {
    DEFAULT_DELAY.to_string()
}

fn no_interface() -> String {
    NO_INTERFACE.to_string()
}

/// Overwrites `target` with the remote value, if the server sent one.
fn adopt(target: &mut String, source: &Option<String>) {
    if let Some(value) = source {
        target.clone_from(value);
    }
}

// ── Field structs ───────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrapperFields {
    /// Comma separated hosts allowed to send values. Empty allows any.
    pub trapper_hosts: String,
}

/// Interval plus interface, shared by the agent, simple and external kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolledFields {
    pub delay: String,
    #[serde(rename = "interfaceid")]
    pub interface_id: String,
}

impl Default for PolledFields {
    fn default() -> Self {
        Self {
            delay: default_delay(),
            interface_id: no_interface(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InternalFields {
    pub delay: String,
}

impl Default for InternalFields {
    fn default() -> Self {
        Self {
            delay: default_delay(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnmpFields {
    pub delay: String,
    #[serde(rename = "interfaceid")]
    pub interface_id: String,
    pub snmp_oid: String,
}

impl Default for SnmpFields {
    fn default() -> Self {
        Self {
            delay: default_delay(),
            interface_id: no_interface(),
            snmp_oid: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnmpTrapFields {
    #[serde(rename = "interfaceid")]
    pub interface_id: String,
}

impl Default for SnmpTrapFields {
    fn default() -> Self {
        Self {
            interface_id: no_interface(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatedFields {
    pub delay: String,
    /// Expression evaluated by the server. Sent as `params`.
    pub formula: String,
}

impl Default for CalculatedFields {
    fn default() -> Self {
        Self {
            delay: default_delay(),
            formula: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependentFields {
    #[serde(rename = "master_itemid")]
    pub master_item_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpFields {
    pub delay: String,
    #[serde(rename = "interfaceid")]
    pub interface_id: String,
    pub url: String,
    /// Server code: 0 GET, 1 POST, 2 PUT, 3 HEAD.
    pub request_method: String,
    pub timeout: String,
    /// Comma separated list or ranges of accepted status codes.
    pub status_codes: String,
}

impl Default for HttpFields {
    fn default() -> Self {
        Self {
            delay: default_delay(),
            interface_id: no_interface(),
            url: String::new(),
            request_method: "0".to_string(),
            timeout: "3s".to_string(),
            status_codes: "200".to_string(),
        }
    }
}

fn write_polled(item_type: ItemType, fields: &PolledFields, variant: &mut VariantWire) {
    variant.item_type = Some(item_type);
    variant.delay = Some(fields.delay.clone());
    variant.interface_id = Some(fields.interface_id.clone());
}

fn read_polled(fields: &mut PolledFields, remote: &RemoteItem) {
    adopt(&mut fields.delay, &remote.variant.delay);
    adopt(&mut fields.interface_id, &remote.variant.interface_id);
}

// ── Kinds ───────────────────────────────────────────────────────

/// Values pushed by senders.
#[derive(Debug, Clone, Copy, Default)]
pub struct Trapper;

impl ItemKind for Trapper {
    type Fields = TrapperFields;

    fn name(&self) -> &'static str {
        "trapper"
    }

    fn before_write(&self, fields: &TrapperFields, variant: &mut VariantWire) {
        variant.item_type = Some(ItemType::Trapper);
        variant.trapper_hosts = Some(fields.trapper_hosts.clone());
    }

    fn after_read(&self, fields: &mut TrapperFields, remote: &RemoteItem) {
        adopt(&mut fields.trapper_hosts, &remote.variant.trapper_hosts);
    }
}

/// Passive agent check, polled by the server.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZabbixAgent;

impl ItemKind for ZabbixAgent {
    type Fields = PolledFields;

    fn name(&self) -> &'static str {
        "agent"
    }

    fn before_write(&self, fields: &PolledFields, variant: &mut VariantWire) {
        write_polled(ItemType::ZabbixAgent, fields, variant);
    }

    fn after_read(&self, fields: &mut PolledFields, remote: &RemoteItem) {
        read_polled(fields, remote);
    }
}

/// Active agent check, pushed by the agent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZabbixAgentActive;

impl ItemKind for ZabbixAgentActive {
    type Fields = PolledFields;

    fn name(&self) -> &'static str {
        "agent_active"
    }

    fn before_write(&self, fields: &PolledFields, variant: &mut VariantWire) {
        write_polled(ItemType::ZabbixAgentActive, fields, variant);
    }

    fn after_read(&self, fields: &mut PolledFields, remote: &RemoteItem) {
        read_polled(fields, remote);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Simple;

impl ItemKind for Simple {
    type Fields = PolledFields;

    fn name(&self) -> &'static str {
        "simple"
    }

    fn before_write(&self, fields: &PolledFields, variant: &mut VariantWire) {
        write_polled(ItemType::Simple, fields, variant);
    }

    fn after_read(&self, fields: &mut PolledFields, remote: &RemoteItem) {
        read_polled(fields, remote);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Internal;

impl ItemKind for Internal {
    type Fields = InternalFields;

    fn name(&self) -> &'static str {
        "internal"
    }

    fn before_write(&self, fields: &InternalFields, variant: &mut VariantWire) {
        variant.item_type = Some(ItemType::Internal);
        variant.delay = Some(fields.delay.clone());
    }

    fn after_read(&self, fields: &mut InternalFields, remote: &RemoteItem) {
        adopt(&mut fields.delay, &remote.variant.delay);
    }
}

/// Script run by the server.
#[derive(Debug, Clone, Copy, Default)]
pub struct External;

impl ItemKind for External {
    type Fields = PolledFields;

    fn name(&self) -> &'static str {
        "external"
    }

    fn before_write(&self, fields: &PolledFields, variant: &mut VariantWire) {
        write_polled(ItemType::External, fields, variant);
    }

    fn after_read(&self, fields: &mut PolledFields, remote: &RemoteItem) {
        read_polled(fields, remote);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Snmp;

impl ItemKind for Snmp {
    type Fields = SnmpFields;

    fn name(&self) -> &'static str {
        "snmp"
    }

    fn before_write(&self, fields: &SnmpFields, variant: &mut VariantWire) {
        variant.item_type = Some(ItemType::Snmp);
        variant.delay = Some(fields.delay.clone());
        variant.interface_id = Some(fields.interface_id.clone());
        variant.snmp_oid = Some(fields.snmp_oid.clone());
    }

    fn after_read(&self, fields: &mut SnmpFields, remote: &RemoteItem) {
        adopt(&mut fields.delay, &remote.variant.delay);
        adopt(&mut fields.interface_id, &remote.variant.interface_id);
        adopt(&mut fields.snmp_oid, &remote.variant.snmp_oid);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SnmpTrap;

impl ItemKind for SnmpTrap {
    type Fields = SnmpTrapFields;

    fn name(&self) -> &'static str {
        "snmptrap"
    }

    fn before_write(&self, fields: &SnmpTrapFields, variant: &mut VariantWire) {
        variant.item_type = Some(ItemType::SnmpTrap);
        variant.interface_id = Some(fields.interface_id.clone());
    }

    fn after_read(&self, fields: &mut SnmpTrapFields, remote: &RemoteItem) {
        adopt(&mut fields.interface_id, &remote.variant.interface_id);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Calculated;

impl ItemKind for Calculated {
    type Fields = CalculatedFields;

    fn name(&self) -> &'static str {
        "calculated"
    }

    fn before_write(&self, fields: &CalculatedFields, variant: &mut VariantWire) {
        variant.item_type = Some(ItemType::Calculated);
        variant.delay = Some(fields.delay.clone());
        variant.params = Some(fields.formula.clone());
    }

    fn after_read(&self, fields: &mut CalculatedFields, remote: &RemoteItem) {
        adopt(&mut fields.delay, &remote.variant.delay);
        adopt(&mut fields.formula, &remote.variant.params);
    }
}

/// Derived from the value of a master item. Never polled on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dependent;

impl ItemKind for Dependent {
    type Fields = DependentFields;

    fn name(&self) -> &'static str {
        "dependent"
    }

    fn before_write(&self, fields: &DependentFields, variant: &mut VariantWire) {
        variant.item_type = Some(ItemType::Dependent);
        variant.master_item_id = Some(fields.master_item_id.clone());
        variant.delay = Some("0".to_string());
    }

    fn after_read(&self, fields: &mut DependentFields, remote: &RemoteItem) {
        adopt(&mut fields.master_item_id, &remote.variant.master_item_id);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HttpAgent;

impl ItemKind for HttpAgent {
    type Fields = HttpFields;

    fn name(&self) -> &'static str {
        "http"
    }

    fn before_write(&self, fields: &HttpFields, variant: &mut VariantWire) {
        variant.item_type = Some(ItemType::HttpAgent);
        variant.delay = Some(fields.delay.clone());
        variant.interface_id = Some(fields.interface_id.clone());
        variant.url = Some(fields.url.clone());
        variant.request_method = Some(fields.request_method.clone());
        variant.timeout = Some(fields.timeout.clone());
        variant.status_codes = Some(fields.status_codes.clone());
    }

    fn after_read(&self, fields: &mut HttpFields, remote: &RemoteItem) {
        let variant = &remote.variant;
        adopt(&mut fields.delay, &variant.delay);
        adopt(&mut fields.interface_id, &variant.interface_id);
        adopt(&mut fields.url, &variant.url);
        adopt(&mut fields.request_method, &variant.request_method);
        adopt(&mut fields.timeout, &variant.timeout);
        adopt(&mut fields.status_codes, &variant.status_codes);
    }
}
