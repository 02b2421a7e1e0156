//! The declarative manifest: a JSON file listing items of any kind.
//!
//! ```json
//! { "items": [ { "kind": "trapper", "hostid": "10084", "key": "app.hits", ... } ] }
//! ```
//!
//! Adopted identities and resolved defaults are written back to the same file.

use anyhow::{Context, Result, bail};
use itemsync_client::ItemApi;
use itemsync_engine::kinds::{
    Calculated, CalculatedFields, Dependent, DependentFields, External, HttpAgent, HttpFields,
    Internal, InternalFields, PolledFields, Simple, Snmp, SnmpFields, SnmpTrap, SnmpTrapFields,
    Trapper, TrapperFields, ZabbixAgent, ZabbixAgentActive,
};
use itemsync_engine::{EngineResult, ItemEngine, ItemKind, ReadOutcome, ReconcileAction};
use itemsync_model::{ItemConfig, ItemFlavor, ItemRecord};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// One manifest entry, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ManifestItem {
    Trapper(ItemRecord<TrapperFields>),
    Agent(ItemRecord<PolledFields>),
    AgentActive(ItemRecord<PolledFields>),
    Simple(ItemRecord<PolledFields>),
    Internal(ItemRecord<InternalFields>),
    External(ItemRecord<PolledFields>),
    Snmp(ItemRecord<SnmpFields>),
    #[serde(rename = "snmptrap")]
    SnmpTrap(ItemRecord<SnmpTrapFields>),
    Calculated(ItemRecord<CalculatedFields>),
    Dependent(ItemRecord<DependentFields>),
    Http(ItemRecord<HttpFields>),
}

/// Applies `$body` to the record inside any variant.
macro_rules! on_record {
    ($item:expr, $record:ident => $body:expr) => {
        match $item {
            ManifestItem::Trapper($record) => $body,
            ManifestItem::Agent($record) => $body,
            ManifestItem::AgentActive($record) => $body,
            ManifestItem::Simple($record) => $body,
            ManifestItem::Internal($record) => $body,
            ManifestItem::External($record) => $body,
            ManifestItem::Snmp($record) => $body,
            ManifestItem::SnmpTrap($record) => $body,
            ManifestItem::Calculated($record) => $body,
            ManifestItem::Dependent($record) => $body,
            ManifestItem::Http($record) => $body,
        }
    };
}

/// What to do with each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Apply,
    Refresh,
    Destroy,
}

/// What happened to one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Reconciled(ReconcileAction),
    Refreshed(ReadOutcome),
    Deleted,
    /// Refresh or destroy of a record that was never created.
    Skipped,
}

impl ManifestItem {
    pub fn kind(&self) -> &'static str {
        match self {
            ManifestItem::Trapper(_) => Trapper.name(),
            ManifestItem::Agent(_) => ZabbixAgent.name(),
            ManifestItem::AgentActive(_) => ZabbixAgentActive.name(),
            ManifestItem::Simple(_) => Simple.name(),
            ManifestItem::Internal(_) => Internal.name(),
            ManifestItem::External(_) => External.name(),
            ManifestItem::Snmp(_) => Snmp.name(),
            ManifestItem::SnmpTrap(_) => SnmpTrap.name(),
            ManifestItem::Calculated(_) => Calculated.name(),
            ManifestItem::Dependent(_) => Dependent.name(),
            ManifestItem::Http(_) => HttpAgent.name(),
        }
    }

    pub fn config(&self) -> &ItemConfig {
        on_record!(self, record => &record.config)
    }

    pub fn id(&self) -> Option<&str> {
        on_record!(self, record => record.id())
    }

    /// Prototype when the entry names a discovery rule.
    pub fn flavor(&self) -> ItemFlavor {
        on_record!(self, record => record.flavor())
    }

    pub fn validate(&self) -> itemsync_model::ModelResult<()> {
        on_record!(self, record => record.validate(record.flavor()))
    }

    /// Runs one operation against the remote API.
    pub async fn run(&mut self, api: Arc<dyn ItemApi>, operation: Operation) -> EngineResult<Outcome> {
        match self {
            ManifestItem::Trapper(record) => run_record(Trapper, record, api, operation).await,
            ManifestItem::Agent(record) => run_record(ZabbixAgent, record, api, operation).await,
            ManifestItem::AgentActive(record) => {
                run_record(ZabbixAgentActive, record, api, operation).await
            }
            ManifestItem::Simple(record) => run_record(Simple, record, api, operation).await,
            ManifestItem::Internal(record) => run_record(Internal, record, api, operation).await,
            ManifestItem::External(record) => run_record(External, record, api, operation).await,
            ManifestItem::Snmp(record) => run_record(Snmp, record, api, operation).await,
            ManifestItem::SnmpTrap(record) => run_record(SnmpTrap, record, api, operation).await,
            ManifestItem::Calculated(record) => {
                run_record(Calculated, record, api, operation).await
            }
            ManifestItem::Dependent(record) => run_record(Dependent, record, api, operation).await,
            ManifestItem::Http(record) => run_record(HttpAgent, record, api, operation).await,
        }
    }
}

async fn run_record<K: ItemKind>(
    kind: K,
    record: &mut ItemRecord<K::Fields>,
    api: Arc<dyn ItemApi>,
    operation: Operation,
) -> EngineResult<Outcome> {
    let engine = ItemEngine::with_flavor(kind, record.flavor(), api);
    match operation {
        Operation::Apply => engine.reconcile(record).await.map(Outcome::Reconciled),
        Operation::Refresh if record.is_created() => {
            engine.read(record).await.map(Outcome::Refreshed)
        }
        Operation::Destroy if record.is_created() => {
            engine.delete(record).await.map(|()| Outcome::Deleted)
        }
        Operation::Refresh | Operation::Destroy => Ok(Outcome::Skipped),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub items: Vec<ManifestItem>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse manifest {}", path.display()))
    }

    /// Writes the manifest through a temporary sibling file so a crash never
    /// leaves a truncated manifest behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut raw = serde_json::to_string_pretty(self)?;
        raw.push('\n');
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, raw).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to replace manifest {}", path.display()))?;
        Ok(())
    }

    /// Validates every entry and reports all failures at once.
    pub fn validate(&self) -> Result<()> {
        let errors: Vec<String> = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                item.validate()
                    .err()
                    .map(|e| format!("items[{i}] ({} {:?}): {e}", item.kind(), item.config().key))
            })
            .collect();

        if !errors.is_empty() {
            bail!("manifest is invalid:\n  {}", errors.join("\n  "));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> ManifestItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn parses_kind_tag() {
        let item = parse(json!({
            "kind": "snmptrap",
            "hostid": "10084",
            "key": "snmptrap.fallback",
            "name": "Unmatched traps",
            "valuetype": "log"
        }));
        assert!(matches!(item, ManifestItem::SnmpTrap(_)));
        assert_eq!(item.kind(), "snmptrap");
    }

    #[test]
    fn ruleid_makes_a_prototype() {
        let item = parse(json!({
            "kind": "agent",
            "hostid": "10084",
            "key": "vfs.fs.size[{#FSNAME},free]",
            "name": "Free space on {#FSNAME}",
            "valuetype": "unsigned",
            "ruleid": "31990"
        }));
        assert_eq!(item.flavor(), ItemFlavor::Prototype);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result = serde_json::from_value::<ManifestItem>(json!({
            "kind": "ipmi",
            "hostid": "1",
            "key": "k",
            "name": "n",
            "valuetype": "float"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn validate_collects_every_failure() {
        let manifest: Manifest = serde_json::from_value(json!({
            "items": [
                {"kind": "trapper", "hostid": "abc", "key": "a", "name": "A", "valuetype": "float"},
                {"kind": "trapper", "hostid": "1", "key": "b", "name": "B", "valuetype": "float"},
                {"kind": "internal", "hostid": "1", "key": " ", "name": "C", "valuetype": "float"}
            ]
        }))
        .unwrap();

        let message = manifest.validate().unwrap_err().to_string();
        assert!(message.contains("items[0]"));
        assert!(!message.contains("items[1]"));
        assert!(message.contains("items[2]"));
    }
}
