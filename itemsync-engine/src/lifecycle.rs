//! Create, read, update and delete for any item kind.
//!
//! An [`ItemEngine`] is bound to one kind and one flavor. Each operation
//! takes the record by `&mut`, so a record can only have one operation in
//! flight. Distinct records may share an engine and run concurrently.

use crate::builder::build_remote_item;
use crate::codec::{decode_applications, decode_preprocessing, decode_tags};
use crate::error::{EngineError, EngineResult};
use crate::hooks::ItemKind;
use itemsync_client::{ItemApi, ItemQuery, RemoteItem};
use itemsync_model::{ItemFlavor, ItemRecord};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Result of a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The object exists and the record was refreshed from it.
    Present,
    /// The object no longer exists; the record's identity was cleared.
    Vanished,
}

/// What [`ItemEngine::reconcile`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    Created,
    Updated,
    /// The record had an identity but the object was gone, so it was created again.
    Recreated,
}

pub struct ItemEngine<K: ItemKind> {
    kind: K,
    flavor: ItemFlavor,
    api: Arc<dyn ItemApi>,
}

impl<K: ItemKind> ItemEngine<K> {
    /// An engine for plain items.
    pub fn new(kind: K, api: Arc<dyn ItemApi>) -> Self {
        Self::with_flavor(kind, ItemFlavor::Item, api)
    }

    /// An engine for item prototypes.
    pub fn prototype(kind: K, api: Arc<dyn ItemApi>) -> Self {
        Self::with_flavor(kind, ItemFlavor::Prototype, api)
    }

    pub fn with_flavor(kind: K, flavor: ItemFlavor, api: Arc<dyn ItemApi>) -> Self {
        Self { kind, flavor, api }
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn flavor(&self) -> ItemFlavor {
        self.flavor
    }

    /// Creates the remote object and refreshes the record from it.
    ///
    /// The new identity is stored in the record as soon as the server returns
    /// it, so a failing read-back still leaves the record pointing at the
    /// created object.
    pub async fn create(&self, record: &mut ItemRecord<K::Fields>) -> EngineResult<()> {
        if let Some(id) = record.id() {
            return Err(EngineError::AlreadyCreated(id.to_string()));
        }

        let item = self.build(record);
        let ids = self
            .api
            .create_items(self.flavor, std::slice::from_ref(&item))
            .await?;
        let id = match <[String; 1]>::try_from(ids) {
            Ok([id]) => id,
            Err(ids) => {
                return Err(EngineError::AmbiguousMatch {
                    operation: "create",
                    found: ids.len(),
                });
            }
        };

        info!("Created {} {} ({})", self.kind.name(), self.flavor, id);
        record.id = Some(id);

        if self.read(record).await? == ReadOutcome::Vanished {
            warn!("{} {} vanished right after create", self.kind.name(), self.flavor);
        }
        Ok(())
    }

    /// Replaces the remote object with the record and refreshes the record.
    ///
    /// A prototype cannot move to another discovery rule. If the declared
    /// rule differs from the one the server reports, nothing is written and
    /// [`EngineError::RuleChanged`] is returned.
    pub async fn update(&self, record: &mut ItemRecord<K::Fields>) -> EngineResult<()> {
        let id = record.id().ok_or(EngineError::MissingIdentity)?.to_string();
        if self.flavor.is_prototype()
            && let Some(remote) = self.fetch(&id).await?
        {
            ensure_same_rule(record, &remote)?;
        }
        self.write_update(record, id).await
    }

    /// Refreshes every field of the record from the remote object.
    ///
    /// A missing object is not an error: the identity is cleared and
    /// [`ReadOutcome::Vanished`] is returned. Defaults are never recomputed.
    pub async fn read(&self, record: &mut ItemRecord<K::Fields>) -> EngineResult<ReadOutcome> {
        let id = record.id().ok_or(EngineError::MissingIdentity)?.to_string();
        let Some(remote) = self.fetch(&id).await? else {
            warn!("{} {} no longer exists, clearing id", self.flavor, id);
            record.id = None;
            return Ok(ReadOutcome::Vanished);
        };

        self.populate(record, &remote);
        self.kind.after_read(&mut record.fields, &remote);
        Ok(ReadOutcome::Present)
    }

    /// Deletes the remote object and clears the record's identity.
    pub async fn delete(&self, record: &mut ItemRecord<K::Fields>) -> EngineResult<()> {
        let id = record.id().ok_or(EngineError::MissingIdentity)?.to_string();
        self.api
            .delete_items(self.flavor, std::slice::from_ref(&id))
            .await?;
        info!("Deleted {} {} ({})", self.kind.name(), self.flavor, id);
        record.id = None;
        Ok(())
    }

    /// Creates the object if the record has no identity or the object is
    /// gone, and otherwise replaces it with the declared state.
    ///
    /// The existence check does not touch the record, so local edits reach
    /// the server.
    pub async fn reconcile(
        &self,
        record: &mut ItemRecord<K::Fields>,
    ) -> EngineResult<ReconcileAction> {
        let Some(id) = record.id().map(str::to_string) else {
            self.create(record).await?;
            return Ok(ReconcileAction::Created);
        };

        match self.fetch(&id).await? {
            None => {
                warn!("{} {} no longer exists, creating it again", self.flavor, id);
                record.id = None;
                self.create(record).await?;
                Ok(ReconcileAction::Recreated)
            }
            Some(remote) => {
                if self.flavor.is_prototype() {
                    ensure_same_rule(record, &remote)?;
                }
                self.write_update(record, id).await?;
                Ok(ReconcileAction::Updated)
            }
        }
    }

    /// Looks up one object by id. `None` when it does not exist.
    async fn fetch(&self, id: &str) -> EngineResult<Option<RemoteItem>> {
        debug!("Lookup of {} {} with id {}", self.kind.name(), self.flavor, id);

        let mut query = ItemQuery::by_id(id);
        if self.flavor.is_prototype() {
            query = query.with_discovery_rule();
        }
        let mut items = self.api.get_items(self.flavor, &query).await?;

        match items.len() {
            0 => Ok(None),
            1 => {
                let remote = items.remove(0);
                trace!("Got {:?}", remote);
                Ok(Some(remote))
            }
            found => Err(EngineError::AmbiguousMatch {
                operation: "read",
                found,
            }),
        }
    }

    async fn write_update(&self, record: &mut ItemRecord<K::Fields>, id: String) -> EngineResult<()> {
        let mut item = self.build(record);
        item.item_id = Some(id.clone());
        self.api
            .update_items(self.flavor, std::slice::from_ref(&item))
            .await?;
        debug!("Updated {} {} ({})", self.kind.name(), self.flavor, id);

        self.read(record).await?;
        Ok(())
    }

    fn build(&self, record: &mut ItemRecord<K::Fields>) -> RemoteItem {
        let mut item = build_remote_item(record, self.flavor, self.api.api_version());
        self.kind.before_write(&record.fields, &mut item.variant);
        trace!("Prepared {} for write: {:?}", self.flavor, item);
        item
    }

    fn populate(&self, record: &mut ItemRecord<K::Fields>, remote: &RemoteItem) {
        if let Some(id) = &remote.item_id {
            record.id = Some(id.clone());
        }

        let config = &mut record.config;
        config.host_id.clone_from(&remote.host_id);
        config.key.clone_from(&remote.key);
        config.name.clone_from(&remote.name);
        config.description.clone_from(&remote.description);
        config.history.clone_from(&remote.history);
        config.trends = Some(remote.trends.clone());
        config.value_type = remote.value_type;
        config.preprocessors = decode_preprocessing(&remote.preprocessors);
        config.applications =
            decode_applications(remote.applications.as_deref().unwrap_or_default());
        config.tags = decode_tags(&remote.tags);

        if self.flavor.is_prototype()
            && let Some(rule) = &remote.discovery_rule
        {
            record.rule_id = Some(rule.item_id.clone());
        }
    }
}

/// Fails if a prototype's declared rule differs from the server's.
fn ensure_same_rule<F>(record: &ItemRecord<F>, remote: &RemoteItem) -> EngineResult<()> {
    let Some(current) = &remote.discovery_rule else {
        return Ok(());
    };
    let declared = record.rule_id.as_deref().unwrap_or_default();
    if declared != current.item_id {
        return Err(EngineError::RuleChanged {
            declared: declared.to_string(),
            current: current.item_id.clone(),
        });
    }
    Ok(())
}
