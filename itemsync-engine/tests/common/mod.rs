//! In-memory stand-in for the remote item API.

#![allow(dead_code)]

use async_trait::async_trait;
use itemsync_client::{
    APPLICATIONS_REMOVED_IN, ClientError, ClientResult, DiscoveryRuleRef, ItemApi, ItemQuery,
    RemoteItem, endpoint,
};
use itemsync_model::{ItemConfig, ItemFlavor, ItemRecord, ValueType};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

const NOT_FOUND: &str = "No permissions to referred object or it does not exist!";

struct Stored {
    flavor: ItemFlavor,
    item: RemoteItem,
}

#[derive(Default)]
struct State {
    items: BTreeMap<String, Stored>,
    next_id: u64,
    calls: Vec<String>,
    writes: Vec<RemoteItem>,
    queries: Vec<ItemQuery>,
    create_ids: Option<Vec<String>>,
    duplicate_reads: bool,
    failing: Vec<String>,
}

/// Keeps items in a map keyed by id. Reads return tags and applications in
/// reverse order to exercise set semantics.
pub struct MemoryApi {
    version: u32,
    state: Mutex<State>,
}

impl MemoryApi {
    pub fn new(version: u32) -> Arc<Self> {
        Arc::new(Self {
            version,
            state: Mutex::new(State {
                next_id: 1000,
                ..Default::default()
            }),
        })
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Stores an object as if someone else had created it.
    pub fn insert(&self, flavor: ItemFlavor, mut item: RemoteItem) -> String {
        let mut state = self.state();
        state.next_id += 1;
        let id = state.next_id.to_string();
        item.item_id = Some(id.clone());
        state.items.insert(id.clone(), Stored { flavor, item });
        id
    }

    pub fn stored(&self, id: &str) -> Option<RemoteItem> {
        self.state().items.get(id).map(|s| s.item.clone())
    }

    /// Changes a stored object behind the engine's back.
    pub fn modify(&self, id: &str, change: impl FnOnce(&mut RemoteItem)) {
        if let Some(stored) = self.state().items.get_mut(id) {
            change(&mut stored.item);
        }
    }

    pub fn remove(&self, id: &str) {
        self.state().items.remove(id);
    }

    /// Deletes a discovery rule together with its prototypes.
    pub fn remove_rule(&self, rule_id: &str) {
        self.state()
            .items
            .retain(|_, s| s.item.rule_id.as_deref() != Some(rule_id));
    }

    pub fn len(&self) -> usize {
        self.state().items.len()
    }

    /// Methods called so far, e.g. `item.create`.
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    /// Objects received by create and update, in order.
    pub fn writes(&self) -> Vec<RemoteItem> {
        self.state().writes.clone()
    }

    pub fn last_write(&self) -> RemoteItem {
        self.state().writes.last().cloned().unwrap()
    }

    pub fn queries(&self) -> Vec<ItemQuery> {
        self.state().queries.clone()
    }

    /// Makes create answer with these ids instead of assigning one.
    pub fn answer_create_with(&self, ids: &[&str]) {
        self.state().create_ids = Some(ids.iter().map(|s| s.to_string()).collect());
    }

    /// Makes every read return each match twice.
    pub fn duplicate_reads(&self) {
        self.state().duplicate_reads = true;
    }

    /// Makes calls of `method` (e.g. `item.update`) fail with an API error.
    pub fn fail_on(&self, method: &str) {
        self.state().failing.push(method.to_string());
    }

    fn enter(&self, state: &mut State, flavor: ItemFlavor, op: &str) -> ClientResult<()> {
        let method = format!("{}.{}", endpoint(flavor), op);
        state.calls.push(method.clone());
        if state.failing.contains(&method) {
            return Err(ClientError::Api {
                code: -32500,
                message: "Application error.".into(),
                data: format!("{method} rejected"),
            });
        }
        Ok(())
    }
}

fn not_found() -> ClientError {
    ClientError::Api {
        code: -32602,
        message: "Invalid params.".into(),
        data: NOT_FOUND.into(),
    }
}

#[async_trait]
impl ItemApi for MemoryApi {
    fn api_version(&self) -> u32 {
        self.version
    }

    async fn create_items(
        &self,
        flavor: ItemFlavor,
        items: &[RemoteItem],
    ) -> ClientResult<Vec<String>> {
        let mut state = self.state();
        self.enter(&mut state, flavor, "create")?;
        state.writes.extend(items.iter().cloned());

        if let Some(ids) = state.create_ids.take() {
            return Ok(ids);
        }

        let mut ids = Vec::new();
        for item in items {
            state.next_id += 1;
            let id = state.next_id.to_string();
            let mut item = item.clone();
            item.item_id = Some(id.clone());
            state.items.insert(id.clone(), Stored { flavor, item });
            ids.push(id);
        }
        Ok(ids)
    }

    async fn update_items(&self, flavor: ItemFlavor, items: &[RemoteItem]) -> ClientResult<()> {
        let mut state = self.state();
        self.enter(&mut state, flavor, "update")?;
        state.writes.extend(items.iter().cloned());

        for item in items {
            let id = item.item_id.clone().ok_or_else(not_found)?;
            let stored = state.items.get_mut(&id).ok_or_else(not_found)?;
            let rule_id = stored.item.rule_id.clone();
            let applications = stored.item.applications.take();
            stored.item = item.clone();
            stored.item.rule_id = rule_id;
            if stored.item.applications.is_none() {
                stored.item.applications = applications;
            }
        }
        Ok(())
    }

    async fn get_items(
        &self,
        flavor: ItemFlavor,
        query: &ItemQuery,
    ) -> ClientResult<Vec<RemoteItem>> {
        let mut state = self.state();
        self.enter(&mut state, flavor, "get")?;
        state.queries.push(query.clone());

        let mut found = Vec::new();
        for id in &query.item_ids {
            let Some(stored) = state.items.get(id) else {
                continue;
            };
            if stored.flavor != flavor {
                continue;
            }
            let mut item = stored.item.clone();
            item.tags.reverse();
            if let Some(applications) = item.applications.as_mut() {
                applications.reverse();
            }
            if self.version >= APPLICATIONS_REMOVED_IN {
                item.applications = None;
            }
            if query.select_discovery_rule {
                item.discovery_rule = item
                    .rule_id
                    .clone()
                    .map(|item_id| DiscoveryRuleRef { item_id });
            }
            item.rule_id = None;
            found.push(item);
        }

        if state.duplicate_reads {
            found = found.into_iter().flat_map(|i| [i.clone(), i]).collect();
        }
        Ok(found)
    }

    async fn delete_items(&self, flavor: ItemFlavor, ids: &[String]) -> ClientResult<()> {
        let mut state = self.state();
        self.enter(&mut state, flavor, "delete")?;
        for id in ids {
            state.items.remove(id).ok_or_else(not_found)?;
        }
        Ok(())
    }
}

/// A float item on host 10105.
pub fn cpu_config() -> ItemConfig {
    ItemConfig::new("10105", "system.cpu.load", "CPU load", ValueType::Float)
}

pub fn record<F: Default>(config: ItemConfig) -> ItemRecord<F> {
    ItemRecord::new(config, F::default())
}
