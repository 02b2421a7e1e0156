//! Minimal in-memory item API for command tests.

#![allow(dead_code)]

use async_trait::async_trait;
use itemsync_client::{
    ClientError, ClientResult, DiscoveryRuleRef, ItemApi, ItemQuery, RemoteItem,
};
use itemsync_model::ItemFlavor;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeApi {
    items: Mutex<HashMap<String, RemoteItem>>,
    next_id: Mutex<u64>,
    /// Keys whose create is rejected.
    reject_keys: Vec<String>,
}

impl FakeApi {
    pub fn rejecting(keys: &[&str]) -> Self {
        Self {
            reject_keys: keys.iter().map(|k| k.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn count(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn get(&self, id: &str) -> Option<RemoteItem> {
        self.items.lock().unwrap().get(id).cloned()
    }

    pub fn remove(&self, id: &str) {
        self.items.lock().unwrap().remove(id);
    }
}

#[async_trait]
impl ItemApi for FakeApi {
    fn api_version(&self) -> u32 {
        60000
    }

    async fn create_items(&self, _: ItemFlavor, items: &[RemoteItem]) -> ClientResult<Vec<String>> {
        let mut ids = Vec::new();
        for item in items {
            if self.reject_keys.contains(&item.key) {
                return Err(ClientError::Api {
                    code: -32602,
                    message: "Invalid params.".into(),
                    data: format!("Item with key \"{}\" already exists.", item.key),
                });
            }
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let id = (20000 + *next).to_string();
            let mut stored = item.clone();
            stored.item_id = Some(id.clone());
            self.items.lock().unwrap().insert(id.clone(), stored);
            ids.push(id);
        }
        Ok(ids)
    }

    async fn update_items(&self, _: ItemFlavor, items: &[RemoteItem]) -> ClientResult<()> {
        let mut stored = self.items.lock().unwrap();
        for item in items {
            if let Some(id) = &item.item_id {
                stored.insert(id.clone(), item.clone());
            }
        }
        Ok(())
    }

    async fn get_items(&self, _: ItemFlavor, query: &ItemQuery) -> ClientResult<Vec<RemoteItem>> {
        let stored = self.items.lock().unwrap();
        Ok(query
            .item_ids
            .iter()
            .filter_map(|id| stored.get(id).cloned())
            .map(|mut item| {
                if query.select_discovery_rule {
                    item.discovery_rule = item.rule_id.take().map(|item_id| DiscoveryRuleRef { item_id });
                }
                item
            })
            .collect())
    }

    async fn delete_items(&self, _: ItemFlavor, ids: &[String]) -> ClientResult<()> {
        let mut stored = self.items.lock().unwrap();
        for id in ids {
            stored.remove(id);
        }
        Ok(())
    }
}
