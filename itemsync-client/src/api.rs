//! The remote item API consumed by the lifecycle engine.

use crate::error::ClientResult;
use crate::wire::RemoteItem;
use async_trait::async_trait;
use itemsync_model::ItemFlavor;

/// Returns the API object name serving a flavor (`item` or `itemprototype`).
pub const fn endpoint(flavor: ItemFlavor) -> &'static str {
    match flavor {
        ItemFlavor::Item => "item",
        ItemFlavor::Prototype => "itemprototype",
    }
}

/// Parameters of an item lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemQuery {
    pub item_ids: Vec<String>,
    pub select_preprocessing: bool,
    pub select_applications: bool,
    pub select_tags: bool,
    pub select_discovery_rule: bool,
}

impl ItemQuery {
    /// Looks up one identifier with preprocessing, applications and tags expanded.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            item_ids: vec![id.into()],
            select_preprocessing: true,
            select_applications: true,
            select_tags: true,
            select_discovery_rule: false,
        }
    }

    /// Also expands the owning discovery rule.
    pub fn with_discovery_rule(mut self) -> Self {
        self.select_discovery_rule = true;
        self
    }
}

/// Remote operations on items and item prototypes.
///
/// Every method is one round trip. Implementations must not retry; a failure
/// is returned to the caller as is.
#[async_trait]
pub trait ItemApi: Send + Sync {
    /// Integer API version of the server (`major * 10000 + minor * 100 + patch`).
    fn api_version(&self) -> u32;

    /// Creates the batch and returns the new identifiers in submission order.
    async fn create_items(&self, flavor: ItemFlavor, items: &[RemoteItem])
    -> ClientResult<Vec<String>>;

    /// Replaces each object identified by its `item_id`.
    async fn update_items(&self, flavor: ItemFlavor, items: &[RemoteItem]) -> ClientResult<()>;

    async fn get_items(&self, flavor: ItemFlavor, query: &ItemQuery)
    -> ClientResult<Vec<RemoteItem>>;

    async fn delete_items(&self, flavor: ItemFlavor, ids: &[String]) -> ClientResult<()>;
}
