//! Remote side of itemsync: the Zabbix JSON-RPC API.
//!
//! - [`ItemApi`]: the surface the lifecycle engine consumes (create, update,
//!   get, delete-by-ids per flavor, plus the server API version)
//! - [`ZabbixClient`]: the HTTP implementation of [`ItemApi`]
//! - [`RemoteItem`]: the wire representation of an item or prototype
//! - [`ClientConfig`]: endpoint, credentials and transport switches
//!
//! The client performs no retries and keeps no cache. Every call either
//! completes or surfaces its error to the caller.

pub mod api;
pub mod config;
mod error;
pub mod version;
pub mod wire;
pub mod zabbix;

pub use api::{ItemApi, ItemQuery, endpoint};
pub use config::{ClientConfig, Credentials};
pub use error::{ClientError, ClientResult};
pub use version::parse_api_version;
pub use wire::{DiscoveryRuleRef, ItemType, RemoteItem, VariantWire, WirePreprocessor, WireTag};
pub use zabbix::{APPLICATIONS_REMOVED_IN, ZabbixClient};
