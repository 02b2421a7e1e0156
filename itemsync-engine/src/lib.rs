//! Generic lifecycle engine for monitoring items.
//!
//! Turns local [`ItemRecord`](itemsync_model::ItemRecord)s into remote objects
//! and back. Everything shared by all item kinds lives here; a kind only
//! contributes its field struct and two hooks ([`ItemKind`]).

pub mod builder;
pub mod codec;
pub mod defaults;
mod error;
pub mod hooks;
pub mod kinds;
pub mod lifecycle;

pub use builder::build_remote_item;
pub use defaults::{
    DEFAULT_TRENDS, TRENDS_DISABLED, TRENDS_OPTIONAL_SINCE, default_trends, resolve_trends,
};
pub use error::{EngineError, EngineResult};
pub use hooks::ItemKind;
pub use lifecycle::{ItemEngine, ReadOutcome, ReconcileAction};
