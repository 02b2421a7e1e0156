//! Declarative item model for itemsync.
//!
//! Defines the local, plugin-agnostic shape of a monitoring item:
//! - [`ValueType`]: the closed set of value types and their wire codes
//! - [`PreprocessingStep`]: one stage of the ordered preprocessing pipeline
//! - [`Tag`] and [`UnorderedSet`]: unordered tag / application associations
//! - [`ItemConfig`]: the fields every item kind shares
//! - [`ItemRecord`]: identity + shared config + per-kind fields
//!
//! Nothing here talks to the remote server. The client crate owns the wire
//! representation and the engine crate converts between the two.

mod error;
mod item;
mod preprocessing;
mod set;
mod tag;
mod value_type;

pub use error::{ModelError, ModelResult};
pub use item::{DEFAULT_HISTORY, ItemConfig, ItemFlavor, ItemRecord, MAX_DESCRIPTION_LEN};
pub use preprocessing::{PARAM_SEPARATOR, PreprocessingStep};
pub use set::UnorderedSet;
pub use tag::{Tag, TagSet};
pub use value_type::ValueType;

/// Set of application ids an item is associated with.
pub type ApplicationSet = UnorderedSet<String>;
