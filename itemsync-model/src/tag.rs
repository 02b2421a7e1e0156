//! Item tags.

use crate::set::UnorderedSet;
use serde::{Deserialize, Serialize};

/// A key/value label on an item. Set membership is decided by the pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// A tag with an empty value.
    pub fn bare(key: impl Into<String>) -> Self {
        Self::new(key, "")
    }
}

/// Unordered set of tags.
pub type TagSet = UnorderedSet<Tag>;
