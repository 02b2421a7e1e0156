use itemsync_client::{RemoteItem, VariantWire};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// Strategy for one item kind (trapper, SNMP, HTTP agent, ...).
///
/// The lifecycle engine does everything shared by all kinds and calls into
/// the kind only at two points. A kind sees its own field struct and the
/// kind-specific section of the remote object, so it cannot touch identity,
/// key or host.
pub trait ItemKind: Send + Sync {
    /// Local fields specific to this kind.
    type Fields: Serialize + DeserializeOwned + Default + Clone + PartialEq + Debug + Send + Sync;

    /// Name of the kind in manifests and logs.
    fn name(&self) -> &'static str;

    /// Fills the kind-specific section after the shared object is built,
    /// before every create and update. Must set the item type.
    fn before_write(&self, fields: &Self::Fields, variant: &mut VariantWire);

    /// Called after the shared fields were populated, on every read,
    /// including the reads that follow create and update.
    fn after_read(&self, fields: &mut Self::Fields, remote: &RemoteItem) {
        let _ = (fields, remote);
    }
}
