//! Local record to remote object.

use crate::codec::{encode_applications, encode_preprocessing, encode_tags};
use crate::defaults::resolve_trends;
use itemsync_client::{APPLICATIONS_REMOVED_IN, RemoteItem};
use itemsync_model::{ItemFlavor, ItemRecord};

/// Builds the complete remote object for a record.
///
/// The preprocessing pipeline is rebuilt from the full local list on every
/// call. Trends are resolved against `api_version` and the resolved value is
/// written back into `record` before anything is sent. Applications are sent
/// only to servers that still have them, including an empty list so that
/// removed links are dropped. For prototypes the discovery rule is copied over
/// as is.
///
/// The kind-specific section is left empty; the kind's `before_write` hook
/// fills it in.
pub fn build_remote_item<F>(
    record: &mut ItemRecord<F>,
    flavor: ItemFlavor,
    api_version: u32,
) -> RemoteItem {
    let config = &mut record.config;
    let trends = resolve_trends(config.trends.as_deref(), api_version, config.value_type);
    config.trends = Some(trends.clone());

    let mut item = RemoteItem::new(
        config.host_id.as_str(),
        config.key.as_str(),
        config.name.as_str(),
        config.value_type,
    );
    item.description = config.description.clone();
    item.history = config.history.clone();
    item.trends = trends;
    item.preprocessors = encode_preprocessing(&config.preprocessors);
    item.applications =
        (api_version < APPLICATIONS_REMOVED_IN).then(|| encode_applications(&config.applications));
    item.tags = encode_tags(&config.tags);

    if flavor.is_prototype() {
        item.rule_id = record.rule_id.clone();
    }

    item
}
