use itemsync_client::WireTag;
use itemsync_model::{ApplicationSet, Tag, TagSet};

pub fn encode_tags(tags: &TagSet) -> Vec<WireTag> {
    tags.iter()
        .map(|tag| WireTag {
            tag: tag.key.clone(),
            value: tag.value.clone(),
        })
        .collect()
}

/// Duplicate pairs collapse into one tag.
pub fn decode_tags(tags: &[WireTag]) -> TagSet {
    tags.iter()
        .map(|wire| Tag::new(wire.tag.as_str(), wire.value.as_str()))
        .collect()
}

pub fn encode_applications(applications: &ApplicationSet) -> Vec<String> {
    applications.iter().cloned().collect()
}

pub fn decode_applications(ids: &[String]) -> ApplicationSet {
    ids.iter().cloned().collect()
}
