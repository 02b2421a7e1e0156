//! Tests for `UnorderedSet` equality and ordering guarantees.

use itemsync_model::{ApplicationSet, Tag, TagSet, UnorderedSet};
use proptest::prelude::*;

#[test]
fn insertion_order_does_not_affect_equality() {
    let a: TagSet = [Tag::new("a", "1"), Tag::new("b", "2")].into_iter().collect();
    let b: TagSet = [Tag::new("b", "2"), Tag::new("a", "1")].into_iter().collect();
    assert_eq!(a, b);
}

#[test]
fn tags_with_same_key_and_different_values_are_distinct() {
    let set: TagSet = [Tag::new("env", "prod"), Tag::new("env", "dev")].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn duplicates_collapse() {
    let mut set = ApplicationSet::new();
    assert!(set.insert("5".into()));
    assert!(!set.insert("5".into()));
    assert_eq!(set.len(), 1);
}

#[test]
fn iteration_is_sorted() {
    let set: UnorderedSet<String> = ["30", "10", "20"].into_iter().map(String::from).collect();
    let members: Vec<_> = set.iter().cloned().collect();
    assert_eq!(members, vec!["10", "20", "30"]);
}

#[test]
fn deserialization_deduplicates() {
    let set: ApplicationSet = serde_json::from_str(r#"["1","2","1"]"#).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(serde_json::to_string(&set).unwrap(), r#"["1","2"]"#);
}

#[test]
fn empty_by_default() {
    let set: TagSet = Default::default();
    assert!(set.is_empty());
}

fn tag_strategy() -> impl Strategy<Value = Tag> {
    ("[a-z]{1,8}", "[a-z0-9]{0,8}").prop_map(|(k, v)| Tag::new(k, v))
}

proptest! {
    /// Any permutation of the same members builds an equal set.
    #[test]
    fn permutation_yields_equal_set(
        tags in prop::collection::vec(tag_strategy(), 0..20).prop_shuffle(),
    ) {
        let forward: TagSet = tags.iter().cloned().collect();
        let reversed: TagSet = tags.iter().rev().cloned().collect();
        prop_assert_eq!(forward, reversed);
    }

    /// Length equals the number of distinct (key, value) pairs.
    #[test]
    fn len_counts_distinct_pairs(tags in prop::collection::vec(tag_strategy(), 0..20)) {
        let set: TagSet = tags.iter().cloned().collect();
        let distinct: std::collections::HashSet<_> = tags.into_iter().collect();
        prop_assert_eq!(set.len(), distinct.len());
    }
}
