use super::*;
use pretty_assertions::assert_eq;

#[test]
fn shard_and_local_split() {
    let name = Name::new(5, 1000);
    assert_eq!(name.shard(), 5);
    assert_eq!(name.local(), 1000);

    let last = Name::new(15, Name::MAX_LOCAL);
    assert_eq!(last.shard(), 15);
    assert_eq!(last.local(), Name::MAX_LOCAL as usize);
    assert_eq!(Name::NUM_SHARDS, 16);
}

#[test]
fn names_in_different_shards_differ() {
    assert_ne!(Name::new(0, 7), Name::new(1, 7));
    assert_eq!(Name::new(3, 7), Name::new(3, 7));
}

#[test]
fn usable_as_set_key() {
    use std::collections::HashSet;
    let set: HashSet<Name> = [Name::new(0, 1), Name::new(0, 1), Name::new(0, 2)].into();
    assert_eq!(set.len(), 2);
}

#[test]
fn debug_shows_shard_and_slot() {
    assert_eq!(format!("{:?}", Name::new(2, 7)), "Name(2:7)");
}
