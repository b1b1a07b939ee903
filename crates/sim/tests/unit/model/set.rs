//! Cache set tests.

use cachesim::AccessOutcome::{Hit, Miss, MissEviction};
use cachesim::cache::CacheSet;
use pretty_assertions::assert_eq;

fn tags(set: &CacheSet) -> Vec<Option<u64>> {
    set.lines()
        .iter()
        .map(|line| line.is_valid().then_some(line.tag()))
        .collect()
}

fn recencies(set: &CacheSet) -> Vec<u64> {
    set.lines().iter().map(|line| line.recency()).collect()
}

#[test]
fn new_set_is_all_invalid() {
    let set = CacheSet::new(4);
    assert_eq!(tags(&set), vec![None; 4]);
    assert_eq!(recencies(&set), vec![0; 4]);
}

#[test]
fn try_new_matches_new() {
    let set = CacheSet::try_new(4).unwrap();
    assert_eq!(tags(&set), tags(&CacheSet::new(4)));
    assert_eq!(recencies(&set), vec![0; 4]);
}

#[test]
fn try_new_reports_oversized_sets() {
    assert!(CacheSet::try_new(usize::MAX).is_err());
}

#[test]
fn misses_fill_lowest_invalid_way_first() {
    let mut set = CacheSet::new(3);

    assert_eq!(set.access(0xa), Miss);
    assert_eq!(set.access(0xb), Miss);

    assert_eq!(tags(&set), vec![Some(0xa), Some(0xb), None]);
    assert_eq!(recencies(&set), vec![1, 2, 0]);
}

#[test]
fn hit_bumps_recency_above_set_maximum() {
    let mut set = CacheSet::new(2);
    set.access(0xa);
    set.access(0xb);

    assert_eq!(set.access(0xa), Hit);
    assert_eq!(recencies(&set), vec![3, 2]);
}

#[test]
fn full_set_evicts_least_recently_used() {
    let mut set = CacheSet::new(2);
    set.access(0xa);
    set.access(0xb);
    set.access(0xa);

    assert_eq!(set.access(0xc), MissEviction);
    assert_eq!(tags(&set), vec![Some(0xa), Some(0xc)]);
    assert_eq!(set.find(0xb), None);
}

#[test]
fn eviction_keeps_valid_bit_and_bumps_recency() {
    let mut set = CacheSet::new(1);
    set.access(0x1);

    assert_eq!(set.access(0x2), MissEviction);
    let line = set.lines()[0];
    assert!(line.is_valid());
    assert_eq!(line.tag(), 0x2);
    assert_eq!(line.recency(), 2);
}

#[test]
fn evictions_follow_lru_order_across_the_set() {
    let mut set = CacheSet::new(4);
    for tag in 0..4 {
        assert_eq!(set.access(tag), Miss);
    }

    // Oldest is now tag 1 after touching tag 0.
    assert_eq!(set.access(0), Hit);
    assert_eq!(set.access(10), MissEviction);
    assert_eq!(tags(&set), vec![Some(0), Some(10), Some(2), Some(3)]);

    assert_eq!(set.access(11), MissEviction);
    assert_eq!(tags(&set), vec![Some(0), Some(10), Some(11), Some(3)]);
}

#[test]
fn invalid_lines_are_never_reported_as_hits() {
    let mut set = CacheSet::new(2);
    // Invalid lines start with tag 0.
    assert_eq!(set.find(0), None);
    assert_eq!(set.access(0), Miss);
    assert_eq!(set.find(0), Some(0));
}
