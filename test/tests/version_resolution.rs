/// Resolving version-dependent slots and values

use metasync_shared::{resolve, resolve_slot, ProtocolVersion, SlotIndex};
use proptest::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Layout {
    X0,
    X5,
    X7,
}

const CANDIDATES: [(u32, Layout); 3] = [(0, Layout::X0), (500, Layout::X5), (700, Layout::X7)];

#[test]
fn picks_greatest_threshold_not_above_current() {
    assert_eq!(resolve(ProtocolVersion(600), &CANDIDATES), Some(Layout::X5));
    assert_eq!(resolve(ProtocolVersion(900), &CANDIDATES), Some(Layout::X7));
    assert_eq!(resolve(ProtocolVersion(700), &CANDIDATES), Some(Layout::X7));
    assert_eq!(resolve(ProtocolVersion(0), &CANDIDATES), Some(Layout::X0));
}

#[test]
fn below_every_threshold_is_unsupported() {
    let table = [(100, 5), (500, 6), (700, 7)];

    assert_eq!(resolve_slot(ProtocolVersion(50), &table), SlotIndex::Unsupported);
    assert_eq!(resolve_slot(ProtocolVersion(600), &table), SlotIndex::Wire(6));
    assert_eq!(resolve_slot(ProtocolVersion(900), &table), SlotIndex::Wire(7));
}

#[test]
fn candidate_order_does_not_matter() {
    let reversed = [(700, Layout::X7), (500, Layout::X5), (0, Layout::X0)];

    assert_eq!(resolve(ProtocolVersion(600), &reversed), Some(Layout::X5));
    assert_eq!(resolve(ProtocolVersion(900), &reversed), Some(Layout::X7));
}

#[test]
fn sentinel_slots_resolve_to_their_kind() {
    let table = [(0, 4), (300, -1), (800, -2)];

    assert_eq!(resolve_slot(ProtocolVersion(100), &table), SlotIndex::Wire(4));
    assert_eq!(resolve_slot(ProtocolVersion(400), &table), SlotIndex::Unsupported);
    assert_eq!(resolve_slot(ProtocolVersion(900), &table), SlotIndex::EditorOnly);
}

#[test]
fn empty_table_is_unsupported() {
    assert_eq!(resolve::<u32, u8>(ProtocolVersion::LATEST, &[]), None);
    assert_eq!(resolve_slot(ProtocolVersion::LATEST, &[]), SlotIndex::Unsupported);
}

proptest! {
    #[test]
    fn resolution_matches_linear_scan(
        thresholds in prop::collection::vec(0u32..2_000, 0..12),
        current in 0u32..2_500,
    ) {
        let candidates: Vec<(u32, usize)> = thresholds
            .iter()
            .enumerate()
            .map(|(position, threshold)| (*threshold, position))
            .collect();

        let mut expected: Option<(u32, usize)> = None;
        for (threshold, position) in &candidates {
            if *threshold > current {
                continue;
            }
            match expected {
                Some((best, _)) if best >= *threshold => {}
                _ => expected = Some((*threshold, *position)),
            }
        }

        prop_assert_eq!(
            resolve(ProtocolVersion(current), &candidates),
            expected.map(|(_, position)| position)
        );
    }

    #[test]
    fn later_versions_never_lose_support(
        first in 0u32..1_000,
        current in 0u32..2_000,
        bump in 0u32..1_000,
    ) {
        let table = [(first, 3)];
        if resolve_slot(ProtocolVersion(current), &table).is_supported() {
            prop_assert!(resolve_slot(ProtocolVersion(current + bump), &table).is_supported());
        }
    }
}
