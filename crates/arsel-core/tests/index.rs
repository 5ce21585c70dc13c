//! Scenario tests for the reconciliation engine.

use std::sync::Arc;

use arsel_core::{DualListIndex, NameCorrection, Operation, SessionOptions};
use arsel_model::{AliasPair, EligibilityMask, ListMode, MasterCatalog, SelectionError};

fn catalog() -> Arc<MasterCatalog> {
    Arc::new(MasterCatalog::from_names(["a", "b", "c", "d", "e"]))
}

fn full_index() -> DualListIndex {
    DualListIndex::with_catalog(catalog(), SessionOptions::default())
}

fn masked_index(mask: &[usize]) -> DualListIndex {
    let catalog = catalog();
    let mask = EligibilityMask::new(mask.iter().copied(), catalog.len());
    DualListIndex::new(catalog, Arc::new(mask), SessionOptions::default())
}

fn positions(index: &DualListIndex) -> Vec<usize> {
    index.selected().iter().map(|e| e.position).collect()
}

#[test]
fn add_moves_positions_into_selection() {
    let mut index = full_index();
    let op = index.add(&[1, 3], None).expect("add");

    assert_eq!(
        op,
        Operation::Added {
            positions: vec![1, 3],
            at: 0
        }
    );
    assert_eq!(index.available(), &[0, 2, 4]);
    assert_eq!(index.alias_selected_names(), vec!["b", "d"]);
}

#[test]
fn remove_restores_catalog_order() {
    let mut index = full_index();
    index.add(&[1, 3], None).expect("add");
    index.remove(&[0]).expect("remove");

    assert_eq!(index.available(), &[0, 1, 2, 4]);
    assert_eq!(index.alias_selected_names(), vec!["d"]);
}

#[test]
fn short_mode_then_full_mode() {
    let mut index = masked_index(&[0, 2, 4]);
    assert_eq!(index.mode(), ListMode::Short);
    assert!(index.is_mode_switchable());
    assert_eq!(index.available(), &[0, 2, 4]);

    index.add(&[0], None).expect("add");
    assert_eq!(index.available(), &[2, 4]);
    assert_eq!(index.raw_selected_names(), vec!["a"]);

    let op = index.switch_mode(ListMode::Full);
    assert_eq!(
        op,
        Operation::ModeSwitched {
            mode: ListMode::Full
        }
    );
    assert_eq!(index.available(), &[1, 2, 3, 4]);
    assert_eq!(positions(&index), vec![0]);
}

#[test]
fn rename_suffixes_colliding_aliases() {
    let mut index = full_index();
    index.add(&[0, 1, 2], None).expect("add");
    index.rename(0, "x").expect("rename");

    let outcome = index.rename(1, "x").expect("rename");
    assert_eq!(outcome.accepted, "x_1");
    assert_eq!(outcome.previous, "b");
    assert_eq!(outcome.correction, Some(NameCorrection::Duplicate));

    let outcome = index.rename(2, "x").expect("rename");
    assert_eq!(outcome.accepted, "x_2");
    assert_eq!(index.alias_selected_names(), vec!["x", "x_1", "x_2"]);
}

#[test]
fn rename_to_own_alias_is_not_a_duplicate() {
    let mut index = full_index();
    index.add(&[0], None).expect("add");
    let outcome = index.rename(0, "a").expect("rename");
    assert_eq!(outcome.accepted, "a");
    assert_eq!(outcome.correction, None);
}

#[test]
fn strict_names_sanitize_initial_aliases_and_renames() {
    let catalog = Arc::new(MasterCatalog::from_names(["1.1", "2.1", "x y"]));
    let mut index =
        DualListIndex::with_catalog(catalog, SessionOptions::default().with_strict_names(true));
    assert!(!index.has_validation_warning());

    index.add(&[0, 2], None).expect("add");
    assert_eq!(index.alias_selected_names(), vec!["1_1", "x_y"]);
    assert_eq!(index.raw_selected_names(), vec!["1.1", "x y"]);
    assert!(index.has_validation_warning());

    let outcome = index.rename(0, "speed-rpm").expect("rename");
    assert_eq!(outcome.accepted, "speed_rpm");
    assert_eq!(outcome.correction, Some(NameCorrection::InvalidCharacters));
}

#[test]
fn add_inserts_at_requested_slot_in_caller_order() {
    let mut index = full_index();
    index.add(&[0, 4], None).expect("add");
    index.add(&[3, 1], Some(1)).expect("add");
    assert_eq!(positions(&index), vec![0, 3, 1, 4]);
    assert_eq!(index.available(), &[2]);
}

#[test]
fn add_rows_uses_catalog_order() {
    let mut index = full_index();
    index.add(&[1], None).expect("add");
    // Pool is [0, 2, 3, 4]; rows 3 and 1 are positions 4 and 2.
    index.add_rows(&[3, 1]).expect("add rows");
    assert_eq!(positions(&index), vec![1, 2, 4]);
    assert_eq!(
        index.add_rows(&[7]),
        Err(SelectionError::OutOfRange { index: 7, len: 2 })
    );
}

#[test]
fn multi_remove_reinserts_every_item_in_order() {
    let mut index = full_index();
    index.add(&[4, 0, 2, 3], None).expect("add");
    assert_eq!(index.available(), &[1]);

    let op = index.remove(&[0, 1, 3]).expect("remove");
    assert_eq!(
        op,
        Operation::Removed {
            positions: vec![3, 0, 4],
            restored: vec![3, 0, 4],
        }
    );
    assert_eq!(index.available(), &[0, 1, 3, 4]);
    assert_eq!(positions(&index), vec![2]);
}

#[test]
fn remove_accepts_unsorted_and_repeated_indices() {
    let mut index = full_index();
    index.add(&[0, 1, 2, 3, 4], None).expect("add");
    index.remove(&[3, 1, 3]).expect("remove");
    assert_eq!(index.available(), &[1, 3]);
    assert_eq!(positions(&index), vec![0, 2, 4]);
}

#[test]
fn removing_an_item_outside_the_short_universe_drops_it() {
    let mut index = full_index();
    index.add(&[1, 2], None).expect("add");
    index.set_mask([0, 2, 4]);
    assert_eq!(index.mode(), ListMode::Short);
    assert_eq!(index.available(), &[0, 4]);

    let op = index.remove(&[0, 1]).expect("remove");
    assert_eq!(
        op,
        Operation::Removed {
            positions: vec![2, 1],
            restored: vec![2],
        }
    );
    assert_eq!(index.available(), &[0, 2, 4]);
    assert!(index.selected().is_empty());

    // Position 1 reappears once the full universe is recomputed.
    index.switch_mode(ListMode::Full);
    assert_eq!(index.available(), &[0, 1, 2, 3, 4]);
}

#[test]
fn short_mode_reinsertion_follows_mask_order() {
    let mut index = masked_index(&[0, 2, 4]);
    index.add(&[4, 2, 0], None).expect("add");
    assert!(index.available().is_empty());

    index.remove(&[1]).expect("remove");
    assert_eq!(index.available(), &[2]);
    index.remove(&[1]).expect("remove");
    assert_eq!(index.available(), &[0, 2]);
    index.remove(&[0]).expect("remove");
    assert_eq!(index.available(), &[0, 2, 4]);
}

#[test]
fn reorder_moves_a_contiguous_run() {
    let mut index = full_index();
    index.add(&[0, 1, 2, 3, 4], None).expect("add");

    // Move entries 0 and 2 to just before old index 4.
    let op = index.reorder(&[2, 0], 4).expect("reorder");
    assert_eq!(op, Operation::Reordered { count: 2, at: 2 });
    assert_eq!(positions(&index), vec![1, 3, 0, 2, 4]);
    assert_eq!(index.available(), &[] as &[usize]);
}

#[test]
fn reorder_to_front_and_end() {
    let mut index = full_index();
    index.add(&[0, 1, 2, 3], None).expect("add");

    index.reorder(&[3], 0).expect("reorder");
    assert_eq!(positions(&index), vec![3, 0, 1, 2]);

    index.reorder(&[0, 1], 4).expect("reorder");
    assert_eq!(positions(&index), vec![1, 2, 3, 0]);
}

#[test]
fn reorder_keeps_aliases() {
    let mut index = full_index();
    index.add(&[0, 1, 2], None).expect("add");
    index.rename(1, "renamed").expect("rename");
    index.reorder(&[1], 0).expect("reorder");
    assert_eq!(index.alias_selected_names(), vec!["renamed", "a", "c"]);
}

#[test]
fn reorder_rejects_out_of_range() {
    let mut index = full_index();
    index.add(&[0, 1], None).expect("add");
    assert_eq!(
        index.reorder(&[0], 3),
        Err(SelectionError::OutOfRange { index: 3, len: 2 })
    );
    assert_eq!(
        index.reorder(&[2], 0),
        Err(SelectionError::OutOfRange { index: 2, len: 2 })
    );
    assert_eq!(positions(&index), vec![0, 1]);
}

#[test]
fn reset_offers_whole_universe() {
    let mut index = masked_index(&[1, 3]);
    index.add(&[3], None).expect("add");
    assert_eq!(index.reset(), Operation::Reset);
    assert_eq!(index.available(), &[1, 3]);
    assert!(index.selected().is_empty());
}

#[test]
fn seeded_selection_skips_ineligible_positions() {
    let mut index = masked_index(&[0, 2, 4]);
    let op = index.reset_with_selection(&[4, 1, 0, 4, 9]);
    assert_eq!(
        op,
        Operation::SelectionReplaced {
            selected: 2,
            skipped: 3
        }
    );
    assert_eq!(positions(&index), vec![4, 0]);
    assert_eq!(index.available(), &[2]);
}

#[test]
fn full_mask_is_not_switchable() {
    let mut index = full_index();
    let op = index.set_mask([0, 1, 2, 3, 4]);
    assert_eq!(
        op,
        Operation::MaskReplaced {
            mode: ListMode::Full,
            switchable: false
        }
    );
    assert!(!index.is_mode_switchable());
}

#[test]
fn clearing_the_mask_keeps_the_current_mode() {
    let mut index = full_index();
    let op = index.set_mask(std::iter::empty());
    assert_eq!(
        op,
        Operation::MaskReplaced {
            mode: ListMode::Full,
            switchable: true
        }
    );
    assert_eq!(index.available(), &[0, 1, 2, 3, 4]);
}

#[test]
fn empty_mask_leaves_universe_unrestricted() {
    let mut index = masked_index(&[]);
    assert_eq!(index.mode(), ListMode::Full);
    assert!(index.is_mode_switchable());
    index.switch_mode(ListMode::Short);
    assert_eq!(index.available(), &[0, 1, 2, 3, 4]);
}

#[test]
fn explicit_mode_overrides_automatic_choice() {
    let catalog = catalog();
    let mask = EligibilityMask::new([0, 1], catalog.len());
    let index = DualListIndex::new(
        catalog,
        Arc::new(mask),
        SessionOptions::default().with_mode(Some(ListMode::Full)),
    );
    assert_eq!(index.mode(), ListMode::Full);
    assert_eq!(index.available(), &[0, 1, 2, 3, 4]);
}

#[test]
fn replace_selection_resolves_names() {
    let mut index = full_index();
    let pairs = vec![
        AliasPair::new("d", "delta"),
        AliasPair::new("zz", "gone"),
        AliasPair::new("a", "delta"),
        AliasPair::new("d", "again"),
    ];
    let outcome = index.replace_selection(&pairs);

    assert_eq!(outcome.unknown, vec!["zz"]);
    assert_eq!(
        outcome.operation,
        Operation::SelectionReplaced {
            selected: 2,
            skipped: 2
        }
    );
    assert_eq!(positions(&index), vec![3, 0]);
    assert_eq!(index.alias_selected_names(), vec!["delta", "delta_1"]);
    assert_eq!(index.available(), &[1, 2, 4]);
}

#[test]
fn replace_selection_uses_first_duplicate_name() {
    let catalog = Arc::new(MasterCatalog::from_names(["x", "y", "x"]));
    let mut index = DualListIndex::with_catalog(catalog, SessionOptions::default());
    index.replace_selection(&[AliasPair::new("x", "x")]);
    assert_eq!(positions(&index), vec![0]);
    assert_eq!(index.available(), &[1, 2]);
}

#[test]
fn tooltips_show_in_available_items() {
    let mut index = full_index();
    index.set_tooltips(["A", "B", "C", "D", "E"].map(String::from).to_vec());
    index.add(&[0], None).expect("add");
    let items = index.available_items();
    assert_eq!(items[0].name, "b");
    assert_eq!(items[0].tooltip.as_deref(), Some("B"));
}
