//! The dual-list reconciliation engine.
//!
//! [`DualListIndex`] keeps the available pool and the selected sequence in
//! exact correspondence with the master catalog:
//!
//! - the pool holds master positions in strictly increasing order,
//! - the sequence holds user-ordered entries with unique positions,
//! - together they partition the active universe (all positions in full
//!   mode, the mask in short mode).
//!
//! The one tolerated exception is an entry selected in full mode whose
//! position falls outside a mask activated later. It stays selected and is
//! dropped, not pooled, when removed.

use std::collections::HashSet;
use std::sync::Arc;

use arsel_model::{
    AliasPair, AvailableItem, EligibilityMask, ListMode, MasterCatalog, Result, SelectedEntry,
    SelectionError,
};
use tracing::{debug, warn};

use crate::naming::NameValidator;
use crate::operation::{Operation, RenameOutcome};
use crate::options::SessionOptions;

/// Result of replacing the whole selection from persisted pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub operation: Operation,
    /// Raw names that did not resolve to a catalog position.
    pub unknown: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DualListIndex {
    catalog: Arc<MasterCatalog>,
    mask: Arc<EligibilityMask>,
    mode: ListMode,
    validator: NameValidator,
    available: Vec<usize>,
    selected: Vec<SelectedEntry>,
}

impl DualListIndex {
    /// Build an index in its reset state.
    pub fn new(
        catalog: Arc<MasterCatalog>,
        mask: Arc<EligibilityMask>,
        options: SessionOptions,
    ) -> Self {
        let mask = bounded_mask(mask, catalog.len());
        let mode = options.mode.unwrap_or(if mask.restricts(catalog.len()) {
            ListMode::Short
        } else {
            ListMode::Full
        });
        let mut index = Self {
            catalog,
            mask,
            mode,
            validator: NameValidator::new(options.strict_names),
            available: Vec::new(),
            selected: Vec::new(),
        };
        index.recompute_available();
        index
    }

    pub fn with_catalog(catalog: Arc<MasterCatalog>, options: SessionOptions) -> Self {
        Self::new(catalog, Arc::new(EligibilityMask::empty()), options)
    }

    // ----------------------------------------------------------------------
    // Queries
    // ----------------------------------------------------------------------

    pub fn catalog(&self) -> &Arc<MasterCatalog> {
        &self.catalog
    }

    pub fn mask(&self) -> &Arc<EligibilityMask> {
        &self.mask
    }

    pub fn mode(&self) -> ListMode {
        self.mode
    }

    pub fn validator(&self) -> &NameValidator {
        &self.validator
    }

    /// Pool positions in catalog order.
    pub fn available(&self) -> &[usize] {
        &self.available
    }

    pub fn selected(&self) -> &[SelectedEntry] {
        &self.selected
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Active universe in increasing order.
    pub fn universe(&self) -> Vec<usize> {
        if self.short_active() {
            self.mask.universe().to_vec()
        } else {
            (0..self.catalog.len()).collect()
        }
    }

    pub fn in_universe(&self, position: usize) -> bool {
        if self.short_active() {
            self.mask.contains(position)
        } else {
            position < self.catalog.len()
        }
    }

    pub fn available_items(&self) -> Vec<AvailableItem> {
        self.available
            .iter()
            .filter_map(|&position| {
                let entry = self.catalog.entry_at(position).ok()?;
                Some(AvailableItem {
                    position,
                    name: entry.name,
                    tooltip: entry.tooltip,
                })
            })
            .collect()
    }

    /// Catalog names of the selected entries, in sequence order.
    pub fn raw_selected_names(&self) -> Vec<String> {
        let positions: Vec<usize> = self.selected.iter().map(|e| e.position).collect();
        self.catalog.names_at(&positions)
    }

    pub fn alias_selected_names(&self) -> Vec<String> {
        self.selected.iter().map(|e| e.alias.clone()).collect()
    }

    pub fn alias_pairs(&self) -> Vec<AliasPair> {
        self.selected
            .iter()
            .filter_map(|entry| {
                let raw = self.catalog.name_at(entry.position).ok()?;
                Some(AliasPair::new(raw, entry.alias.clone()))
            })
            .collect()
    }

    pub fn is_mode_switchable(&self) -> bool {
        self.mask.is_switchable(self.catalog.len())
    }

    /// True while aliases are being forced to identifiers and at least one
    /// entry is selected; the UI shows its standing warning then.
    pub fn has_validation_warning(&self) -> bool {
        self.validator.is_strict() && !self.selected.is_empty()
    }

    /// Master position shown at a pool row.
    pub fn position_of_row(&self, row: usize) -> Result<usize> {
        self.available
            .get(row)
            .copied()
            .ok_or(SelectionError::OutOfRange {
                index: row,
                len: self.available.len(),
            })
    }

    pub fn sequence_index_of(&self, position: usize) -> Option<usize> {
        self.selected.iter().position(|e| e.position == position)
    }

    // ----------------------------------------------------------------------
    // Mode, mask and reset
    // ----------------------------------------------------------------------

    /// Clear the selection and offer the whole active universe again.
    pub fn reset(&mut self) -> Operation {
        self.selected.clear();
        self.recompute_available();
        debug!(available = self.available.len(), mode = %self.mode, "reset");
        Operation::Reset
    }

    /// Reset, then select `positions` in the given order.
    ///
    /// Positions outside the active universe and repeats are skipped.
    pub fn reset_with_selection(&mut self, positions: &[usize]) -> Operation {
        self.selected.clear();
        let mut seen = HashSet::with_capacity(positions.len());
        for &position in positions {
            if !self.in_universe(position) || !seen.insert(position) {
                debug!(position, "skipping seed position");
                continue;
            }
            let Ok(name) = self.catalog.name_at(position) else {
                continue;
            };
            let alias = self.validator.initial_alias(name);
            self.selected.push(SelectedEntry::new(position, alias));
        }
        self.recompute_available();
        Operation::SelectionReplaced {
            selected: self.selected.len(),
            skipped: positions.len() - self.selected.len(),
        }
    }

    /// Switch between full and short mode and rebuild the pool.
    ///
    /// The selection is left alone, so entries may now sit outside the
    /// universe until they are removed.
    pub fn switch_mode(&mut self, mode: ListMode) -> Operation {
        self.mode = mode;
        self.recompute_available();
        debug!(%mode, available = self.available.len(), "mode switched");
        Operation::ModeSwitched { mode }
    }

    /// Replace the eligibility mask with raw positions, normalized against
    /// the current catalog.
    pub fn set_mask(&mut self, positions: impl IntoIterator<Item = usize>) -> Operation {
        let mask = EligibilityMask::new(positions, self.catalog.len());
        self.replace_mask(Arc::new(mask))
    }

    /// Replace the eligibility mask. A mask that restricts the catalog
    /// switches the index to short mode.
    pub fn replace_mask(&mut self, mask: Arc<EligibilityMask>) -> Operation {
        self.mask = bounded_mask(mask, self.catalog.len());
        let switchable = self.is_mode_switchable();
        if self.mask.restricts(self.catalog.len()) {
            self.mode = ListMode::Short;
        }
        self.recompute_available();
        debug!(
            mask = self.mask.len(),
            switchable,
            mode = %self.mode,
            "mask replaced"
        );
        Operation::MaskReplaced {
            mode: self.mode,
            switchable,
        }
    }

    /// Swap the tooltip list; positions and pools are unaffected.
    pub fn set_tooltips(&mut self, tooltips: Vec<String>) {
        let catalog = self.catalog.as_ref().clone().with_tooltips(tooltips);
        self.catalog = Arc::new(catalog);
    }

    pub fn set_strict_names(&mut self, strict: bool) {
        self.validator.set_strict(strict);
    }

    // ----------------------------------------------------------------------
    // Add / remove / reorder / rename
    // ----------------------------------------------------------------------

    /// Move pool positions into the sequence at `insert_at` (or the end),
    /// keeping the caller's order.
    pub fn add(&mut self, positions: &[usize], insert_at: Option<usize>) -> Result<Operation> {
        let len = self.selected.len();
        let at = insert_at.unwrap_or(len);
        if at > len {
            return Err(SelectionError::OutOfRange { index: at, len });
        }

        let mut moving = HashSet::with_capacity(positions.len());
        for &position in positions {
            if !moving.insert(position) || self.available.binary_search(&position).is_err() {
                return Err(SelectionError::InvalidOperand { position });
            }
        }
        if positions.is_empty() {
            return Ok(Operation::NoAction);
        }

        let entries = positions
            .iter()
            .map(|&position| {
                let name = self.catalog.name_at(position)?;
                Ok(SelectedEntry::new(position, self.validator.initial_alias(name)))
            })
            .collect::<Result<Vec<_>>>()?;

        self.available.retain(|position| !moving.contains(position));
        self.selected.splice(at..at, entries);
        debug!(count = positions.len(), at, "added");
        Ok(Operation::Added {
            positions: positions.to_vec(),
            at,
        })
    }

    /// Add the items shown at the given pool rows, in catalog order, at the
    /// end of the sequence.
    pub fn add_rows(&mut self, rows: &[usize]) -> Result<Operation> {
        let mut positions = rows
            .iter()
            .map(|&row| self.position_of_row(row))
            .collect::<Result<Vec<_>>>()?;
        positions.sort_unstable();
        positions.dedup();
        self.add(&positions, None)
    }

    /// Remove sequence entries, returning eligible positions to the pool at
    /// their catalog-order slot.
    pub fn remove(&mut self, sequence_indices: &[usize]) -> Result<Operation> {
        let len = self.selected.len();
        let mut indices = sequence_indices.to_vec();
        indices.sort_unstable();
        indices.dedup();
        if let Some(&index) = indices.iter().find(|&&index| index >= len) {
            return Err(SelectionError::OutOfRange { index, len });
        }
        if indices.is_empty() {
            return Ok(Operation::NoAction);
        }

        let universe = self.universe();
        let selected: HashSet<usize> = self.selected.iter().map(|e| e.position).collect();
        let mut removed = Vec::with_capacity(indices.len());
        let mut reinserted = Vec::with_capacity(indices.len());

        // Highest first, so the lower indices stay valid. The sequence itself
        // is only trimmed once the whole batch has been placed.
        for &index in indices.iter().rev() {
            let position = self.selected[index].position;
            removed.push(position);
            if !self.in_universe(position) {
                debug!(position, "removed entry outside the active universe");
                continue;
            }
            reinserted.push(position);
            let row = reinsertion_row(&universe, &self.available, &selected, &reinserted, position);
            self.available.insert(row, position);
        }
        for &index in indices.iter().rev() {
            self.selected.remove(index);
        }

        debug!(
            removed = removed.len(),
            restored = reinserted.len(),
            "removed"
        );
        Ok(Operation::Removed {
            positions: removed,
            restored: reinserted,
        })
    }

    /// Move the entries at `from_indices` so they form a contiguous run at
    /// `to_index`, counted in the sequence as it was before the move.
    pub fn reorder(&mut self, from_indices: &[usize], to_index: usize) -> Result<Operation> {
        let len = self.selected.len();
        if to_index > len {
            return Err(SelectionError::OutOfRange {
                index: to_index,
                len,
            });
        }
        let mut indices = from_indices.to_vec();
        indices.sort_unstable();
        indices.dedup();
        if let Some(&index) = indices.iter().find(|&&index| index >= len) {
            return Err(SelectionError::OutOfRange { index, len });
        }
        if indices.is_empty() {
            return Ok(Operation::NoAction);
        }

        let before = indices.iter().filter(|&&index| index < to_index).count();
        let mut moved: Vec<SelectedEntry> = indices
            .iter()
            .rev()
            .map(|&index| self.selected.remove(index))
            .collect();
        moved.reverse();

        let at = to_index - before;
        let count = moved.len();
        self.selected.splice(at..at, moved);
        debug!(count, at, "reordered");
        Ok(Operation::Reordered { count, at })
    }

    /// Rename an entry. The accepted alias is always applied, corrected if
    /// it collided or (in strict mode) contained invalid characters.
    pub fn rename(&mut self, index: usize, alias: &str) -> Result<RenameOutcome> {
        let len = self.selected.len();
        if index >= len {
            return Err(SelectionError::OutOfRange { index, len });
        }
        let validated = self.validator.validate(
            alias,
            self.selected
                .iter()
                .enumerate()
                .filter(|(other, _)| *other != index)
                .map(|(_, entry)| entry.alias.as_str()),
        );
        let previous = std::mem::replace(
            &mut self.selected[index].alias,
            validated.accepted.clone(),
        );
        if let Some(correction) = validated.correction {
            warn!(
                requested = alias,
                accepted = %validated.accepted,
                ?correction,
                "alias corrected"
            );
        }
        Ok(RenameOutcome {
            index,
            previous,
            requested: alias.to_string(),
            accepted: validated.accepted,
            correction: validated.correction,
        })
    }

    /// Replace the selection with persisted raw/alias pairs.
    ///
    /// Raw names resolve through [`MasterCatalog::find_position`]; unknown
    /// names and repeated positions are skipped. Aliases are made valid (in
    /// strict mode) and unique among the loaded entries.
    pub fn replace_selection(&mut self, pairs: &[AliasPair]) -> ReplaceOutcome {
        let mut entries: Vec<SelectedEntry> = Vec::with_capacity(pairs.len());
        let mut seen = HashSet::with_capacity(pairs.len());
        let mut unknown = Vec::new();
        let mut repeated = 0usize;

        for pair in pairs {
            let position = match self.catalog.find_position(&pair.raw) {
                Ok(position) => position,
                Err(error) => {
                    warn!(%error, "skipping persisted entry");
                    unknown.push(pair.raw.clone());
                    continue;
                }
            };
            if !seen.insert(position) {
                debug!(raw = %pair.raw, "skipping repeated persisted entry");
                repeated += 1;
                continue;
            }
            let candidate = self.validator.initial_alias(&pair.alias);
            let validated = self
                .validator
                .validate(&candidate, entries.iter().map(|e| e.alias.as_str()));
            entries.push(SelectedEntry::new(position, validated.accepted));
        }

        self.selected = entries;
        self.recompute_available();
        debug!(
            selected = self.selected.len(),
            unknown = unknown.len(),
            repeated,
            "selection replaced"
        );
        ReplaceOutcome {
            operation: Operation::SelectionReplaced {
                selected: self.selected.len(),
                skipped: unknown.len() + repeated,
            },
            unknown,
        }
    }

    // ----------------------------------------------------------------------
    // Internals
    // ----------------------------------------------------------------------

    fn short_active(&self) -> bool {
        self.mode.is_short() && !self.mask.is_empty()
    }

    /// pool = universe - selected positions, in increasing order.
    fn recompute_available(&mut self) {
        let selected: HashSet<usize> = self.selected.iter().map(|e| e.position).collect();
        self.available = self
            .universe()
            .into_iter()
            .filter(|position| !selected.contains(position))
            .collect();
    }
}

/// Pool row at which `position` goes back so the pool stays in catalog
/// order.
///
/// `selected` is the selection as it was before the batch started and
/// `reinserted` the positions already placed in this batch (the current one
/// included). A universe position below `position` counts toward the row if
/// it is in the pool now: never selected, or already put back.
fn reinsertion_row(
    universe: &[usize],
    pool: &[usize],
    selected: &HashSet<usize>,
    reinserted: &[usize],
    position: usize,
) -> usize {
    if universe.last() == Some(&position) {
        return pool.len();
    }
    if universe.first() == Some(&position) || pool.is_empty() {
        return 0;
    }
    universe
        .iter()
        .take_while(|&&q| q < position)
        .filter(|q| !selected.contains(q) || reinserted.contains(q))
        .count()
}

fn bounded_mask(mask: Arc<EligibilityMask>, catalog_len: usize) -> Arc<EligibilityMask> {
    match mask.universe().last() {
        Some(&last) if last >= catalog_len => Arc::new(EligibilityMask::new(
            mask.universe().iter().copied(),
            catalog_len,
        )),
        _ => mask,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(names: &[&str]) -> DualListIndex {
        let catalog = MasterCatalog::from_names(names.iter().copied());
        DualListIndex::with_catalog(Arc::new(catalog), SessionOptions::default())
    }

    #[test]
    fn reinsertion_row_edge_cases() {
        let universe = [0, 1, 2, 3, 4];
        let selected: HashSet<usize> = [0, 4].into_iter().collect();
        // Last universe position always appends.
        assert_eq!(reinsertion_row(&universe, &[1, 2, 3], &selected, &[4], 4), 3);
        // First universe position goes to the top.
        assert_eq!(reinsertion_row(&universe, &[1, 2, 3], &selected, &[0], 0), 0);
        // Empty pool.
        assert_eq!(reinsertion_row(&universe, &[], &selected, &[2], 2), 0);
    }

    #[test]
    fn reinsertion_row_counts_batch_members() {
        let universe = [0, 1, 2, 3, 4];
        // 1 and 3 selected; 3 was put back earlier in this batch.
        let selected: HashSet<usize> = [1, 3].into_iter().collect();
        let pool = [0, 2, 3, 4];
        assert_eq!(reinsertion_row(&universe, &pool, &selected, &[3, 1], 1), 1);
    }

    #[test]
    fn add_rejects_position_missing_from_pool() {
        let mut index = index(&["a", "b", "c"]);
        index.add(&[1], None).unwrap();
        assert_eq!(
            index.add(&[1], None),
            Err(SelectionError::InvalidOperand { position: 1 })
        );
        assert_eq!(
            index.add(&[2, 2], None),
            Err(SelectionError::InvalidOperand { position: 2 })
        );
        assert_eq!(index.available(), &[0, 2]);
    }

    #[test]
    fn add_rejects_insert_past_end() {
        let mut index = index(&["a", "b"]);
        assert_eq!(
            index.add(&[0], Some(1)),
            Err(SelectionError::OutOfRange { index: 1, len: 0 })
        );
        assert_eq!(index.available(), &[0, 1]);
    }

    #[test]
    fn remove_out_of_range_changes_nothing() {
        let mut index = index(&["a", "b", "c"]);
        index.add(&[0, 1], None).unwrap();
        assert_eq!(
            index.remove(&[0, 5]),
            Err(SelectionError::OutOfRange { index: 5, len: 2 })
        );
        assert_eq!(index.selected_count(), 2);
        assert_eq!(index.available(), &[2]);
    }

    #[test]
    fn empty_operands_are_no_action() {
        let mut index = index(&["a"]);
        assert_eq!(index.add(&[], None), Ok(Operation::NoAction));
        assert_eq!(index.remove(&[]), Ok(Operation::NoAction));
        assert_eq!(index.reorder(&[], 0), Ok(Operation::NoAction));
    }

    #[test]
    fn rename_out_of_range() {
        let mut index = index(&["a"]);
        assert_eq!(
            index.rename(0, "x").unwrap_err(),
            SelectionError::OutOfRange { index: 0, len: 0 }
        );
    }

    #[test]
    fn oversized_mask_is_clipped_on_replace() {
        let mut index = index(&["a", "b", "c"]);
        let op = index.replace_mask(Arc::new(EligibilityMask::new([0, 2, 7], 10)));
        assert_eq!(index.mask().universe(), &[0, 2]);
        assert_eq!(
            op,
            Operation::MaskReplaced {
                mode: ListMode::Short,
                switchable: true
            }
        );
    }
}
