//! Session facade offered to the UI layer.
//!
//! A [`SelectionSession`] bundles the reconciliation engine, the gesture
//! classifier and the notification collaborator behind the calls a list
//! widget makes. Read accessors are cheap and meant to be polled after every
//! operation.

use std::path::Path;
use std::sync::Arc;

use arsel_model::{
    AvailableItem, EligibilityMask, ListMode, ListSide, MasterCatalog, Result, SelectedEntry,
    SelectionError,
};
use tracing::{debug, info};

use crate::classifier::{Action, ActionClassifier};
use crate::index::DualListIndex;
use crate::naming::NameCorrection;
use crate::notice::{Notice, Notifier, TracingNotifier};
use crate::operation::{Operation, RenameOutcome};
use crate::options::SessionOptions;
use crate::persist::PairStore;

pub struct SelectionSession {
    index: DualListIndex,
    classifier: ActionClassifier,
    notifier: Box<dyn Notifier>,
    options: SessionOptions,
}

impl SelectionSession {
    /// Start with an empty catalog.
    pub fn new(options: SessionOptions) -> Self {
        Self {
            index: DualListIndex::with_catalog(Arc::new(MasterCatalog::default()), options),
            classifier: ActionClassifier::new(),
            notifier: Box::new(TracingNotifier),
            options,
        }
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn index(&self) -> &DualListIndex {
        &self.index
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    // ----------------------------------------------------------------------
    // Catalog, mask and mode
    // ----------------------------------------------------------------------

    /// Replace the catalog. Selection, aliases and mask are discarded.
    pub fn load_catalog(&mut self, names: Vec<String>, tooltips: Option<Vec<String>>) -> Operation {
        self.load_catalog_with_mask(names, tooltips, std::iter::empty())
    }

    /// Replace the catalog together with its eligibility mask.
    pub fn load_catalog_with_mask(
        &mut self,
        names: Vec<String>,
        tooltips: Option<Vec<String>>,
        mask: impl IntoIterator<Item = usize>,
    ) -> Operation {
        let catalog = MasterCatalog::new(names, tooltips);
        let mask = EligibilityMask::new(mask, catalog.len());
        info!(
            items = catalog.len(),
            masked = mask.len(),
            "catalog loaded"
        );
        self.index = DualListIndex::new(Arc::new(catalog), Arc::new(mask), self.options);
        self.classifier.reset();
        Operation::Reset
    }

    pub fn set_tooltips(&mut self, tooltips: Vec<String>) {
        self.index.set_tooltips(tooltips);
    }

    pub fn set_mask(&mut self, positions: impl IntoIterator<Item = usize>) -> Operation {
        self.index.set_mask(positions)
    }

    pub fn set_mode(&mut self, mode: ListMode) -> Operation {
        self.index.switch_mode(mode)
    }

    pub fn set_strict_names(&mut self, strict: bool) {
        self.options.strict_names = strict;
        self.index.set_strict_names(strict);
    }

    // ----------------------------------------------------------------------
    // List operations
    // ----------------------------------------------------------------------

    pub fn add(&mut self, positions: &[usize], insert_at: Option<usize>) -> Result<Operation> {
        self.index.add(positions, insert_at)
    }

    /// Add button: add the highlighted pool rows.
    pub fn add_rows(&mut self, rows: &[usize]) -> Result<Operation> {
        self.index.add_rows(rows)
    }

    /// Double click on a pool row.
    pub fn activate_row(&mut self, row: usize) -> Result<Operation> {
        self.index.add_rows(&[row])
    }

    pub fn remove(&mut self, sequence_indices: &[usize]) -> Result<Operation> {
        self.index.remove(sequence_indices)
    }

    pub fn reorder(&mut self, from_indices: &[usize], to_index: usize) -> Result<Operation> {
        self.index.reorder(from_indices, to_index)
    }

    pub fn reset(&mut self) -> Operation {
        self.classifier.reset();
        self.index.reset()
    }

    /// Reset, then select `positions` in order. Repeats and positions outside
    /// the active universe are skipped.
    pub fn reset_with_selection(&mut self, positions: &[usize]) -> Operation {
        self.classifier.reset();
        self.index.reset_with_selection(positions)
    }

    /// Rename an entry, telling the user when the alias had to be corrected.
    pub fn rename(&mut self, index: usize, text: &str) -> Result<RenameOutcome> {
        let outcome = self.index.rename(index, text)?;
        match outcome.correction {
            Some(NameCorrection::Duplicate) => {
                self.notifier.notify(&Notice::AliasDeduplicated {
                    requested: outcome.requested.clone(),
                    accepted: outcome.accepted.clone(),
                });
            }
            Some(NameCorrection::InvalidCharacters) => {
                self.notifier.notify(&Notice::AliasSanitized {
                    requested: outcome.requested.clone(),
                    accepted: outcome.accepted.clone(),
                });
            }
            None => {}
        }
        Ok(outcome)
    }

    // ----------------------------------------------------------------------
    // Gestures
    // ----------------------------------------------------------------------

    pub fn press(&mut self, source: ListSide) {
        self.classifier.on_press(source);
    }

    /// Finish a drag gesture on `target`.
    ///
    /// `rows` are the dragged rows of the list the gesture started in: pool
    /// rows for an add, sequence indices for a remove or reorder. `insert_at`
    /// is the drop slot in the selected sequence (ignored for removals, whose
    /// pool slot is fixed by catalog order).
    pub fn drop_rows(
        &mut self,
        target: ListSide,
        rows: &[usize],
        insert_at: Option<usize>,
    ) -> Result<Operation> {
        self.classifier.on_drop(target);
        let action = self.classifier.classify();
        debug!(?action, %target, rows = rows.len(), "drop classified");
        match action {
            Action::Add => {
                let positions = rows
                    .iter()
                    .map(|&row| self.index.position_of_row(row))
                    .collect::<Result<Vec<_>>>()?;
                self.index.add(&positions, insert_at)
            }
            Action::Remove => self.index.remove(rows),
            Action::Reorder => {
                let to = insert_at.unwrap_or(self.index.selected_count());
                self.index.reorder(rows, to)
            }
            Action::NoAction => Ok(Operation::NoAction),
        }
    }

    // ----------------------------------------------------------------------
    // Queries
    // ----------------------------------------------------------------------

    pub fn available_pool(&self) -> Vec<AvailableItem> {
        self.index.available_items()
    }

    pub fn selected_sequence(&self) -> &[SelectedEntry] {
        self.index.selected()
    }

    pub fn raw_selected_names(&self) -> Vec<String> {
        self.index.raw_selected_names()
    }

    pub fn alias_selected_names(&self) -> Vec<String> {
        self.index.alias_selected_names()
    }

    /// Catalog names inside the eligibility mask.
    pub fn short_list(&self) -> Vec<String> {
        self.index.mask().short_names(self.index.catalog())
    }

    pub fn mode(&self) -> ListMode {
        self.index.mode()
    }

    pub fn is_mode_switchable(&self) -> bool {
        self.index.is_mode_switchable()
    }

    pub fn has_validation_warning(&self) -> bool {
        self.index.has_validation_warning()
    }

    // ----------------------------------------------------------------------
    // Persistence
    // ----------------------------------------------------------------------

    /// Replace the selection with pairs read from `source`.
    ///
    /// On failure the user is notified and nothing changes.
    pub fn load_pairs(&mut self, store: &dyn PairStore, source: &Path) -> Result<Operation> {
        let pairs = match store.load_pairs(source) {
            Ok(pairs) => pairs,
            Err(error) => {
                let reason = format!("{error:#}");
                self.notifier.notify(&Notice::LoadFailed {
                    path: source.to_path_buf(),
                    reason: reason.clone(),
                });
                return Err(SelectionError::Persistence { message: reason });
            }
        };
        let outcome = self.index.replace_selection(&pairs);
        if !outcome.unknown.is_empty() {
            self.notifier.notify(&Notice::EntriesSkipped {
                names: outcome.unknown,
            });
        }
        info!(path = %source.display(), pairs = pairs.len(), "selection loaded");
        Ok(outcome.operation)
    }

    /// Write the selection as raw/alias pairs to `destination`.
    pub fn save_pairs(&self, store: &dyn PairStore, destination: &Path) -> Result<()> {
        let pairs = self.index.alias_pairs();
        if let Err(error) = store.save_pairs(destination, &pairs) {
            let reason = format!("{error:#}");
            self.notifier.notify(&Notice::SaveFailed {
                path: destination.to_path_buf(),
                reason: reason.clone(),
            });
            return Err(SelectionError::Persistence { message: reason });
        }
        info!(path = %destination.display(), pairs = pairs.len(), "selection saved");
        Ok(())
    }
}

impl Default for SelectionSession {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}
