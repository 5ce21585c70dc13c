//! Eligibility mask defining the "short" universe of catalog positions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::MasterCatalog;

/// Sorted, deduplicated subset of catalog positions.
///
/// An empty mask places no restriction on the universe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityMask {
    positions: Vec<usize>,
}

impl EligibilityMask {
    /// Normalize raw positions against a catalog of `catalog_len` items:
    /// sort, dedupe, and discard anything past the end.
    pub fn new(positions: impl IntoIterator<Item = usize>, catalog_len: usize) -> Self {
        let mut positions: Vec<usize> = positions.into_iter().collect();
        let requested = positions.len();
        positions.sort_unstable();
        positions.dedup();
        positions.retain(|&position| position < catalog_len);
        if positions.len() != requested {
            debug!(
                requested,
                kept = positions.len(),
                catalog_len,
                "normalized eligibility mask"
            );
        }
        Self { positions }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, position: usize) -> bool {
        self.positions.binary_search(&position).is_ok()
    }

    /// Mask positions in increasing order.
    pub fn universe(&self) -> &[usize] {
        &self.positions
    }

    /// Whether a UI should offer a full/short toggle for this mask: the
    /// catalog is non-empty and the mask size differs from it.
    pub fn is_switchable(&self, catalog_len: usize) -> bool {
        catalog_len > 0 && self.positions.len() != catalog_len
    }

    /// True when short mode would offer fewer positions than full mode.
    pub fn restricts(&self, catalog_len: usize) -> bool {
        !self.positions.is_empty() && self.is_switchable(catalog_len)
    }

    /// Catalog names of the masked positions, in catalog order.
    pub fn short_names(&self, catalog: &MasterCatalog) -> Vec<String> {
        catalog.names_at(&self.positions)
    }
}
