//! The master catalog of selectable items.
//!
//! Positions are stable for the catalog's lifetime. A catalog is never edited
//! in place; replacing it means building a new one and discarding every pool
//! derived from the old one.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SelectionError};

/// A single catalog item resolved at its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub position: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

/// Ordered list of raw item names with optional tooltips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterCatalog {
    names: Vec<String>,
    /// Either empty or exactly as long as `names`.
    tooltips: Vec<String>,
}

impl MasterCatalog {
    /// Build a catalog from names and an optional tooltip list.
    ///
    /// A tooltip list whose length does not match the name list is dropped.
    pub fn new(names: Vec<String>, tooltips: Option<Vec<String>>) -> Self {
        let tooltips = accept_tooltips(names.len(), tooltips);
        Self { names, tooltips }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Into::into).collect(), None)
    }

    /// Replace the tooltip list under the same length rule as [`Self::new`].
    #[must_use]
    pub fn with_tooltips(mut self, tooltips: Vec<String>) -> Self {
        self.tooltips = accept_tooltips(self.names.len(), Some(tooltips));
        self
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn has_tooltips(&self) -> bool {
        !self.tooltips.is_empty()
    }

    pub fn name_at(&self, position: usize) -> Result<&str> {
        self.names
            .get(position)
            .map(String::as_str)
            .ok_or(SelectionError::OutOfRange {
                index: position,
                len: self.names.len(),
            })
    }

    /// Tooltip for a position; `None` when the catalog carries no tooltips
    /// or the tooltip is empty.
    pub fn tooltip_at(&self, position: usize) -> Option<&str> {
        self.tooltips
            .get(position)
            .map(String::as_str)
            .filter(|tip| !tip.is_empty())
    }

    pub fn entry_at(&self, position: usize) -> Result<CatalogEntry> {
        let name = self.name_at(position)?;
        Ok(CatalogEntry {
            position,
            name: name.to_string(),
            tooltip: self.tooltip_at(position).map(str::to_string),
        })
    }

    /// Position of the first item with this exact name.
    ///
    /// Duplicate names always resolve to their earliest occurrence, so a later
    /// duplicate can never be found by name.
    pub fn find_position(&self, name: &str) -> Result<usize> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .ok_or_else(|| SelectionError::NotFound {
                name: name.to_string(),
            })
    }

    pub fn has_duplicate_names(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.names.len());
        !self.names.iter().all(|name| seen.insert(name.as_str()))
    }

    /// Names at the given positions, skipping positions past the end.
    pub fn names_at(&self, positions: &[usize]) -> Vec<String> {
        positions
            .iter()
            .filter_map(|&position| self.names.get(position).cloned())
            .collect()
    }
}

fn accept_tooltips(len: usize, tooltips: Option<Vec<String>>) -> Vec<String> {
    match tooltips {
        Some(tips) if tips.len() == len => tips,
        Some(tips) => {
            debug!(
                names = len,
                tooltips = tips.len(),
                "tooltip count does not match catalog, dropping tooltips"
            );
            Vec::new()
        }
        None => Vec::new(),
    }
}
