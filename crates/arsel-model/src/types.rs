//! Value types shared by the selection engine and its collaborators.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two lists a gesture can start or end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListSide {
    /// Items not currently selected, in catalog order.
    Available,
    /// User-ordered selected items.
    Selected,
}

impl fmt::Display for ListSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => f.write_str("available"),
            Self::Selected => f.write_str("selected"),
        }
    }
}

/// Which universe of positions the available pool is drawn from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListMode {
    /// Every catalog position.
    #[default]
    Full,
    /// Only the positions in the eligibility mask.
    Short,
}

impl ListMode {
    pub fn is_short(self) -> bool {
        matches!(self, Self::Short)
    }
}

impl fmt::Display for ListMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("full"),
            Self::Short => f.write_str("short"),
        }
    }
}

/// An entry of the selected sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedEntry {
    /// Master catalog position.
    pub position: usize,
    /// Display alias, editable by the user.
    pub alias: String,
}

impl SelectedEntry {
    pub fn new(position: usize, alias: impl Into<String>) -> Self {
        Self {
            position,
            alias: alias.into(),
        }
    }
}

/// A row of the available pool as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableItem {
    pub position: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

/// Persisted form of one selected entry: the catalog name and its alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasPair {
    pub raw: String,
    pub alias: String,
}

impl AliasPair {
    pub fn new(raw: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            alias: alias.into(),
        }
    }
}
