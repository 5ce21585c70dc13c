#![deny(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod mask;
pub mod types;

pub use catalog::{CatalogEntry, MasterCatalog};
pub use error::{Result, SelectionError};
pub use mask::EligibilityMask;
pub use types::{AliasPair, AvailableItem, ListMode, ListSide, SelectedEntry};
