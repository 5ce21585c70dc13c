#![deny(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod pairs;

pub use catalog::{CatalogFile, read_catalog};
pub use error::{IoError, Result};
pub use pairs::{CsvPairStore, is_valid_pair_file, read_pairs, write_pairs};
