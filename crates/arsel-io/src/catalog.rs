//! Catalog files: one `name[,tooltip]` record per line, no header.

use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IoError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFile {
    pub names: Vec<String>,
    /// Present only when every record carries a tooltip.
    pub tooltips: Option<Vec<String>>,
}

/// Strip a leading BOM and surrounding whitespace from a name cell.
pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

pub fn read_catalog(path: &Path) -> Result<CatalogFile> {
    let file = File::open(path).map_err(|source| IoError::Io {
        operation: "open",
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut names = Vec::new();
    let mut tooltips = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IoError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let Some(name) = record.get(0).map(normalize_cell) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        names.push(name);
        if let Some(tip) = record.get(1) {
            tooltips.push(normalize_cell(tip));
        }
    }

    if names.is_empty() {
        return Err(IoError::EmptyCatalog {
            path: path.to_path_buf(),
        });
    }
    let tooltips = (tooltips.len() == names.len()).then_some(tooltips);
    debug!(
        path = %path.display(),
        items = names.len(),
        tooltips = tooltips.is_some(),
        "read catalog file"
    );
    Ok(CatalogFile { names, tooltips })
}
