//! Raw/alias pair files.
//!
//! One record per line, no header: `raw,alias`. On read the first field is
//! the raw catalog name and the last field the alias, so a stray extra field
//! in the middle is tolerated. Fields containing commas or quotes are quoted
//! on write.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use arsel_core::PairStore;
use arsel_model::AliasPair;
use csv::{ReaderBuilder, WriterBuilder};
use tracing::{debug, info};

use crate::catalog::normalize_cell;
use crate::error::{IoError, Result};

/// [`PairStore`] backed by CSV files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvPairStore;

impl PairStore for CsvPairStore {
    fn load_pairs(&self, source: &Path) -> anyhow::Result<Vec<AliasPair>> {
        Ok(read_pairs(source)?)
    }

    fn save_pairs(&self, destination: &Path, pairs: &[AliasPair]) -> anyhow::Result<()> {
        Ok(write_pairs(destination, pairs)?)
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| IoError::Io {
        operation: "open",
        path: path.to_path_buf(),
        source,
    })
}

fn csv_error(path: &Path, source: csv::Error) -> IoError {
    IoError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

/// Read every pair from `path`. Either all records parse or nothing is
/// returned.
pub fn read_pairs(path: &Path) -> Result<Vec<AliasPair>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(open(path)?);

    let mut pairs = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| csv_error(path, source))?;
        let (Some(raw), Some(alias)) = (record.get(0), record.iter().last()) else {
            continue;
        };
        // Aliases are kept as written.
        pairs.push(AliasPair::new(normalize_cell(raw), alias));
    }
    debug!(path = %path.display(), pairs = pairs.len(), "read pair file");
    Ok(pairs)
}

/// Write `pairs` to `path` through a temp file and a rename, so a failed
/// write never leaves a half-written list behind.
pub fn write_pairs(path: &Path, pairs: &[AliasPair]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| IoError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = temp_path_for(path);
    let file = File::create(&temp_path).map_err(|source| IoError::Io {
        operation: "create",
        path: temp_path.clone(),
        source,
    })?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    for pair in pairs {
        writer
            .write_record([pair.raw.as_str(), pair.alias.as_str()])
            .map_err(|source| csv_error(&temp_path, source))?;
    }
    let file = writer.into_inner().map_err(|err| IoError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: err.into_error(),
    })?;
    file.sync_all().map_err(|source| IoError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source,
    })?;

    fs::rename(&temp_path, path).map_err(|source| IoError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), pairs = pairs.len(), "wrote pair file");
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// True when `path` exists and every record has exactly two fields.
pub fn is_valid_pair_file(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);
    reader
        .records()
        .all(|record| record.is_ok_and(|record| record.len() == 2))
}
