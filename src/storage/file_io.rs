//! Reading and replacing the per-table JSON files
//!
//! Every table lives in one pretty-printed JSON file. A table that has never
//! been saved reads as empty, and a save never leaves a half-written file
//! behind.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FinanceError;

fn storage_err(action: &str, path: &Path, err: impl std::fmt::Display) -> FinanceError {
    FinanceError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Load a table, or its `Default` when the file has not been created yet
pub fn read_json<T, P>(path: P) -> Result<T, FinanceError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(storage_err("open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_err("parse", path, e))
}

/// Replace a table file with `data`
///
/// Writes `<name>.json.tmp` next to the target, syncs it and renames it into
/// place. On a failed rename the temp file is removed and the old table stays.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FinanceError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| storage_err("create directory", dir, e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let file = File::create(&temp_path).map_err(|e| storage_err("create", &temp_path, e))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_err("serialize", &temp_path, e))?;
    writer
        .flush()
        .and_then(|_| writer.get_ref().sync_all())
        .map_err(|e| storage_err("sync", &temp_path, e))?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(storage_err("replace", path, e));
    }
    Ok(())
}
