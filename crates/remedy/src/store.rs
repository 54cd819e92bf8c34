use dirs::home_dir;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Environment variable that overrides the default data root.
pub const DATA_ROOT_ENV: &str = "REMEDI_DATA_ROOT";

/// Get the data root directory (~/.remedi)
pub fn data_root() -> Result<PathBuf, StorageError> {
  // Allow tests or callers to override the root directory via env var
  if let Ok(custom_root) = env::var(DATA_ROOT_ENV) {
    return Ok(PathBuf::from(custom_root));
  }

  let home = home_dir().ok_or(StorageError::NoDataRoot)?;
  Ok(home.join(".remedi"))
}

/// Load and decode one JSON store file in full.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
  let raw = fs::read_to_string(path)
    .map_err(|source| StorageError::Unreadable { path: path.to_path_buf(), source })?;
  serde_json::from_str(&raw)
    .map_err(|source| StorageError::Corrupt { path: path.to_path_buf(), source })
}

/// Encode and rewrite one JSON store file in full.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)
      .map_err(|source| StorageError::Unwritable { path: path.to_path_buf(), source })?;
  }

  let raw = serde_json::to_string_pretty(value)
    .map_err(|source| StorageError::Corrupt { path: path.to_path_buf(), source })?;
  fs::write(path, raw)
    .map_err(|source| StorageError::Unwritable { path: path.to_path_buf(), source })
}
