//! Roster - User Record Storage
//!
//! File-backed CRUD over registered dashboard users. Credentials are
//! deliberately out of scope; records carry profile fields only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// File name of the user store under the data root.
pub const USERS_FILE: &str = "users.json";

#[derive(Error, Debug)]
pub enum RosterError {
  #[error("failed to read {}: {source}", .path.display())]
  Unreadable { path: PathBuf, source: std::io::Error },

  #[error("failed to write {}: {source}", .path.display())]
  Unwritable { path: PathBuf, source: std::io::Error },

  #[error("corrupt user store at {}: {source}", .path.display())]
  Corrupt { path: PathBuf, source: serde_json::Error },

  #[error("a user with email {email} already exists")]
  DuplicateEmail { email: String },

  #[error("no user with id {id}")]
  NotFound { id: Uuid },
}

/// One registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
  pub id: Uuid,
  pub full_name: String,
  pub email: String,
  pub age: u32,
  /// Free text, comma separated as entered.
  pub allergies: String,
  pub created_at: DateTime<Utc>,
  pub is_active: bool,
}

/// Fields for a new registration; id, creation time, and the active flag
/// are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub full_name: String,
  pub email: String,
  pub age: u32,
  pub allergies: String,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
  pub full_name: Option<String>,
  pub email: Option<String>,
  pub age: Option<u32>,
  pub allergies: Option<String>,
}

/// File-backed user store, rewritten in full on each mutation.
#[derive(Debug)]
pub struct UserStore {
  path: PathBuf,
}

impl UserStore {
  /// Open the store under `root`, creating an empty one if absent.
  pub fn open_or_create(root: &Path) -> Result<Self, RosterError> {
    let path = root.join(USERS_FILE);

    if !path.exists() {
      write_users(&path, &[])?;
      debug!("created empty user store at {}", path.display());
    }

    Ok(Self { path })
  }

  /// All records, oldest registration first.
  pub fn list(&self) -> Result<Vec<UserRecord>, RosterError> {
    read_users(&self.path)
  }

  /// Number of registered users.
  pub fn count(&self) -> Result<usize, RosterError> {
    Ok(self.list()?.len())
  }

  /// Case-insensitive substring search over names and emails.
  pub fn search(&self, term: &str) -> Result<Vec<UserRecord>, RosterError> {
    let needle = term.to_lowercase();

    Ok(
      self
        .list()?
        .into_iter()
        .filter(|user| {
          user.full_name.to_lowercase().contains(&needle)
            || user.email.to_lowercase().contains(&needle)
        })
        .collect(),
    )
  }

  /// Register a new user. A duplicate email is rejected.
  pub fn add(&mut self, new_user: NewUser) -> Result<UserRecord, RosterError> {
    let mut users = self.list()?;

    if users.iter().any(|u| u.email.eq_ignore_ascii_case(&new_user.email)) {
      return Err(RosterError::DuplicateEmail { email: new_user.email });
    }

    let record = UserRecord {
      id: Uuid::new_v4(),
      full_name: new_user.full_name,
      email: new_user.email,
      age: new_user.age,
      allergies: new_user.allergies,
      created_at: Utc::now(),
      is_active: true,
    };

    users.push(record.clone());
    write_users(&self.path, &users)?;

    debug!(user = %record.id, "registered user");
    Ok(record)
  }

  /// Apply a partial update to one record. An email change is re-checked
  /// against the other records for duplicates.
  pub fn update(&mut self, id: Uuid, changes: UserChanges) -> Result<UserRecord, RosterError> {
    let mut users = self.list()?;

    if let Some(email) = &changes.email {
      if users.iter().any(|u| u.id != id && u.email.eq_ignore_ascii_case(email)) {
        return Err(RosterError::DuplicateEmail { email: email.clone() });
      }
    }

    let user = users
      .iter_mut()
      .find(|u| u.id == id)
      .ok_or(RosterError::NotFound { id })?;

    if let Some(full_name) = changes.full_name {
      user.full_name = full_name;
    }
    if let Some(email) = changes.email {
      user.email = email;
    }
    if let Some(age) = changes.age {
      user.age = age;
    }
    if let Some(allergies) = changes.allergies {
      user.allergies = allergies;
    }

    let updated = user.clone();
    write_users(&self.path, &users)?;
    Ok(updated)
  }

  /// Activate or deactivate a record without deleting it.
  pub fn set_active(&mut self, id: Uuid, active: bool) -> Result<UserRecord, RosterError> {
    let mut users = self.list()?;

    let user = users
      .iter_mut()
      .find(|u| u.id == id)
      .ok_or(RosterError::NotFound { id })?;
    user.is_active = active;

    let updated = user.clone();
    write_users(&self.path, &users)?;
    Ok(updated)
  }

  /// Delete one record, returning what was removed.
  pub fn remove(&mut self, id: Uuid) -> Result<UserRecord, RosterError> {
    let mut users = self.list()?;

    let position = users
      .iter()
      .position(|u| u.id == id)
      .ok_or(RosterError::NotFound { id })?;
    let removed = users.remove(position);

    write_users(&self.path, &users)?;

    debug!(user = %removed.id, "removed user");
    Ok(removed)
  }
}

fn read_users(path: &Path) -> Result<Vec<UserRecord>, RosterError> {
  let raw = fs::read_to_string(path)
    .map_err(|source| RosterError::Unreadable { path: path.to_path_buf(), source })?;
  serde_json::from_str(&raw)
    .map_err(|source| RosterError::Corrupt { path: path.to_path_buf(), source })
}

fn write_users(path: &Path, users: &[UserRecord]) -> Result<(), RosterError> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)
      .map_err(|source| RosterError::Unwritable { path: path.to_path_buf(), source })?;
  }

  let raw = serde_json::to_string_pretty(users)
    .map_err(|source| RosterError::Corrupt { path: path.to_path_buf(), source })?;
  fs::write(path, raw)
    .map_err(|source| RosterError::Unwritable { path: path.to_path_buf(), source })
}
