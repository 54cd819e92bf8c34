use std::path::PathBuf;
use thiserror::Error;

/// A durable store could not be read, decoded, or written.
#[derive(Error, Debug)]
pub enum StorageError {
  #[error("could not locate a home directory for the data root")]
  NoDataRoot,

  #[error("failed to read {}: {source}", .path.display())]
  Unreadable { path: PathBuf, source: std::io::Error },

  #[error("failed to write {}: {source}", .path.display())]
  Unwritable { path: PathBuf, source: std::io::Error },

  #[error("corrupt store at {}: {source}", .path.display())]
  Corrupt { path: PathBuf, source: serde_json::Error },
}

/// A feedback submission was rejected before anything was persisted.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
  #[error("rating {0} is outside the accepted 1-5 range")]
  RatingOutOfRange(u8),

  #[error("a compatibility flag only applies to image submissions")]
  CompatibilityWithoutImage,
}

/// Everything that can go wrong while recording one feedback submission.
#[derive(Error, Debug)]
pub enum FeedbackError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error(transparent)]
  Storage(#[from] StorageError),
}
