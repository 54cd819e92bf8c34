use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{StorageError, ValidationError};
use crate::store;

/// File name of the event log under the data root.
pub const EVENT_LOG_FILE: &str = "feedback_log.json";

/// How the user supplied their symptoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
  Text,
  Voice,
  Image,
}

/// One user rating of one drug recommendation, as stored in the event log.
///
/// Events are immutable once appended; they are never edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEvent {
  /// Assigned by the log at append time, not by the caller.
  pub timestamp: DateTime<Utc>,
  pub user_id: String,
  pub symptoms: String,
  pub recommended_drug: String,
  pub rating: u8,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub feedback_text: Option<String>,
  pub input_type: InputType,
  /// Pill-image compatibility verdict; only meaningful for image input.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_compatible: Option<bool>,
}

/// A feedback submission before it has been stamped and appended.
#[derive(Debug, Clone)]
pub struct FeedbackSubmission {
  pub user_id: String,
  pub symptoms: String,
  pub recommended_drug: String,
  pub rating: u8,
  pub feedback_text: Option<String>,
  pub input_type: InputType,
  pub is_compatible: Option<bool>,
}

impl FeedbackSubmission {
  /// Reject out-of-range or misplaced fields before anything is persisted.
  pub fn validate(&self) -> Result<(), ValidationError> {
    if !(1..=5).contains(&self.rating) {
      return Err(ValidationError::RatingOutOfRange(self.rating));
    }
    if self.is_compatible.is_some() && self.input_type != InputType::Image {
      return Err(ValidationError::CompatibilityWithoutImage);
    }
    Ok(())
  }

  fn into_event(self, timestamp: DateTime<Utc>) -> FeedbackEvent {
    FeedbackEvent {
      timestamp,
      user_id: self.user_id,
      symptoms: self.symptoms,
      recommended_drug: self.recommended_drug,
      rating: self.rating,
      feedback_text: self.feedback_text,
      input_type: self.input_type,
      is_compatible: self.is_compatible,
    }
  }
}

/// Append-only log of feedback events, rewritten in full on each append.
#[derive(Debug)]
pub struct EventLog {
  path: PathBuf,
}

impl EventLog {
  /// Open the event log under `root`, creating an empty one if absent.
  pub fn open_or_create(root: &Path) -> Result<Self, StorageError> {
    let path = root.join(EVENT_LOG_FILE);

    if !path.exists() {
      store::write_json(&path, &Vec::<FeedbackEvent>::new())?;
      debug!("created empty event log at {}", path.display());
    }

    Ok(Self { path })
  }

  /// All recorded events, oldest first.
  pub fn events(&self) -> Result<Vec<FeedbackEvent>, StorageError> {
    store::read_json(&self.path)
  }

  /// Number of recorded events.
  pub fn count(&self) -> Result<usize, StorageError> {
    Ok(self.events()?.len())
  }

  /// Stamp a submission with the current time and durably append it.
  ///
  /// The whole sequence is loaded, extended, and rewritten; a failed write
  /// leaves no partial event behind.
  pub(crate) fn append(&mut self, submission: FeedbackSubmission) -> Result<FeedbackEvent, StorageError> {
    let mut events = self.events()?;
    let event = submission.into_event(Utc::now());
    events.push(event.clone());
    store::write_json(&self.path, &events)?;

    debug!(user = %event.user_id, drug = %event.recommended_drug, "appended feedback event");
    Ok(event)
  }
}
