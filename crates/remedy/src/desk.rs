use std::path::Path;

use crate::error::{FeedbackError, StorageError};
use crate::event::{EventLog, FeedbackEvent, FeedbackSubmission};
use crate::knowledge::KnowledgeStore;

/// What one recorded submission did.
#[derive(Debug)]
pub struct RecordOutcome {
  pub event: FeedbackEvent,
  /// Conditions whose drug lists changed as a result of this rating.
  pub adjusted_conditions: Vec<String>,
}

/// Single entry point of the feedback loop: durably appends each submission
/// to the event log, then nudges the knowledge base from its rating.
///
/// `record` takes `&mut self`, so one in-process caller at a time holds the
/// stores for a full read-modify-write. Separate OS processes racing on the
/// same files still last-writer-win.
#[derive(Debug)]
pub struct FeedbackDesk {
  events: EventLog,
  knowledge: KnowledgeStore,
}

impl FeedbackDesk {
  /// Open both stores under `root`, creating either one if absent.
  pub fn open_or_create(root: &Path) -> Result<Self, StorageError> {
    Ok(Self {
      events: EventLog::open_or_create(root)?,
      knowledge: KnowledgeStore::open_or_create(root)?,
    })
  }

  /// Validate, log, and reinforce one feedback submission.
  pub fn record(&mut self, submission: FeedbackSubmission) -> Result<RecordOutcome, FeedbackError> {
    submission.validate()?;

    let event = self.events.append(submission)?;
    let adjusted_conditions =
      self.knowledge.reinforce(&event.symptoms, &event.recommended_drug, event.rating)?;

    Ok(RecordOutcome { event, adjusted_conditions })
  }
}
