use anyhow::Result;
use roster::UserStore;

use crate::event::EventLog;
use crate::knowledge::KnowledgeStore;

/// Read-only dashboard counters.
#[derive(Debug)]
pub struct Stats {
  pub registered_users: usize,
  pub active_users: usize,
  pub feedback_events: usize,
  /// Mean of all recorded ratings; `None` before any feedback exists.
  pub average_rating: Option<f64>,
  /// Condition keyword and how many drugs it currently lists.
  pub conditions: Vec<(String, usize)>,
}

/// Gather counters from all three stores.
pub fn gather(events: &EventLog, knowledge: &KnowledgeStore, users: &UserStore) -> Result<Stats> {
  let all_users = users.list()?;
  let all_events = events.events()?;

  let average_rating = if all_events.is_empty() {
    None
  } else {
    let total: u64 = all_events.iter().map(|e| u64::from(e.rating)).sum();
    Some(total as f64 / all_events.len() as f64)
  };

  let conditions = knowledge
    .snapshot()?
    .into_iter()
    .map(|(condition, drugs)| (condition, drugs.len()))
    .collect();

  Ok(Stats {
    registered_users: all_users.len(),
    active_users: all_users.iter().filter(|u| u.is_active).count(),
    feedback_events: all_events.len(),
    average_rating,
    conditions,
  })
}
