use crate::error::StorageError;
use crate::knowledge::KnowledgeStore;

/// Drugs currently associated with one condition matched in symptom text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
  pub condition: String,
  pub drugs: Vec<String>,
}

/// Match free-text symptoms against the knowledge base.
///
/// Matching is lowercase unanchored containment of each condition keyword,
/// the same rule the reinforcement pass uses. No match is an empty list,
/// not an error.
pub fn suggest(knowledge: &KnowledgeStore, symptoms: &str) -> Result<Vec<Suggestion>, StorageError> {
  let normalized = symptoms.to_lowercase();

  Ok(
    knowledge
      .snapshot()?
      .into_iter()
      .filter(|(condition, _)| normalized.contains(condition.as_str()))
      .map(|(condition, drugs)| Suggestion { condition, drugs })
      .collect(),
  )
}
