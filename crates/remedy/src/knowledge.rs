use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::StorageError;
use crate::store;

/// File name of the knowledge mapping under the data root.
pub const KNOWLEDGE_FILE: &str = "knowledge.json";

/// Condition keyword → ordered drug names. Keywords are lowercase; a drug
/// appears at most once per condition, in insertion order.
pub type KnowledgeMap = BTreeMap<String, Vec<String>>;

/// The mapping seeded on first use. Feedback processing only ever changes
/// the drug lists; the key set stays fixed after seeding.
pub fn default_knowledge() -> KnowledgeMap {
  let seed = [
    ("headache", vec!["Paracetamol", "Ibuprofen", "Aspirin"]),
    ("fever", vec!["Paracetamol", "Ibuprofen"]),
    ("pain", vec!["Ibuprofen", "Naproxen", "Aspirin"]),
    ("inflammation", vec!["Ibuprofen", "Naproxen"]),
    ("allergy", vec!["Loratadine", "Cetirizine"]),
  ];

  seed
    .into_iter()
    .map(|(condition, drugs)| {
      (condition.to_string(), drugs.into_iter().map(str::to_string).collect())
    })
    .collect()
}

/// Persisted condition→drug mapping, adjusted after each feedback event.
#[derive(Debug)]
pub struct KnowledgeStore {
  path: PathBuf,
}

impl KnowledgeStore {
  /// Open the mapping under `root`, seeding the defaults if absent.
  pub fn open_or_create(root: &Path) -> Result<Self, StorageError> {
    let path = root.join(KNOWLEDGE_FILE);

    if !path.exists() {
      store::write_json(&path, &default_knowledge())?;
      debug!("seeded default knowledge base at {}", path.display());
    }

    Ok(Self { path })
  }

  /// The full current mapping.
  pub fn snapshot(&self) -> Result<KnowledgeMap, StorageError> {
    store::read_json(&self.path)
  }

  /// Apply one rating to every condition keyword contained in `symptoms`.
  ///
  /// A rating of 4 or 5 appends the drug to each matching condition's list
  /// if absent; 1 or 2 removes it if present; 3 changes nothing. The whole
  /// mapping is rewritten either way. Returns the conditions whose lists
  /// actually changed.
  pub fn reinforce(
    &mut self,
    symptoms: &str,
    recommended_drug: &str,
    rating: u8,
  ) -> Result<Vec<String>, StorageError> {
    let mut knowledge = self.snapshot()?;
    let normalized = symptoms.to_lowercase();
    let mut adjusted = Vec::new();

    for (condition, drugs) in knowledge.iter_mut() {
      if !normalized.contains(condition.as_str()) {
        continue;
      }

      match rating {
        r if r >= 4 => {
          if !drugs.iter().any(|d| d == recommended_drug) {
            drugs.push(recommended_drug.to_string());
            adjusted.push(condition.clone());
            debug!(condition = %condition, drug = %recommended_drug, "reinforced drug");
          }
        }
        r if r <= 2 => {
          if let Some(position) = drugs.iter().position(|d| d == recommended_drug) {
            drugs.remove(position);
            adjusted.push(condition.clone());
            debug!(condition = %condition, drug = %recommended_drug, "penalized drug");
          }
        }
        _ => {}
      }
    }

    store::write_json(&self.path, &knowledge)?;
    Ok(adjusted)
  }
}
