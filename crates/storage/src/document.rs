//! Persisted JSON shape of a user's progress.
//!
//! ```json
//! {
//!   "assessmentCompletion": { "0": { "skin": true, "risk": false, "injury": false, "complete": false } },
//!   "clickedItems": { "0": { "skin": ["Item 1", "Item 2"] } }
//! }
//! ```
//!
//! Click sets are stored as arrays; challenge indexes are stringified keys.

use std::collections::BTreeMap;

use nurse_core::model::{
    AssessmentKind, ChallengeCompletion, ChallengeId, ClickSet, ClickState, CompletionState,
    ItemId, Progress,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::repository::StorageError;

/// Stored completion flags for one challenge. Missing flags read as false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionRecord {
    pub skin: bool,
    pub risk: bool,
    pub injury: bool,
    pub complete: bool,
}

impl From<ChallengeCompletion> for CompletionRecord {
    fn from(flags: ChallengeCompletion) -> Self {
        Self {
            skin: flags.skin,
            risk: flags.risk,
            injury: flags.injury,
            complete: flags.complete,
        }
    }
}

/// The whole per-user document as written to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDocument {
    #[serde(default)]
    pub assessment_completion: BTreeMap<String, CompletionRecord>,
    #[serde(default)]
    pub clicked_items: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl ProgressDocument {
    #[must_use]
    pub fn from_progress(progress: &Progress) -> Self {
        let assessment_completion = progress
            .completion_state()
            .iter()
            .map(|(id, flags)| (id.to_string(), CompletionRecord::from(*flags)))
            .collect();

        let clicked_items = progress
            .click_state()
            .iter()
            .map(|(id, sets)| {
                let sets = sets
                    .iter()
                    .map(|(kind, set)| {
                        let items = set.iter().map(|item| item.as_str().to_owned()).collect();
                        (kind.as_str().to_owned(), items)
                    })
                    .collect();
                (id.to_string(), sets)
            })
            .collect();

        Self {
            assessment_completion,
            clicked_items,
        }
    }

    /// Convert back into domain progress.
    ///
    /// Entries that do not name a known challenge, assessment or a non-empty
    /// item are dropped with a warning rather than failing the whole load.
    #[must_use]
    pub fn into_progress(self) -> Progress {
        let mut completion = CompletionState::new();
        for (key, record) in self.assessment_completion {
            let Some(id) = parse_challenge(&key) else {
                continue;
            };
            completion.insert(
                id,
                ChallengeCompletion {
                    skin: record.skin,
                    risk: record.risk,
                    injury: record.injury,
                    complete: record.complete,
                },
            );
        }

        let mut clicks = ClickState::new();
        for (key, sets) in self.clicked_items {
            let Some(id) = parse_challenge(&key) else {
                continue;
            };
            for (kind_name, items) in sets {
                let kind = match kind_name.parse::<AssessmentKind>() {
                    Ok(kind) => kind,
                    Err(err) => {
                        warn!(challenge = %key, error = %err, "skipping stored click set");
                        continue;
                    }
                };
                let set: ClickSet = items
                    .into_iter()
                    .filter_map(|raw| ItemId::new(raw).ok())
                    .collect();
                clicks.entry(id).or_default().insert(kind, set);
            }
        }

        Progress::from_parts(completion, clicks)
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the document cannot be encoded.
    pub fn to_value(&self) -> Result<Value, StorageError> {
        serde_json::to_value(self).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the JSON does not have the
    /// expected shape.
    pub fn from_value(value: Value) -> Result<Self, StorageError> {
        serde_json::from_value(value).map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

fn parse_challenge(key: &str) -> Option<ChallengeId> {
    match key.parse::<ChallengeId>() {
        Ok(id) => Some(id),
        Err(err) => {
            warn!(challenge = %key, error = %err, "skipping stored challenge entry");
            None
        }
    }
}
