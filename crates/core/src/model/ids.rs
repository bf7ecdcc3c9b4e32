use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::error::ModelError;

/// Number of challenges offered by the game.
pub const CHALLENGE_COUNT: usize = 8;

/// Index of one of the fixed challenges (`0..CHALLENGE_COUNT`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChallengeId(u8);

impl ChallengeId {
    /// Creates a `ChallengeId`, rejecting indexes outside the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::ChallengeOutOfRange` if `index >= CHALLENGE_COUNT`.
    pub fn new(index: usize) -> Result<Self, ModelError> {
        if index >= CHALLENGE_COUNT {
            return Err(ModelError::ChallengeOutOfRange {
                index,
                count: CHALLENGE_COUNT,
            });
        }
        let value = u8::try_from(index).map_err(|_| ModelError::ChallengeOutOfRange {
            index,
            count: CHALLENGE_COUNT,
        })?;
        Ok(Self(value))
    }

    /// Returns the zero-based index.
    #[must_use]
    pub fn index(&self) -> usize {
        usize::from(self.0)
    }

    /// Iterates every challenge in display order.
    pub fn all() -> impl Iterator<Item = ChallengeId> {
        (0..CHALLENGE_COUNT).filter_map(|index| ChallengeId::new(index).ok())
    }

    /// Human readable label, e.g. `Challenge 3` for index 2.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Challenge {}", self.index() + 1)
    }
}

/// Opaque identifier handed out by the identity provider.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Wraps an existing identifier.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::EmptyUserId` for blank identifiers.
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ModelError::EmptyUserId);
        }
        Ok(Self(value))
    }

    /// Mints a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of a clickable item inside an assessment.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// # Errors
    ///
    /// Returns `ModelError::EmptyItem` if the trimmed value is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyItem);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ─── Debug / Display ───────────────────────────────────────────────────────────

impl fmt::Debug for ChallengeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChallengeId({})", self.0)
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({:?})", self.0)
    }
}

impl fmt::Display for ChallengeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── FromStr ───────────────────────────────────────────────────────────────────

impl FromStr for ChallengeId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let index = s
            .trim()
            .parse::<usize>()
            .map_err(|_| ModelError::ChallengeOutOfRange {
                index: usize::MAX,
                count: CHALLENGE_COUNT,
            })?;
        ChallengeId::new(index)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
