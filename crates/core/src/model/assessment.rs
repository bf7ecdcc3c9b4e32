use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::model::ids::ItemId;

/// One of the three sub-assessments every challenge is made of.
///
/// Kinds are ordered the way the game presents them: skin and risk can be
/// worked in any order, injury prevention unlocks once both are done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentKind {
    Skin,
    Risk,
    Injury,
}

impl AssessmentKind {
    pub const ALL: [AssessmentKind; 3] = [Self::Skin, Self::Risk, Self::Injury];

    /// Number of distinct items that must be activated to finish the assessment.
    #[must_use]
    pub const fn required_items(self) -> usize {
        match self {
            Self::Skin => 4,
            Self::Risk => 3,
            Self::Injury => 2,
        }
    }

    /// Wire name used in persisted documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Skin => "skin",
            Self::Risk => "risk",
            Self::Injury => "injury",
        }
    }

    /// Button label on the challenge detail view.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Skin => "Skin Assessment",
            Self::Risk => "Risk Assessment",
            Self::Injury => "Injury Prevention",
        }
    }

    /// Items offered by this assessment, labelled `Item 1..=N`.
    #[must_use]
    pub fn items(self) -> Vec<ItemId> {
        (1..=self.required_items())
            .filter_map(|n| ItemId::new(format!("Item {n}")).ok())
            .collect()
    }

    /// Returns true if `item` is one of the items this assessment offers.
    #[must_use]
    pub fn offers(self, item: &ItemId) -> bool {
        item.as_str()
            .strip_prefix("Item ")
            .and_then(|n| n.parse::<usize>().ok())
            .is_some_and(|n| (1..=self.required_items()).contains(&n))
    }

    /// Injury prevention is gated behind the other two assessments.
    #[must_use]
    pub const fn requires_prerequisites(self) -> bool {
        matches!(self, Self::Injury)
    }
}

impl fmt::Display for AssessmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssessmentKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skin" => Ok(Self::Skin),
            "risk" => Ok(Self::Risk),
            "injury" => Ok(Self::Injury),
            other => Err(ModelError::UnknownAssessment(other.to_owned())),
        }
    }
}
