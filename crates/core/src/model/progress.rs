use std::collections::{BTreeMap, BTreeSet};

use crate::model::assessment::AssessmentKind;
use crate::model::ids::{ChallengeId, ItemId};

//
// ─── MUTATION ──────────────────────────────────────────────────────────────────
//

/// Outcome of a transition; only `Changed` transitions need to be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Mutation {
    Changed,
    Unchanged,
}

impl Mutation {
    #[must_use]
    pub fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }

    fn from_bool(changed: bool) -> Self {
        if changed { Self::Changed } else { Self::Unchanged }
    }
}

//
// ─── COMPLETION ────────────────────────────────────────────────────────────────
//

/// Completion flags for a single challenge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChallengeCompletion {
    pub skin: bool,
    pub risk: bool,
    pub injury: bool,
    pub complete: bool,
}

impl ChallengeCompletion {
    /// Builds flags from the three assessment results, deriving `complete`.
    #[must_use]
    pub fn from_assessments(skin: bool, risk: bool, injury: bool) -> Self {
        Self {
            skin,
            risk,
            injury,
            complete: skin && risk && injury,
        }
    }

    #[must_use]
    pub fn is_done(&self, kind: AssessmentKind) -> bool {
        match kind {
            AssessmentKind::Skin => self.skin,
            AssessmentKind::Risk => self.risk,
            AssessmentKind::Injury => self.injury,
        }
    }

    /// Skin and risk are both finished, so injury prevention may be attempted.
    #[must_use]
    pub fn prerequisites_met(&self) -> bool {
        self.skin && self.risk
    }

    /// Sets the flag for `kind`; returns true if anything flipped.
    fn mark_done(&mut self, kind: AssessmentKind) -> bool {
        let flag = match kind {
            AssessmentKind::Skin => &mut self.skin,
            AssessmentKind::Risk => &mut self.risk,
            AssessmentKind::Injury => &mut self.injury,
        };
        let flipped = !*flag;
        *flag = true;
        let was_complete = self.complete;
        self.complete = self.complete || (self.skin && self.risk && self.injury);
        flipped || was_complete != self.complete
    }
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// Items activated within one assessment.
pub type ClickSet = BTreeSet<ItemId>;

/// Per-challenge click sets keyed by assessment.
pub type ClickState = BTreeMap<ChallengeId, BTreeMap<AssessmentKind, ClickSet>>;

/// Per-challenge completion flags.
pub type CompletionState = BTreeMap<ChallengeId, ChallengeCompletion>;

/// Everything a user has achieved: clicked items and derived completion.
///
/// Click sets only grow and completion flags only turn on; the single way
/// back is [`Progress::reset_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    completion: CompletionState,
    clicks: ClickState,
}

impl Progress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate progress from persisted parts.
    ///
    /// `complete` is re-derived from the three assessment flags so a stored
    /// document can never claim a finished challenge with open assessments.
    #[must_use]
    pub fn from_parts(completion: CompletionState, clicks: ClickState) -> Self {
        let completion = completion
            .into_iter()
            .map(|(id, flags)| {
                (
                    id,
                    ChallengeCompletion::from_assessments(flags.skin, flags.risk, flags.injury),
                )
            })
            .collect();
        Self { completion, clicks }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.completion.is_empty() && self.clicks.is_empty()
    }

    /// Flags for `challenge`; all false if it was never touched.
    #[must_use]
    pub fn completion(&self, challenge: ChallengeId) -> ChallengeCompletion {
        self.completion
            .get(&challenge)
            .copied()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn completion_state(&self) -> &CompletionState {
        &self.completion
    }

    #[must_use]
    pub fn click_state(&self) -> &ClickState {
        &self.clicks
    }

    #[must_use]
    pub fn clicked(&self, challenge: ChallengeId, kind: AssessmentKind) -> Option<&ClickSet> {
        self.clicks.get(&challenge).and_then(|sets| sets.get(&kind))
    }

    #[must_use]
    pub fn is_clicked(&self, challenge: ChallengeId, kind: AssessmentKind, item: &ItemId) -> bool {
        self.clicked(challenge, kind)
            .is_some_and(|set| set.contains(item))
    }

    /// Whether `kind` may be started for `challenge` right now.
    #[must_use]
    pub fn can_start(&self, challenge: ChallengeId, kind: AssessmentKind) -> bool {
        !kind.requires_prerequisites() || self.completion(challenge).prerequisites_met()
    }

    /// Number of fully completed challenges.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completion.values().filter(|flags| flags.complete).count()
    }

    /// Make sure an (empty) click set exists for the pair. Existing progress
    /// is left untouched.
    pub fn ensure_click_set(&mut self, challenge: ChallengeId, kind: AssessmentKind) -> Mutation {
        if !self.can_start(challenge, kind) {
            return Mutation::Unchanged;
        }
        let sets = self.clicks.entry(challenge).or_default();
        if sets.contains_key(&kind) {
            return Mutation::Unchanged;
        }
        sets.insert(kind, ClickSet::new());
        Mutation::Changed
    }

    /// Record a click on `item` and recompute completion for the challenge.
    ///
    /// Clicking an already-clicked item, an item the assessment does not
    /// offer, or an injury item before skin and risk are done is a no-op.
    pub fn click_item(
        &mut self,
        challenge: ChallengeId,
        kind: AssessmentKind,
        item: ItemId,
    ) -> Mutation {
        if !self.can_start(challenge, kind) || !kind.offers(&item) {
            return Mutation::Unchanged;
        }

        let set = self
            .clicks
            .entry(challenge)
            .or_default()
            .entry(kind)
            .or_default();
        let inserted = set.insert(item);
        let reached = set.len() >= kind.required_items();

        let mut flags_changed = false;
        if inserted && !self.completion.contains_key(&challenge) {
            self.completion.insert(challenge, ChallengeCompletion::default());
            flags_changed = true;
        }
        if reached {
            let flags = self.completion.entry(challenge).or_default();
            flags_changed |= flags.mark_done(kind);
        }

        Mutation::from_bool(inserted || flags_changed)
    }

    /// Forget all completion and click state for every challenge.
    ///
    /// Always reports `Changed` so the cleared state gets written even when the
    /// local copy was already empty.
    pub fn reset_all(&mut self) -> Mutation {
        self.completion.clear();
        self.clicks.clear();
        Mutation::Changed
    }
}
