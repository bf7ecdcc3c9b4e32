use crate::model::assessment::AssessmentKind;
use crate::model::ids::{ChallengeId, ItemId};
use crate::model::progress::{Mutation, Progress};

/// What the player is currently looking at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    /// The grid of all challenges.
    #[default]
    Board,
    /// Detail view of one challenge with its three assessment buttons.
    Challenge(ChallengeId),
    /// An open assessment; closing it returns to the challenge detail.
    Assessment(ChallengeId, AssessmentKind),
}

/// Progress plus navigation state for one signed-in player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    progress: Progress,
    screen: Screen,
}

impl GameState {
    #[must_use]
    pub fn new(progress: Progress) -> Self {
        Self {
            progress,
            screen: Screen::Board,
        }
    }

    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Challenge whose detail (or assessment) is open, if any.
    #[must_use]
    pub fn selected_challenge(&self) -> Option<ChallengeId> {
        match self.screen {
            Screen::Board => None,
            Screen::Challenge(id) | Screen::Assessment(id, _) => Some(id),
        }
    }

    pub fn select_challenge(&mut self, challenge: ChallengeId) -> Mutation {
        self.screen = Screen::Challenge(challenge);
        Mutation::Unchanged
    }

    pub fn close_challenge(&mut self) -> Mutation {
        self.screen = Screen::Board;
        Mutation::Unchanged
    }

    /// Open `kind` for `challenge`. Injury prevention stays closed until skin
    /// and risk are complete; the call is then a no-op.
    pub fn start_assessment(&mut self, challenge: ChallengeId, kind: AssessmentKind) -> Mutation {
        if !self.progress.can_start(challenge, kind) {
            return Mutation::Unchanged;
        }
        self.screen = Screen::Assessment(challenge, kind);
        self.progress.ensure_click_set(challenge, kind)
    }

    /// Leave the open assessment and go back to its challenge.
    pub fn close_assessment(&mut self) -> Mutation {
        if let Screen::Assessment(challenge, _) = self.screen {
            self.screen = Screen::Challenge(challenge);
        }
        Mutation::Unchanged
    }

    pub fn click_item(
        &mut self,
        challenge: ChallengeId,
        kind: AssessmentKind,
        item: ItemId,
    ) -> Mutation {
        self.progress.click_item(challenge, kind, item)
    }

    pub fn reset_all(&mut self) -> Mutation {
        self.screen = Screen::Board;
        self.progress.reset_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn challenge(index: usize) -> ChallengeId {
        ChallengeId::new(index).unwrap()
    }

    fn item(n: usize) -> ItemId {
        ItemId::new(format!("Item {n}")).unwrap()
    }

    #[test]
    fn selecting_a_challenge_does_not_touch_progress() {
        let mut game = GameState::default();
        assert_eq!(game.select_challenge(challenge(4)), Mutation::Unchanged);
        assert_eq!(game.screen(), Screen::Challenge(challenge(4)));
        assert!(game.progress().is_empty());
        let _ = game.close_challenge();
        assert_eq!(game.screen(), Screen::Board);
    }

    #[test]
    fn start_assessment_opens_view_and_initializes_once() {
        let mut game = GameState::default();
        let c = challenge(0);
        let _ = game.select_challenge(c);
        assert_eq!(
            game.start_assessment(c, AssessmentKind::Skin),
            Mutation::Changed
        );
        assert_eq!(game.screen(), Screen::Assessment(c, AssessmentKind::Skin));
        let _ = game.click_item(c, AssessmentKind::Skin, item(1));

        let _ = game.close_assessment();
        assert_eq!(game.screen(), Screen::Challenge(c));
        assert_eq!(
            game.start_assessment(c, AssessmentKind::Skin),
            Mutation::Unchanged
        );
        assert_eq!(
            game.progress().clicked(c, AssessmentKind::Skin).map(|s| s.len()),
            Some(1)
        );
    }

    #[test]
    fn locked_injury_keeps_the_challenge_view() {
        let mut game = GameState::default();
        let c = challenge(1);
        let _ = game.select_challenge(c);
        assert_eq!(
            game.start_assessment(c, AssessmentKind::Injury),
            Mutation::Unchanged
        );
        assert_eq!(game.screen(), Screen::Challenge(c));
    }

    #[test]
    fn reset_returns_to_board() {
        let mut game = GameState::default();
        let c = challenge(0);
        let _ = game.start_assessment(c, AssessmentKind::Risk);
        let _ = game.click_item(c, AssessmentKind::Risk, item(1));
        assert_eq!(game.reset_all(), Mutation::Changed);
        assert_eq!(game.screen(), Screen::Board);
        assert!(game.progress().is_empty());
        assert_eq!(game.selected_challenge(), None);
    }
}
