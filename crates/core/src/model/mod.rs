mod assessment;
mod game;
mod identity;
mod ids;
mod progress;

pub use assessment::AssessmentKind;
pub use game::{GameState, Screen};
pub use identity::Identity;
pub use ids::{CHALLENGE_COUNT, ChallengeId, ItemId, UserId};
pub use progress::{
    ChallengeCompletion, ClickSet, ClickState, CompletionState, Mutation, Progress,
};
