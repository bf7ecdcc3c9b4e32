mod auth;
mod game;
mod gate;
mod state;

#[cfg(test)]
mod game_intent_smoke;
#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use auth::AuthView;
pub use game::GameView;
pub use gate::SessionGate;
pub use state::{ViewError, ViewState, view_state_from_resource};
