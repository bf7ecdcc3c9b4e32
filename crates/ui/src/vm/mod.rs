mod auth_vm;
mod board_vm;

pub use auth_vm::{AuthAction, AuthVm, UNKNOWN_AUTH_ERROR, auth_error_message, submit_auth};
pub use board_vm::{
    AssessmentButtonVm, BoardVm, ChallengeCardVm, DialogVm, ItemButtonVm, map_board,
};
