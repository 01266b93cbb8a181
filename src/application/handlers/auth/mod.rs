//! Auth command handlers: signup orchestration and login forwarding.

mod log_in;
mod sign_up;

pub use log_in::{LogInCommand, LogInHandler};
pub use sign_up::{SignUpCommand, SignUpHandler};
