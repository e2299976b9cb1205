pub mod core {
	pub mod reverse;
	pub mod scores;
	pub mod session;
	pub mod settings;
}

pub mod cli;
pub mod console;
pub mod tui;

// Re-export for convenience
pub use crate::core::reverse::{Feedback, ReverseSession, ReverseState};
pub use crate::core::scores::{HighScoreStore, ScoreTable};
pub use crate::core::session::{GuessingSession, Outcome, TwoPlayerMatch};
