//! Full-screen terminal UI shell: settings form, guess input, feedback line
//! and a scrollable log of past guesses.

pub mod app;
pub mod renderer;

pub use app::App;

use anyhow::Result;

use crate::core::scores::HighScoreStore;

/// Run the terminal UI until the player quits.
pub fn run(store: HighScoreStore) -> Result<()> {
    let terminal = ratatui::init();
    let result = App::new(store).run(terminal);
    ratatui::restore();
    result
}
