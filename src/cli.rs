use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::console;
use crate::core::scores::{self, HighScoreStore};
use crate::tui;

#[derive(Parser)]
#[command(name = "numguess")]
#[command(about = "🎯 Number guessing games for the terminal")]
#[command(version)]
pub struct Cli {
    /// Where high scores are kept
    #[arg(long, value_name = "FILE", default_value = scores::SCORE_FILE)]
    pub scores_file: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play in the full-screen terminal UI
    Tui,
    /// Play at the plain console prompt
    Console,
    /// Show the saved high scores
    Scores,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let store = HighScoreStore::new(cli.scores_file);

    match cli.command {
        Some(Commands::Tui) => tui::run(store),
        // No subcommand drops into the console menu.
        Some(Commands::Console) | None => console::run(&store),
        Some(Commands::Scores) => {
            console::display_high_scores(&store);
            Ok(())
        }
    }
}
