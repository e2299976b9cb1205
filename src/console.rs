//! Plain text console shell: the classic prompt-driven menu loop.

use std::io::{self, Write};

use anyhow::{bail, Result};
use tracing::debug;

use crate::core::reverse::{Feedback, ReverseSession, ReverseState};
use crate::core::scores::{HighScoreStore, LoadStatus, SaveOutcome};
use crate::core::session::{GuessingSession, Outcome, TwoPlayerMatch};
use crate::core::settings::Difficulty;

/// Console rounds play over 1..=10, like the terminal UI plays over 1..=100.
const UPPER_BOUND: i64 = 10;

/// Top-level menu loop. Returns when the player chooses to exit.
pub fn run(store: &HighScoreStore) -> Result<()> {
    show_instructions();
    loop {
        match prompt_menu_choice()? {
            0 => {
                println!("Thanks for playing!");
                return Ok(());
            }
            1 => play_single(store)?,
            2 => play_reverse()?,
            3 => play_two_player()?,
            _ => unreachable!(),
        }

        if !prompt_yes_no("Do you want to play again?")? {
            println!("Thanks for playing!");
            return Ok(());
        }
    }
}

fn show_instructions() {
    println!("\n--- How to Play ---");
    println!("In this game, you try to guess a secret number.");
    println!("I'll tell you if your guess is too high or too low.");
    println!("You can choose the difficulty, which sets the number of attempts.");
    println!("Try to guess the number in as few attempts as possible!");
}

fn play_single(store: &HighScoreStore) -> Result<()> {
    let name = prompt_line("Enter Player 1's name:")?;
    let max_attempts = prompt_difficulty()?;
    let hints_enabled = prompt_yes_no("Enable hints?")?;

    let mut session = GuessingSession::new(UPPER_BOUND, max_attempts, hints_enabled);
    debug!(secret = session.target(), max_attempts, "single-player round started");
    if max_attempts > 0 {
        println!("You have {max_attempts} attempts to guess the number.");
    }

    loop {
        let guess = prompt_int(&format!("Guess a number between 1 and {UPPER_BOUND}:"))?;
        match session.submit_guess(guess) {
            Outcome::TooLow => println!("Sorry, guess again. Too low."),
            Outcome::TooHigh => println!("Sorry, guess again. Too high."),
            Outcome::Correct => {
                println!(
                    "🎉 Congrats, {name}! You guessed the number {} in {} guesses!",
                    session.target(),
                    session.attempts_used()
                );
                if !name.is_empty() {
                    save_score(store, &name, session.attempts_used());
                }
                break;
            }
            Outcome::OutOfAttempts => {
                println!(
                    "😞 Sorry, you've run out of attempts. The number was {}.",
                    session.target()
                );
                break;
            }
        }
        if let Some(parity) = session.hint() {
            println!("Hint: The number is {parity}.");
        }
    }

    display_high_scores(store);
    Ok(())
}

fn play_reverse() -> Result<()> {
    println!("Think of a number between 1 and {UPPER_BOUND} and I'll guess it.");
    let mut session = ReverseSession::new(UPPER_BOUND);

    loop {
        println!("Is your number {}?", session.next_guess());
        let feedback = prompt_feedback()?;
        match session.apply_feedback(feedback) {
            ReverseState::Guessing => {}
            ReverseState::Found(n) => {
                println!(
                    "🎉 Yay! I guessed your number, {n}, correctly in {} rounds!",
                    session.rounds()
                );
                return Ok(());
            }
            ReverseState::Inconsistent => {
                println!("Hmm, those answers contradict each other. No number fits!");
                return Ok(());
            }
        }
    }
}

fn play_two_player() -> Result<()> {
    let player1 = prompt_line("Enter Player 1's name:")?;
    let player2 = prompt_line("Enter Player 2's name:")?;
    let max_attempts = prompt_difficulty()?;
    println!("Okay, {player1} and {player2}, let's begin!");

    let mut game = TwoPlayerMatch::new([player1, player2], UPPER_BOUND, max_attempts);
    if max_attempts > 0 {
        println!("You share {max_attempts} attempts between you.");
    }

    loop {
        // Resolve the active player before the guess goes in; a winning guess
        // does not flip the turn.
        let player = game.current_player().to_string();
        println!("\nIt's {player}'s turn.");
        let guess = prompt_int(&format!("Guess a number between 1 and {UPPER_BOUND}:"))?;
        match game.submit_guess(guess) {
            Outcome::TooLow => println!("Sorry, guess again. Too low."),
            Outcome::TooHigh => println!("Sorry, guess again. Too high."),
            Outcome::Correct => {
                println!("🎉🎉🎉 {player} wins! 🎉🎉🎉");
                println!(
                    "The number was {}, found in {} guesses.",
                    game.session().target(),
                    game.session().attempts_used()
                );
                return Ok(());
            }
            Outcome::OutOfAttempts => {
                println!("😞😞😞 You both lose! 😞😞😞");
                println!("The number was {}.", game.session().target());
                return Ok(());
            }
        }
    }
}

fn save_score(store: &HighScoreStore, name: &str, attempts: u32) {
    match store.record(name, attempts) {
        Ok(SaveOutcome::NewHighScore) => println!("New high score!"),
        Ok(SaveOutcome::Saved) => println!("Score saved!"),
        Ok(SaveOutcome::NotImproved) => {}
        Err(e) => println!("Error writing high scores to file: {e}"),
    }
}

/// Print the stored score table. Shared with the `scores` subcommand.
pub fn display_high_scores(store: &HighScoreStore) {
    let (scores, status) = match store.load() {
        Ok(loaded) => loaded,
        Err(e) => {
            println!("Error reading high scores: {e}");
            return;
        }
    };
    match status {
        LoadStatus::Missing => {
            println!("No high scores available yet.");
            return;
        }
        LoadStatus::Corrupt => {
            println!("Error reading high scores. The file may be corrupted.");
            return;
        }
        LoadStatus::Loaded => {}
    }
    if scores.is_empty() {
        println!("No high scores available yet.");
        return;
    }

    println!("\n--- High Scores ---");
    for (player, attempts) in &scores {
        println!("{player}: {attempts} guesses");
    }
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt} ");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        bail!("stdin closed");
    }
    Ok(line.trim().to_string())
}

fn prompt_int(prompt: &str) -> Result<i64> {
    loop {
        match prompt_line(prompt)?.parse::<i64>() {
            Ok(n) => return Ok(n),
            Err(_) => println!("❌ Invalid input. Please enter a number."),
        }
    }
}

fn prompt_yes_no(prompt: &str) -> Result<bool> {
    loop {
        match prompt_line(&format!("{prompt} (yes/no):"))?.to_lowercase().as_str() {
            "yes" | "y" => return Ok(true),
            "no" | "n" => return Ok(false),
            _ => println!("Invalid input. Please enter 'yes' or 'no'."),
        }
    }
}

fn prompt_menu_choice() -> Result<u32> {
    loop {
        println!("\nChoose a game:");
        println!("1. Guess the number");
        println!("2. Let the computer guess your number");
        println!("3. Two-player guess the number");
        println!("0. Exit");
        let choice = prompt_int("Enter your choice:")?;
        if (0..=3).contains(&choice) {
            return Ok(choice as u32);
        }
        println!("Invalid input. Please enter 0, 1, 2, or 3.");
    }
}

fn prompt_difficulty() -> Result<u32> {
    loop {
        println!("Choose difficulty:");
        println!("1. Easy (10 attempts)");
        println!("2. Medium (5 attempts)");
        println!("3. Hard (3 attempts)");
        println!("4. Custom attempts");
        match prompt_int("Enter your choice:")? {
            1 => return Ok(Difficulty::Easy.max_attempts()),
            2 => return Ok(Difficulty::Medium.max_attempts()),
            3 => return Ok(Difficulty::Hard.max_attempts()),
            4 => loop {
                let attempts = prompt_int("Enter the number of attempts:")?;
                match u32::try_from(attempts) {
                    Ok(n) if n > 0 => return Ok(Difficulty::Custom(n).max_attempts()),
                    _ => println!("Number of attempts must be positive."),
                }
            },
            _ => println!("Invalid input. Please enter 1, 2, 3, or 4."),
        }
    }
}

fn prompt_feedback() -> Result<Feedback> {
    loop {
        match prompt_line("Is that too high (H), too low (L), or correct (C)?")?
            .to_lowercase()
            .as_str()
        {
            "h" => return Ok(Feedback::TooHigh),
            "l" => return Ok(Feedback::TooLow),
            "c" => return Ok(Feedback::Correct),
            _ => println!("Invalid input. Please enter 'H', 'L', or 'C'."),
        }
    }
}
