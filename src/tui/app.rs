use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::style::Color;
use ratatui::DefaultTerminal;
use tracing::debug;

use crate::core::scores::{HighScoreStore, SaveOutcome};
use crate::core::session::{GuessingSession, Outcome, TwoPlayerMatch};
use crate::core::settings::{Difficulty, GameMode, GameSettings};

use super::renderer;

/// Terminal UI rounds play over 1..=100.
const UPPER_BOUND: i64 = 100;

/// Colors the feedback line cycles through after a wrong guess.
pub const FLASH_COLORS: [Color; 5] = [
    Color::Reset,
    Color::Red,
    Color::Green,
    Color::Blue,
    Color::Magenta,
];

/// One color step every 200ms, one full cycle, then back to normal.
const FLASH_STEP: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Settings,
    Playing,
    GameOver,
}

/// Field order in the settings form.
pub const FIELD_NAME: usize = 0;
pub const FIELD_DIFFICULTY: usize = 1;
pub const FIELD_CUSTOM: usize = 2;
pub const FIELD_HINTS: usize = 3;
pub const FIELD_MODE: usize = 4;
const FIELD_COUNT: usize = 5;

pub const DIFFICULTY_CHOICES: [Difficulty; 3] =
    [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

/// The settings form the player fills in before the first round.
pub struct SettingsForm {
    pub focus: usize,
    pub name: String,
    /// 0..=2 index into [`DIFFICULTY_CHOICES`], 3 = custom.
    pub difficulty_index: usize,
    pub custom_attempts: String,
    pub hints_enabled: bool,
    pub mode: GameMode,
    pub error: Option<String>,
}

impl SettingsForm {
    fn new() -> Self {
        Self {
            focus: FIELD_NAME,
            name: String::new(),
            difficulty_index: 0,
            custom_attempts: String::new(),
            hints_enabled: false,
            mode: GameMode::Single,
            error: None,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.difficulty_index == 3
    }

    fn field_visible(&self, field: usize) -> bool {
        field != FIELD_CUSTOM || self.is_custom()
    }

    fn focus_next(&mut self) {
        loop {
            self.focus = (self.focus + 1) % FIELD_COUNT;
            if self.field_visible(self.focus) {
                break;
            }
        }
    }

    fn focus_prev(&mut self) {
        loop {
            self.focus = (self.focus + FIELD_COUNT - 1) % FIELD_COUNT;
            if self.field_visible(self.focus) {
                break;
            }
        }
    }

    fn cycle(&mut self, forward: bool) {
        match self.focus {
            FIELD_DIFFICULTY => {
                let n = DIFFICULTY_CHOICES.len() + 1;
                self.difficulty_index = if forward {
                    (self.difficulty_index + 1) % n
                } else {
                    (self.difficulty_index + n - 1) % n
                };
            }
            FIELD_HINTS => self.hints_enabled = !self.hints_enabled,
            FIELD_MODE => {
                self.mode = match self.mode {
                    GameMode::Single => GameMode::TwoPlayer,
                    GameMode::TwoPlayer => GameMode::Single,
                };
            }
            _ => {}
        }
    }

    fn type_char(&mut self, c: char) {
        match self.focus {
            FIELD_NAME => {
                if self.name.len() < 20 && (c.is_alphanumeric() || c == ' ') {
                    self.name.push(c);
                }
            }
            FIELD_CUSTOM => {
                if self.custom_attempts.len() < 4 && c.is_ascii_digit() {
                    self.custom_attempts.push(c);
                }
            }
            _ => {}
        }
    }

    fn backspace(&mut self) {
        match self.focus {
            FIELD_NAME => {
                self.name.pop();
            }
            FIELD_CUSTOM => {
                self.custom_attempts.pop();
            }
            _ => {}
        }
    }

    /// Validate the form into settings for a round, or leave an error to show.
    fn build_settings(&mut self) -> Option<GameSettings> {
        let max_attempts = if self.is_custom() {
            match self.custom_attempts.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    self.error = Some("Attempts must be a positive number.".to_string());
                    return None;
                }
            }
        } else {
            DIFFICULTY_CHOICES[self.difficulty_index].max_attempts()
        };

        self.error = None;
        Some(GameSettings {
            player_name: self.name.trim().to_string(),
            max_attempts,
            hints_enabled: self.hints_enabled,
            mode: self.mode,
            upper_bound: UPPER_BOUND,
        })
    }
}

/// The round currently on screen.
pub enum Round {
    Single(GuessingSession),
    TwoPlayer(TwoPlayerMatch),
}

impl Round {
    fn from_settings(settings: &GameSettings) -> Self {
        let session = GuessingSession::new(
            settings.upper_bound,
            settings.max_attempts,
            settings.hints_enabled,
        );
        match settings.mode {
            GameMode::Single => Round::Single(session),
            GameMode::TwoPlayer => {
                let player1 = if settings.player_name.is_empty() {
                    "Player 1".to_string()
                } else {
                    settings.player_name.clone()
                };
                Round::TwoPlayer(TwoPlayerMatch::with_session(
                    [player1, "Player 2".to_string()],
                    session,
                ))
            }
        }
    }

    pub fn session(&self) -> &GuessingSession {
        match self {
            Round::Single(session) => session,
            Round::TwoPlayer(game) => game.session(),
        }
    }

    /// Active player name, in two-player rounds only.
    pub fn current_player(&self) -> Option<&str> {
        match self {
            Round::Single(_) => None,
            Round::TwoPlayer(game) => Some(game.current_player()),
        }
    }

    fn submit(&mut self, guess: i64) -> Outcome {
        match self {
            Round::Single(session) => session.submit_guess(guess),
            Round::TwoPlayer(game) => game.submit_guess(guess),
        }
    }
}

pub struct App {
    pub(crate) store: HighScoreStore,
    pub(crate) screen: Screen,
    pub(crate) form: SettingsForm,
    pub(crate) settings: Option<GameSettings>,
    pub(crate) round: Option<Round>,
    pub(crate) input: String,
    pub(crate) feedback: String,
    pub(crate) flash: Option<Instant>,
    pub(crate) log: Vec<String>,
    pub(crate) log_scroll: usize,
    pub(crate) banner: String,
    should_quit: bool,
}

impl App {
    pub fn new(store: HighScoreStore) -> Self {
        Self {
            store,
            screen: Screen::Settings,
            form: SettingsForm::new(),
            settings: None,
            round: None,
            input: String::new(),
            feedback: String::new(),
            flash: None,
            log: Vec::new(),
            log_scroll: 0,
            banner: String::new(),
            should_quit: false,
        }
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            self.tick();
            terminal.draw(|f| renderer::draw(f, &self))?;

            // Short poll timeout keeps the feedback animation moving even
            // when no keys come in.
            if event::poll(Duration::from_millis(33))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    /// Expire the feedback color cycle once it has run its course.
    fn tick(&mut self) {
        if let Some(started) = self.flash {
            if started.elapsed() >= FLASH_STEP * FLASH_COLORS.len() as u32 {
                self.flash = None;
            }
        }
    }

    /// Current feedback color for the renderer; cosmetic only.
    pub fn feedback_color(&self) -> Color {
        match self.flash {
            Some(started) => {
                let step = (started.elapsed().as_millis() / FLASH_STEP.as_millis()) as usize;
                *FLASH_COLORS.get(step).unwrap_or(&Color::Reset)
            }
            None => Color::Reset,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::Settings => self.handle_settings_key(key),
            Screen::Playing => self.handle_playing_key(key),
            Screen::GameOver => self.handle_game_over_key(key),
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::BackTab => self.form.focus_prev(),
            KeyCode::Down | KeyCode::Tab => self.form.focus_next(),
            KeyCode::Left => self.form.cycle(false),
            KeyCode::Right => self.form.cycle(true),
            KeyCode::Char(' ') if self.form.focus != FIELD_NAME => self.form.cycle(true),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Enter => {
                if let Some(settings) = self.form.build_settings() {
                    self.settings = Some(settings);
                    self.start_round();
                }
            }
            KeyCode::Char(c) => self.form.type_char(c),
            _ => {}
        }
    }

    fn handle_playing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.input.len() < 6 {
                    self.input.push(c);
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => self.submit_input(),
            KeyCode::Up => self.log_scroll = (self.log_scroll + 1).min(self.log.len()),
            KeyCode::Down => self.log_scroll = self.log_scroll.saturating_sub(1),
            _ => {}
        }
    }

    fn handle_game_over_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.start_round(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.screen = Screen::Settings;
            }
            _ => {}
        }
    }

    /// Start a fresh round from the stored settings.
    fn start_round(&mut self) {
        let Some(settings) = &self.settings else {
            self.form.error = Some("Please set the game settings first.".to_string());
            self.screen = Screen::Settings;
            return;
        };

        let round = Round::from_settings(settings);
        debug!(secret = round.session().target(), mode = settings.mode.label(), "round started");
        self.round = Some(round);
        self.input.clear();
        self.feedback.clear();
        self.flash = None;
        self.log.clear();
        self.log_scroll = 0;
        self.banner.clear();
        self.screen = Screen::Playing;
    }

    /// Take the typed guess through the session and update the display state.
    pub(crate) fn submit_input(&mut self) {
        let text = std::mem::take(&mut self.input);
        let Some(round) = self.round.as_mut() else {
            return;
        };

        let Ok(guess) = text.parse::<i64>() else {
            self.feedback = "Please enter a valid number.".to_string();
            return;
        };

        let upper = round.session().upper_bound();
        if !(1..=upper).contains(&guess) {
            self.feedback = format!("Please enter a number between 1 and {upper}.");
            return;
        }

        // Resolve the guesser before submitting; the turn owner changes on a
        // wrong guess and a winning guess must be credited correctly.
        let guesser = round.current_player().map(str::to_string);
        match &guesser {
            Some(player) => self.log.push(format!("{player} guessed {guess}.")),
            None => self.log.push(format!("You guessed {guess}.")),
        }

        let outcome = round.submit(guess);
        self.log_scroll = 0;
        match outcome {
            Outcome::TooLow => {
                self.feedback = "Too low!".to_string();
                self.flash = Some(Instant::now());
                self.push_hint();
            }
            Outcome::TooHigh => {
                self.feedback = "Too high!".to_string();
                self.flash = Some(Instant::now());
                self.push_hint();
            }
            Outcome::Correct => self.finish_round(true, guesser),
            Outcome::OutOfAttempts => self.finish_round(false, guesser),
        }
    }

    fn push_hint(&mut self) {
        if let Some(round) = &self.round {
            if let Some(parity) = round.session().hint() {
                self.log.push(format!("Hint: the number is {parity}."));
            }
        }
    }

    fn finish_round(&mut self, won: bool, guesser: Option<String>) {
        let (attempts, target) = match &self.round {
            Some(round) => (round.session().attempts_used(), round.session().target()),
            None => return,
        };

        if won {
            match guesser {
                Some(player) => {
                    self.log.push(format!("{player} guessed correctly!"));
                    self.banner = format!("🏆 {player} wins!");
                }
                None => {
                    self.log.push("You guessed correctly!".to_string());
                    let name = self
                        .settings
                        .as_ref()
                        .map(|s| s.player_name.clone())
                        .unwrap_or_default();
                    self.banner = if name.is_empty() {
                        "🏆 You guessed it!".to_string()
                    } else {
                        format!("🏆 You guessed it, {name}!")
                    };
                    if !name.is_empty() {
                        self.save_score(&name, attempts);
                    }
                }
            }
        } else {
            self.log.push(format!("Out of attempts. The number was {target}."));
            self.banner = format!("💀 Out of attempts! The number was {target}.");
        }

        self.feedback.clear();
        self.flash = None;
        self.screen = Screen::GameOver;
    }

    fn save_score(&mut self, name: &str, attempts: u32) {
        match self.store.record(name, attempts) {
            Ok(SaveOutcome::NewHighScore) => self.log.push("New high score!".to_string()),
            Ok(SaveOutcome::Saved) => self.log.push("Score saved!".to_string()),
            Ok(SaveOutcome::NotImproved) => {}
            Err(e) => self.log.push(format!("Could not save the score: {e}")),
        }
    }
}
