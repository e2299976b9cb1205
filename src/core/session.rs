use rand::Rng;

/// Result of a single submitted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    TooLow,
    TooHigh,
    Correct,
    OutOfAttempts,
}

impl Outcome {
    /// True once the round can take no further guesses.
    pub fn is_terminal(self) -> bool {
        matches!(self, Outcome::Correct | Outcome::OutOfAttempts)
    }
}

/// Parity of the secret number, revealed as an advisory hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

impl std::fmt::Display for Parity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Parity::Even => write!(f, "even"),
            Parity::Odd => write!(f, "odd"),
        }
    }
}

/// One round of "guess the number".
///
/// Holds the secret target and the attempt bookkeeping; the shells only feed
/// parsed integers in and print the returned [`Outcome`]. A `max_attempts` of
/// 0 means unlimited guesses.
pub struct GuessingSession {
    target: i64,
    upper_bound: i64,
    attempts_used: u32,
    max_attempts: u32,
    hints_enabled: bool,
    finished: bool,
    won: bool,
}

impl GuessingSession {
    /// Start a round with a fresh random target in `[1, upper_bound]`.
    pub fn new(upper_bound: i64, max_attempts: u32, hints_enabled: bool) -> Self {
        let upper_bound = upper_bound.max(1);
        let target = rand::rng().random_range(1..=upper_bound);
        Self::with_target(target, upper_bound, max_attempts, hints_enabled)
    }

    /// Start a round around a known target.
    pub fn with_target(target: i64, upper_bound: i64, max_attempts: u32, hints_enabled: bool) -> Self {
        debug_assert!((1..=upper_bound).contains(&target));
        Self {
            target,
            upper_bound,
            attempts_used: 0,
            max_attempts,
            hints_enabled,
            finished: false,
            won: false,
        }
    }

    /// Take one guess and report where it landed.
    ///
    /// Every call on a live session consumes an attempt, even for guesses
    /// outside `[1, upper_bound]` (they compare like any other number). A
    /// finished session keeps reporting its terminal outcome.
    pub fn submit_guess(&mut self, guess: i64) -> Outcome {
        if self.finished {
            return if self.won { Outcome::Correct } else { Outcome::OutOfAttempts };
        }

        self.attempts_used += 1;

        if guess == self.target {
            self.finished = true;
            self.won = true;
            return Outcome::Correct;
        }

        if self.max_attempts > 0 && self.attempts_used >= self.max_attempts {
            self.finished = true;
            return Outcome::OutOfAttempts;
        }

        if guess < self.target {
            Outcome::TooLow
        } else {
            Outcome::TooHigh
        }
    }

    /// Advisory parity hint, available every third wrong guess when enabled.
    /// Purely informational, never affects the outcome.
    pub fn hint(&self) -> Option<Parity> {
        if !self.hints_enabled || self.finished || self.attempts_used == 0 {
            return None;
        }
        if self.attempts_used % 3 != 0 {
            return None;
        }
        Some(if self.target % 2 == 0 { Parity::Even } else { Parity::Odd })
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn upper_bound(&self) -> i64 {
        self.upper_bound
    }

    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    /// Remaining attempts, or `None` when the budget is unlimited.
    pub fn attempts_left(&self) -> Option<u32> {
        if self.max_attempts == 0 {
            None
        } else {
            Some(self.max_attempts.saturating_sub(self.attempts_used))
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn is_over(&self) -> bool {
        self.finished
    }

    pub fn is_won(&self) -> bool {
        self.won
    }
}

/// Two named players taking strict turns against one shared session.
///
/// The attempt budget belongs to the match as a whole, not to either player.
/// The turn owner only advances after a non-terminal guess, so the player who
/// ends the round is always the one [`current_player`](Self::current_player)
/// named before the guess went in.
pub struct TwoPlayerMatch {
    session: GuessingSession,
    players: [String; 2],
    turn: usize,
}

impl TwoPlayerMatch {
    pub fn new(players: [String; 2], upper_bound: i64, max_attempts: u32) -> Self {
        Self::with_session(players, GuessingSession::new(upper_bound, max_attempts, false))
    }

    pub fn with_session(players: [String; 2], session: GuessingSession) -> Self {
        Self {
            session,
            players,
            turn: 0,
        }
    }

    /// Name of the player whose turn it is right now.
    pub fn current_player(&self) -> &str {
        &self.players[self.turn]
    }

    pub fn submit_guess(&mut self, guess: i64) -> Outcome {
        let outcome = self.session.submit_guess(guess);
        if !outcome.is_terminal() {
            self.turn = 1 - self.turn;
        }
        outcome
    }

    pub fn session(&self) -> &GuessingSession {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracketing_guesses() {
        let mut session = GuessingSession::with_target(50, 100, 0, false);
        assert_eq!(session.submit_guess(25), Outcome::TooLow);
        assert_eq!(session.submit_guess(75), Outcome::TooHigh);
        assert_eq!(session.submit_guess(50), Outcome::Correct);
        assert_eq!(session.attempts_used(), 3);
        assert!(session.is_over());
        assert!(session.is_won());
    }

    #[test]
    fn test_budget_exhaustion() {
        let mut session = GuessingSession::with_target(7, 10, 3, false);
        assert_eq!(session.submit_guess(1), Outcome::TooLow);
        assert_eq!(session.submit_guess(2), Outcome::TooLow);
        // The exhausting wrong guess reports the loss, not a direction.
        assert_eq!(session.submit_guess(3), Outcome::OutOfAttempts);
        assert!(session.is_over());
        assert!(!session.is_won());
        // Further guesses keep reporting the loss without counting.
        assert_eq!(session.submit_guess(7), Outcome::OutOfAttempts);
        assert_eq!(session.attempts_used(), 3);
    }

    #[test]
    fn test_winning_on_last_attempt() {
        let mut session = GuessingSession::with_target(4, 10, 2, false);
        assert_eq!(session.submit_guess(9), Outcome::TooHigh);
        assert_eq!(session.submit_guess(4), Outcome::Correct);
        assert!(session.is_won());
    }

    #[test]
    fn test_sequential_sweep_always_wins() {
        for target in 1..=25 {
            let mut session = GuessingSession::with_target(target, 25, 0, false);
            let mut found = false;
            for guess in 1..=25 {
                if session.submit_guess(guess) == Outcome::Correct {
                    found = true;
                    break;
                }
            }
            assert!(found, "target {target} never found");
            assert!(session.attempts_used() <= 25);
        }
    }

    #[test]
    fn test_out_of_range_guess_consumes_attempt() {
        let mut session = GuessingSession::with_target(5, 10, 0, false);
        assert_eq!(session.submit_guess(-3), Outcome::TooLow);
        assert_eq!(session.submit_guess(999), Outcome::TooHigh);
        assert_eq!(session.attempts_used(), 2);
    }

    #[test]
    fn test_hint_cadence() {
        let mut session = GuessingSession::with_target(8, 100, 0, true);
        session.submit_guess(1);
        assert_eq!(session.hint(), None);
        session.submit_guess(2);
        assert_eq!(session.hint(), None);
        session.submit_guess(3);
        assert_eq!(session.hint(), Some(Parity::Even));
        session.submit_guess(4);
        assert_eq!(session.hint(), None);
    }

    #[test]
    fn test_hints_disabled() {
        let mut session = GuessingSession::with_target(9, 100, 0, false);
        for guess in 1..=6 {
            session.submit_guess(guess);
        }
        assert_eq!(session.hint(), None);
    }

    #[test]
    fn test_two_player_alternation() {
        let session = GuessingSession::with_target(50, 100, 0, false);
        let mut game = TwoPlayerMatch::with_session(["Alice".into(), "Bob".into()], session);

        assert_eq!(game.current_player(), "Alice");
        game.submit_guess(10);
        assert_eq!(game.current_player(), "Bob");
        game.submit_guess(90);
        assert_eq!(game.current_player(), "Alice");
    }

    #[test]
    fn test_two_player_winner_keeps_turn() {
        let session = GuessingSession::with_target(50, 100, 0, false);
        let mut game = TwoPlayerMatch::with_session(["Alice".into(), "Bob".into()], session);

        game.submit_guess(10);
        assert_eq!(game.current_player(), "Bob");
        assert_eq!(game.submit_guess(50), Outcome::Correct);
        // Terminal guess does not flip the turn, so the winner stays current.
        assert_eq!(game.current_player(), "Bob");
    }

    #[test]
    fn test_two_player_shared_budget() {
        let session = GuessingSession::with_target(50, 100, 3, false);
        let mut game = TwoPlayerMatch::with_session(["Alice".into(), "Bob".into()], session);

        game.submit_guess(1);
        game.submit_guess(2);
        assert_eq!(game.submit_guess(3), Outcome::OutOfAttempts);
        assert_eq!(game.session().attempts_used(), 3);
    }
}
