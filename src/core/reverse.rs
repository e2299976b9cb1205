/// Feedback the human gives about the computer's guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    TooHigh,
    TooLow,
    Correct,
}

/// Where the search stands after the latest feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReverseState {
    Guessing,
    Found(i64),
    /// The feedback contradicted itself; no number fits the answers given.
    Inconsistent,
}

/// Binary search over a number the human is holding.
///
/// The computer proposes the floor midpoint of `[low, high]` each round and
/// narrows the range from the human's too-high / too-low answers, so truthful
/// feedback pins the number within `ceil(log2(upper_bound))` rounds. Once the
/// range collapses to a single value that value is the forced guess.
pub struct ReverseSession {
    low: i64,
    high: i64,
    rounds: u32,
    state: ReverseState,
}

impl ReverseSession {
    pub fn new(upper_bound: i64) -> Self {
        Self {
            low: 1,
            high: upper_bound.max(1),
            rounds: 0,
            state: ReverseState::Guessing,
        }
    }

    /// The guess to put to the human this round. Ties break toward the lower
    /// half of the range.
    pub fn next_guess(&self) -> i64 {
        if self.low == self.high {
            self.low
        } else {
            self.low + (self.high - self.low) / 2
        }
    }

    /// Narrow the range from the human's answer about [`next_guess`](Self::next_guess).
    ///
    /// Feedback that would cross the bounds means the answers contradict each
    /// other; the session moves to [`ReverseState::Inconsistent`] rather than
    /// carrying a broken range forward.
    pub fn apply_feedback(&mut self, feedback: Feedback) -> ReverseState {
        if self.state != ReverseState::Guessing {
            return self.state;
        }

        let guess = self.next_guess();
        self.rounds += 1;

        match feedback {
            Feedback::Correct => self.state = ReverseState::Found(guess),
            Feedback::TooHigh => {
                if guess == self.low {
                    self.state = ReverseState::Inconsistent;
                } else {
                    self.high = guess - 1;
                }
            }
            Feedback::TooLow => {
                if guess == self.high {
                    self.state = ReverseState::Inconsistent;
                } else {
                    self.low = guess + 1;
                }
            }
        }

        self.state
    }

    pub fn state(&self) -> ReverseState {
        self.state
    }

    pub fn bounds(&self) -> (i64, i64) {
        (self.low, self.high)
    }

    /// Rounds of feedback taken so far.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Answer truthfully for a fixed target until the session settles.
    fn run_oracle(target: i64, upper_bound: i64) -> ReverseSession {
        let mut session = ReverseSession::new(upper_bound);
        while session.state() == ReverseState::Guessing {
            let guess = session.next_guess();
            let feedback = if guess > target {
                Feedback::TooHigh
            } else if guess < target {
                Feedback::TooLow
            } else {
                Feedback::Correct
            };
            session.apply_feedback(feedback);
            assert!(session.rounds() <= 64, "search failed to terminate");
        }
        session
    }

    #[test]
    fn test_finds_every_target_within_log2_rounds() {
        // ceil(log2(100)) = 7
        for target in 1..=100 {
            let session = run_oracle(target, 100);
            assert_eq!(session.state(), ReverseState::Found(target));
            assert!(
                session.rounds() <= 7,
                "target {target} took {} rounds",
                session.rounds()
            );
        }
    }

    #[test]
    fn test_guess_stays_within_bounds() {
        let mut session = ReverseSession::new(100);
        for feedback in [Feedback::TooLow, Feedback::TooHigh, Feedback::TooLow] {
            let (low, high) = session.bounds();
            let guess = session.next_guess();
            assert!((low..=high).contains(&guess));
            session.apply_feedback(feedback);
        }
    }

    #[test]
    fn test_collapsed_range_forces_the_guess() {
        let mut session = ReverseSession::new(2);
        session.apply_feedback(Feedback::TooLow);
        assert_eq!(session.bounds(), (2, 2));
        assert_eq!(session.next_guess(), 2);
    }

    #[test]
    fn test_contradictory_feedback_is_flagged() {
        let mut session = ReverseSession::new(2);
        // Guess is 1; "too high" leaves nothing below it.
        assert_eq!(session.apply_feedback(Feedback::TooHigh), ReverseState::Inconsistent);
        // Further feedback is ignored.
        assert_eq!(session.apply_feedback(Feedback::Correct), ReverseState::Inconsistent);
    }

    #[test]
    fn test_single_value_range() {
        let mut session = ReverseSession::new(1);
        assert_eq!(session.next_guess(), 1);
        assert_eq!(session.apply_feedback(Feedback::Correct), ReverseState::Found(1));
    }
}
