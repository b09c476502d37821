//! Mini-games that take over line interpretation while active.

use std::time::Duration;

use chrono::{DateTime, Local};

/// At most one game runs at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GameState {
    #[default]
    None,
    NumberGuesser(NumberGuesser),
    TypingTest(TypingTest),
    Matrix,
}

impl GameState {
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::NumberGuesser(_) => "game",
            Self::TypingTest(_) => "typing-test",
            Self::Matrix => "matrix",
        }
    }

    /// Text shown when the game starts.
    pub fn intro(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::NumberGuesser(_) => format!(
                "I'm thinking of a number between {SECRET_MIN} and {SECRET_MAX}. \
                 Type your guess, or 'exit' to quit."
            ),
            Self::TypingTest(test) => format!(
                "Type the following sentence and press Enter:\n{}",
                test.target
            ),
            Self::Matrix => "Wake up... Type 'exit' to leave the matrix.".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Number guesser
// ---------------------------------------------------------------------------

pub const SECRET_MIN: u32 = 1;
pub const SECRET_MAX: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberGuesser {
    secret: u32,
    attempts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Higher,
    Lower,
    Correct { secret: u32, attempts: u32 },
    Invalid,
}

impl GuessOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::Higher => "Higher!".to_string(),
            Self::Lower => "Lower!".to_string(),
            Self::Correct { secret, attempts } => {
                let noun = if *attempts == 1 { "attempt" } else { "attempts" };
                format!("Correct! You found {secret} in {attempts} {noun}.")
            },
            Self::Invalid => "Please enter a whole number.".to_string(),
        }
    }
}

impl NumberGuesser {
    pub fn new(secret: u32) -> Self {
        Self {
            secret,
            attempts: 0,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn secret(&self) -> u32 {
        self.secret
    }

    /// Only integer guesses count as attempts.
    pub fn guess(&mut self, input: &str) -> GuessOutcome {
        let Ok(value) = input.trim().parse::<i64>() else {
            return GuessOutcome::Invalid;
        };
        self.attempts += 1;
        let secret = i64::from(self.secret);
        if value < secret {
            GuessOutcome::Higher
        } else if value > secret {
            GuessOutcome::Lower
        } else {
            GuessOutcome::Correct {
                secret: self.secret,
                attempts: self.attempts,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Typing test
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TypingTest {
    pub target: String,
    pub started_at: DateTime<Local>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypingScore {
    pub wpm: u32,
    /// Percentage, rounded to two decimals.
    pub accuracy: f64,
}

const MIN_ELAPSED: Duration = Duration::from_millis(1);

impl TypingTest {
    pub fn new(target: &str, started_at: DateTime<Local>) -> Self {
        Self {
            target: target.to_string(),
            started_at,
        }
    }

    /// Score a transcript submitted at `now`. A clock that went backwards
    /// counts as the minimum elapsed time.
    pub fn finish(&self, typed: &str, now: DateTime<Local>) -> TypingScore {
        let elapsed = (now - self.started_at).to_std().unwrap_or(MIN_ELAPSED);
        score(&self.target, typed, elapsed)
    }
}

/// Words per minute over the target's word count, and positional character
/// accuracy against the target's length.
pub fn score(target: &str, typed: &str, elapsed: Duration) -> TypingScore {
    let secs = elapsed.max(MIN_ELAPSED).as_secs_f64();
    let words = target.split_whitespace().count() as f64;
    let wpm = (words / secs * 60.0).round() as u32;

    let total = target.chars().count();
    let accuracy = if total == 0 {
        100.0
    } else {
        let matching = target
            .chars()
            .zip(typed.chars())
            .filter(|(a, b)| a == b)
            .count();
        (matching as f64 / total as f64 * 10_000.0).round() / 100.0
    };
    TypingScore { wpm, accuracy }
}

impl TypingScore {
    pub fn is_success(&self) -> bool {
        self.accuracy > 90.0 && self.wpm > 30
    }

    pub fn message(&self) -> String {
        let mut out = format!(
            "Your speed: {} WPM, accuracy: {:.2}%.",
            self.wpm, self.accuracy
        );
        if self.is_success() {
            out.push_str(" Excellent typing!");
        }
        out
    }
}
