//! Clock and randomness services, with desktop and test implementations.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use rand::Rng;

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Abstraction over the wall clock.
pub trait Clock {
    /// Current local date and time.
    fn now(&self) -> DateTime<Local>;
}

/// The host's real clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle and give
/// another to the terminal.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Local>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, instant: DateTime<Local>) {
        self.now.set(instant);
    }

    pub fn advance(&self, by: Duration) {
        let delta = chrono::Duration::from_std(by).unwrap_or_else(|_| chrono::Duration::zero());
        self.now.set(self.now.get() + delta);
    }
}

impl Default for ManualClock {
    /// Starts at 2023-11-14 22:13:20 UTC.
    fn default() -> Self {
        let start = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default();
        Self::new(start.with_timezone(&Local))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        self.now.get()
    }
}

// ---------------------------------------------------------------------------
// Randomness
// ---------------------------------------------------------------------------

/// Abstraction over a random number source.
pub trait RandomSource {
    /// Uniform integer in `low..=high`.
    fn range_inclusive(&mut self, low: u32, high: u32) -> u32;

    /// Uniform index in `0..len` (0 when `len` is 0).
    fn pick(&mut self, len: usize) -> usize;
}

/// Thread-local RNG from `rand`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        rand::thread_rng().gen_range(low..=high)
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

/// Replays a fixed queue of values. Once exhausted it yields the lowest
/// value of each requested range.
#[derive(Debug, Default, Clone)]
pub struct FixedRandom {
    values: VecDeque<u32>,
}

impl FixedRandom {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn push(&mut self, value: u32) {
        self.values.push_back(value);
    }
}

impl RandomSource for FixedRandom {
    fn range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        match self.values.pop_front() {
            Some(v) => v.clamp(low, high.max(low)),
            None => low,
        }
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.values.pop_front().map_or(0, |v| v as usize % len)
    }
}
