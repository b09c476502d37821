//! Platform service abstractions.
//!
//! The terminal never touches the host directly: client-side storage, the
//! wall clock and randomness are all reached through the traits here, so a
//! test can swap in deterministic implementations.

pub mod services;
pub mod storage;

pub use services::{Clock, FixedRandom, ManualClock, RandomSource, SystemClock, ThreadRandom};
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
