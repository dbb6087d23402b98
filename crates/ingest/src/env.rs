//! Clock and randomness capabilities injected into the sanitizer.
//!
//! Synthesized ids, reference numbers and the `lastReviewed` fallback all
//! depend on "now" or on a random draw. Both are passed in explicitly so tests
//! can freeze them.
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use ingest::{Clock, FixedClock, IngestConfig, IngestEnv, RandomSource, SeededRandom};
//!
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
//! let random = SeededRandom::new(7);
//! let config = IngestConfig::default();
//! let env = IngestEnv::new(&config, &clock, &random);
//!
//! assert_eq!(env.clock.now().timestamp_millis(), 1_714_564_800_000);
//! assert!(env.random.below(10) < 10);
//! ```
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::IngestConfig;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }

    /// Processing date in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Uniform random integers.
pub trait RandomSource: Send + Sync {
    /// Returns a value in `0..bound`. `bound` is never zero.
    fn below(&self, bound: u32) -> u32;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Thread-local generator seeded by the OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn below(&self, bound: u32) -> u32 {
        fastrand::u32(0..bound.max(1))
    }
}

/// Deterministic generator: the same seed yields the same sequence.
#[derive(Debug)]
pub struct SeededRandom(Mutex<fastrand::Rng>);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(Mutex::new(fastrand::Rng::with_seed(seed)))
    }
}

impl RandomSource for SeededRandom {
    fn below(&self, bound: u32) -> u32 {
        let mut rng = self
            .0
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.u32(0..bound.max(1))
    }
}

/// Everything a sanitization pass needs besides the record itself.
#[derive(Clone, Copy)]
pub struct IngestEnv<'a> {
    pub config: &'a IngestConfig,
    pub clock: &'a dyn Clock,
    pub random: &'a dyn RandomSource,
}

impl<'a> IngestEnv<'a> {
    pub fn new(
        config: &'a IngestConfig,
        clock: &'a dyn Clock,
        random: &'a dyn RandomSource,
    ) -> Self {
        Self {
            config,
            clock,
            random,
        }
    }

    /// Wall clock and thread-local randomness.
    pub fn system(config: &'a IngestConfig) -> Self {
        Self::new(config, &SystemClock, &ThreadRandom)
    }
}
