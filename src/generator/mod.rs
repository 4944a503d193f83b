//! Random number generation for the producer.
//!
//! # Responsibilities
//! - Draw one number per request from an inclusive range
//! - Stay correct under concurrent use from many request handlers
//! - Allow a deterministic generator to be swapped in
//!
//! # Design Decisions
//! - Handlers only see `Arc<dyn NumberGenerator>`, never an ambient global
//! - The default generator uses the thread-local RNG, so concurrent requests
//!   never contend on a lock
//! - A seeded generator exists for reproducible runs

use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::NumberRangeConfig;

/// Default smallest served number.
pub const DEFAULT_MIN: u32 = 1;
/// Default largest served number.
pub const DEFAULT_MAX: u32 = 180;

/// Capability to produce one number per call.
pub trait NumberGenerator: Send + Sync {
    /// Draw the next number.
    fn next_number(&self) -> u32;

    /// Range every drawn number falls in.
    fn range(&self) -> RangeInclusive<u32>;
}

/// Uniform draws from the calling thread's RNG.
#[derive(Debug, Clone)]
pub struct ThreadRngGenerator {
    range: RangeInclusive<u32>,
}

impl ThreadRngGenerator {
    pub fn new(range: RangeInclusive<u32>) -> Self {
        Self { range }
    }
}

impl Default for ThreadRngGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN..=DEFAULT_MAX)
    }
}

impl NumberGenerator for ThreadRngGenerator {
    fn next_number(&self) -> u32 {
        rand::thread_rng().gen_range(self.range.clone())
    }

    fn range(&self) -> RangeInclusive<u32> {
        self.range.clone()
    }
}

/// Reproducible draws from a seeded RNG.
///
/// The RNG is serialized behind a mutex. Under concurrency the sequence as a
/// whole is reproducible, but which request receives which draw is not.
#[derive(Debug)]
pub struct SeededGenerator {
    range: RangeInclusive<u32>,
    rng: Mutex<StdRng>,
}

impl SeededGenerator {
    pub fn new(range: RangeInclusive<u32>, seed: u64) -> Self {
        Self {
            range,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl NumberGenerator for SeededGenerator {
    fn next_number(&self) -> u32 {
        // A poisoned lock still holds a usable RNG state.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(self.range.clone())
    }

    fn range(&self) -> RangeInclusive<u32> {
        self.range.clone()
    }
}

/// Build the generator described by the config.
pub fn from_config(config: &NumberRangeConfig) -> Arc<dyn NumberGenerator> {
    let range = config.min..=config.max;
    match config.seed {
        Some(seed) => {
            tracing::info!(seed, min = config.min, max = config.max, "Using seeded generator");
            Arc::new(SeededGenerator::new(range, seed))
        }
        None => Arc::new(ThreadRngGenerator::new(range)),
    }
}
