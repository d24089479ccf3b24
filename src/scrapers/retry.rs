use crate::scrapers::error::ScrapeError;
use rand::Rng;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Randomized pauses between browser actions, measured in whole time units.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    unit: Duration,
}

impl Pacer {
    pub fn new(unit: Duration) -> Self {
        Self { unit }
    }

    /// Pick a whole number of units uniformly from `[a, b]`
    pub fn pick(a: u32, b: u32) -> u32 {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        rand::rng().random_range(low..=high)
    }

    pub fn random_wait(&self, a: u32, b: u32) {
        self.wait(Self::pick(a, b));
    }

    pub fn wait(&self, units: u32) {
        if self.unit.is_zero() || units == 0 {
            return;
        }
        let pause = self.unit.saturating_mul(units);
        debug!(?pause, "waiting");
        thread::sleep(pause);
    }
}

/// Result of a bounded retry loop
#[derive(Debug)]
pub enum Outcome<T> {
    Found(T),
    /// Every attempt failed with a recoverable error
    Exhausted { attempts: u32, last_error: ScrapeError },
}

impl<T> Outcome<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Outcome::Found(value) => Some(value),
            Outcome::Exhausted { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Run `op` until it succeeds or the attempt budget is spent.
    ///
    /// Errors accepted by `recoverable` trigger `recover` (given the number of
    /// the failed attempt) before the next try. Any other error, including a
    /// failing recovery, is returned as `Err`.
    pub fn run<T, F, P, R>(
        &self,
        mut op: F,
        recoverable: P,
        mut recover: R,
    ) -> Result<Outcome<T>, ScrapeError>
    where
        F: FnMut(u32) -> Result<T, ScrapeError>,
        P: Fn(&ScrapeError) -> bool,
        R: FnMut(u32) -> Result<(), ScrapeError>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match op(attempt) {
                Ok(value) => return Ok(Outcome::Found(value)),
                Err(e) if recoverable(&e) => {
                    if attempt >= self.max_attempts {
                        return Ok(Outcome::Exhausted {
                            attempts: attempt,
                            last_error: e,
                        });
                    }
                    warn!(attempt, max = self.max_attempts, error = %e, "recoverable failure, retrying");
                    recover(attempt)?;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}
