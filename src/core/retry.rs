// src/core/retry.rs
//
// Bounded retry with exponential backoff. Shared by the catalog pager and the
// detail resolvers so both follow the same (max attempts, base delay) policy.

use std::fmt::Display;
use std::thread;
use std::time::Duration;

/// Errors that know whether another attempt could succeed.
pub trait Transient {
    fn is_transient(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Always >= 1.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

/// The last error seen, plus how many attempts were spent on it.
#[derive(Debug)]
pub struct Exhausted<E> {
    pub attempts: u32,
    pub error: E,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self { max_attempts: max_attempts.max(1), base_delay, max_delay }
    }

    /// No waiting between attempts.
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO, Duration::ZERO)
    }

    /// Delay before the retry that follows failed attempt `attempt` (1-based):
    /// base, 2*base, 4*base, ... capped at `max_delay`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(16);
        let delay = self.base_delay.saturating_mul(1u32 << shift);
        delay.min(self.max_delay.max(self.base_delay))
    }

    /// Run `op` until it succeeds, fails permanently, or attempts run out.
    pub fn run<T, E, F>(&self, what: &str, mut op: F) -> Result<T, Exhausted<E>>
    where
        E: Transient + Display,
        F: FnMut() -> Result<T, E>,
    {
        let max = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op() {
                Ok(v) => return Ok(v),
                Err(e) if !e.is_transient() => {
                    log::debug!("{what}: permanent failure on attempt {attempt}: {e}");
                    return Err(Exhausted { attempts: attempt, error: e });
                }
                Err(e) if attempt >= max => {
                    log::warn!("{what}: giving up after {attempt} attempt(s): {e}");
                    return Err(Exhausted { attempts: attempt, error: e });
                }
                Err(e) => {
                    let wait = self.delay_after(attempt);
                    log::warn!(
                        "{what}: attempt {attempt}/{max} failed ({e}); retrying in {}ms",
                        wait.as_millis()
                    );
                    if !wait.is_zero() {
                        thread::sleep(wait);
                    }
                    attempt += 1;
                }
            }
        }
    }
}
