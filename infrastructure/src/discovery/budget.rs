//! Limits for one discovery run

use artisan_domain::DiscoveryConfiguration;
use std::fmt;
use std::time::{Duration, Instant};

/// Why a run stopped early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exhausted {
    /// More files than `max_files` in one tier
    Files(usize),
    /// Wall-clock limit passed
    Time(Duration),
}

impl fmt::Display for Exhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exhausted::Files(limit) => write!(f, "file limit of {limit} reached"),
            Exhausted::Time(limit) => write!(f, "time limit of {}ms reached", limit.as_millis()),
        }
    }
}

/// File-count and wall-clock budget.
///
/// The file count applies per tier; the deadline covers the whole run.
#[derive(Debug)]
pub struct Budget {
    max_files: usize,
    timeout: Duration,
    deadline: Instant,
    visited: usize,
}

impl Budget {
    /// Start the clock
    pub fn start(limits: &DiscoveryConfiguration) -> Self {
        let timeout = limits.timeout();
        Self {
            max_files: limits.max_files,
            timeout,
            deadline: Instant::now() + timeout,
            visited: 0,
        }
    }

    /// Reset the file count for the next tier
    pub fn next_tier(&mut self) {
        self.visited = 0;
    }

    /// Account for one more file
    pub fn charge(&mut self) -> Result<(), Exhausted> {
        if self.visited >= self.max_files {
            return Err(Exhausted::Files(self.max_files));
        }
        self.check_deadline()?;
        self.visited += 1;
        Ok(())
    }

    /// Fails once the wall-clock limit has passed
    pub fn check_deadline(&self) -> Result<(), Exhausted> {
        if Instant::now() >= self.deadline {
            return Err(Exhausted::Time(self.timeout));
        }
        Ok(())
    }
}
