//! Per-user command cooldowns.

use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Cooldowns {
    duration: Duration,
    until: HashMap<String, Instant>,
}

impl Cooldowns {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            until: HashMap::new(),
        }
    }

    /// Time left before `user` may run another command, if any.
    pub fn remaining(&self, user: &str, now: Instant) -> Option<Duration> {
        self.until
            .get(user)
            .and_then(|end| end.checked_duration_since(now))
            .filter(|left| !left.is_zero())
    }

    /// Start the window for `user`. Expired entries are dropped on the way.
    pub fn start(&mut self, user: &str, now: Instant) {
        self.until.retain(|_, end| *end > now);
        self.until.insert(user.to_string(), now + self.duration);
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.until.len()
    }
}
