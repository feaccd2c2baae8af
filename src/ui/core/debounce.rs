//! Keystroke coalescing for suggestion lookups.

use super::actions::{Effect, Target};
use std::time::Duration;

/// Generation counter of one input surface.
///
/// Every edit bumps the tag and schedules a trigger carrying it. A trigger
/// or a lookup result is acted on only while its tag is still current.
#[derive(Debug, Clone)]
pub struct Debouncer {
    tag: u64,
    interval: Duration,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self { tag: 0, interval }
    }

    pub fn tag(&self) -> u64 {
        self.tag
    }

    pub fn is_current(&self, tag: u64) -> bool {
        self.tag == tag
    }

    /// Record an edit and return the trigger for it.
    pub fn keystroke(&mut self, target: Target) -> Effect {
        self.tag += 1;
        Effect::Schedule {
            target,
            tag: self.tag,
            delay: self.interval,
        }
    }

    /// Invalidate every pending trigger and lookup.
    pub fn invalidate(&mut self) {
        self.tag += 1;
    }
}
