//! Cooldown gate
//!
//! Both entry points share one cooldown. An admitted invocation consumes it
//! before any effect runs, even when the effect ends up doing nothing.

use std::time::Duration;

use super::components::QuirkState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownGate {
    pub cooldown: Duration,
}

impl CooldownGate {
    pub fn new(cooldown: Duration) -> Self {
        Self { cooldown }
    }

    /// Whether an invocation at `now` is allowed
    pub fn admit(&self, state: &QuirkState, now: Duration) -> bool {
        match state.last_use_at {
            None => true,
            Some(last) => last.checked_add(self.cooldown).is_some_and(|ready| now >= ready),
        }
    }

    /// Admit and record the use in one step. Returns false when still cooling down.
    pub fn try_consume(&self, state: &mut QuirkState, now: Duration) -> bool {
        if !self.admit(state, now) {
            return false;
        }
        state.mark_used(now);
        true
    }

    /// Time left until the gate opens again
    pub fn remaining(&self, state: &QuirkState, now: Duration) -> Duration {
        match state.last_use_at {
            None => Duration::ZERO,
            Some(last) => last.saturating_add(self.cooldown).saturating_sub(now),
        }
    }
}
