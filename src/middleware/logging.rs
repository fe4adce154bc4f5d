//! # Logging Middleware
//!
//! Writes one log line per action through the `log` facade. Never changes
//! or drops the action.

use log::{Level, log, log_enabled};

use crate::core::action::StackAction;
use crate::core::state::StackState;
use crate::middleware::{Dispatcher, Middleware};

pub const DEFAULT_PREFIX: &str = "[navstack]";

#[derive(Debug, Clone)]
pub struct LoggingMiddleware {
    level: Level,
    prefix: String,
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new(Level::Debug, DEFAULT_PREFIX)
    }
}

impl LoggingMiddleware {
    pub fn new(level: Level, prefix: impl Into<String>) -> Self {
        Self {
            level,
            prefix: prefix.into(),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The line written for `action` dispatched against `state`.
    pub fn format<S: StackState>(&self, action: &S::Action, state: &S) -> String {
        format!(
            "{} {} {:?} ({}, depth {})",
            self.prefix,
            action.name(),
            action,
            action.depth_change(),
            state.depth()
        )
    }
}

impl<S: StackState> Middleware<S> for LoggingMiddleware {
    fn process(
        &self,
        action: S::Action,
        state: &S,
        _dispatcher: &Dispatcher<S::Action>,
    ) -> Option<S::Action> {
        if log_enabled!(self.level) {
            log!(self.level, "{}", self.format(&action, state));
        }
        Some(action)
    }

    fn name(&self) -> &str {
        "logging"
    }
}
