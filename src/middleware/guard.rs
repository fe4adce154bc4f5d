//! # Guard Middleware
//!
//! Conditional block or redirect. The handler is a pure decision over
//! `(action, state)`:
//!
//! - `Some(action)` lets it through unchanged,
//! - `Some(other)` redirects (the replacement continues down the chain),
//! - `None` blocks it silently.
//!
//! Guards get no [`Dispatcher`]. A guard that must wait on something (a
//! token refresh, a network check) blocks now and lets whoever resolves the
//! check dispatch the real action later.

use log::debug;

use crate::core::state::StackState;
use crate::middleware::{Dispatcher, Middleware};

type Decision<S> =
    dyn Fn(<S as StackState>::Action, &S) -> Option<<S as StackState>::Action>;

pub struct GuardMiddleware<S: StackState> {
    handler: Box<Decision<S>>,
}

impl<S: StackState> GuardMiddleware<S> {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(S::Action, &S) -> Option<S::Action> + 'static,
    {
        Self {
            handler: Box::new(handler),
        }
    }

    /// Drops every action matching `predicate`.
    pub fn block<P>(predicate: P) -> Self
    where
        P: Fn(&S::Action, &S) -> bool + 'static,
    {
        Self::new(move |action: S::Action, state: &S| {
            if predicate(&action, state) {
                debug!("Guard blocked {:?}", action);
                None
            } else {
                Some(action)
            }
        })
    }

    /// Replaces every action matching `predicate` with `to`.
    pub fn redirect<P>(predicate: P, to: S::Action) -> Self
    where
        P: Fn(&S::Action, &S) -> bool + 'static,
    {
        Self::new(move |action: S::Action, state: &S| {
            if predicate(&action, state) {
                debug!("Guard redirected {:?} to {:?}", action, to);
                Some(to.clone())
            } else {
                Some(action)
            }
        })
    }
}

impl<S: StackState> Middleware<S> for GuardMiddleware<S> {
    fn process(
        &self,
        action: S::Action,
        state: &S,
        _dispatcher: &Dispatcher<S::Action>,
    ) -> Option<S::Action> {
        (self.handler)(action, state)
    }

    fn name(&self) -> &str {
        "guard"
    }
}
