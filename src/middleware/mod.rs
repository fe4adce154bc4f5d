//! # Middleware
//!
//! Interceptors that sit between "intent" and "effect". Every dispatched
//! action walks the chain in registration order before it reaches the reducer.
//!
//! ```text
//! dispatch(action)
//!     │
//!     ▼
//! ┌──────────┐  Some(a)  ┌──────────┐  Some(a')  ┌──────────┐  Some(a'')
//! │ logging  │ ────────▶ │  guard   │ ─────────▶ │analytics │ ──────────▶ reduce()
//! └──────────┘           └──────────┘            └──────────┘
//!                             │ None
//!                             ▼
//!                       dropped, no state change
//! ```
//!
//! Each middleware sees the output of the one before it, so a rewritten
//! action keeps flowing through the rest of the chain.
//!
//! The store only knows [`AnyMiddleware`], a boxed closure, so middleware of
//! different concrete types can live in one list.
//!
//! ## Modules
//!
//! - [`logging`]: observation-only action logging
//! - [`analytics`]: emits an event per action to a caller-supplied sink
//! - [`guard`]: blocks or redirects actions with a pure decision function

pub mod analytics;
pub mod guard;
pub mod logging;

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

use log::{debug, warn};

use crate::core::state::StackState;

pub use analytics::{AnalyticsEvent, AnalyticsMiddleware};
pub use guard::GuardMiddleware;
pub use logging::LoggingMiddleware;

/// Handle for starting a separate, later dispatch cycle.
///
/// Sending never affects the dispatch currently running. Actions sent during
/// a dispatch run after it completes; actions sent from elsewhere (a worker
/// thread, an async task) run on the next `Store::process_pending()` or
/// `Store::dispatch()`.
pub struct Dispatcher<A> {
    sender: Sender<A>,
}

impl<A> Clone for Dispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<A> fmt::Debug for Dispatcher<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl<A> Dispatcher<A> {
    /// Creates a dispatcher and the receiving end the store drains.
    pub(crate) fn channel() -> (Self, Receiver<A>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }

    /// Queues `action` for its own dispatch cycle. Returns false when the
    /// store has been dropped.
    pub fn send(&self, action: A) -> bool {
        match self.sender.send(action) {
            Ok(()) => true,
            Err(_) => {
                warn!("Dropping redispatched action: store no longer exists");
                false
            }
        }
    }
}

/// An interceptor in the dispatch pipeline.
///
/// Return `Some(action)` to continue with that action (the same one or a
/// replacement). Return `None` to abort: later middleware and the reducer
/// never run, and observers are not notified.
pub trait Middleware<S: StackState> {
    fn process(
        &self,
        action: S::Action,
        state: &S,
        dispatcher: &Dispatcher<S::Action>,
    ) -> Option<S::Action>;

    /// Label used in debug logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

type ProcessFn<S> = dyn Fn(
    <S as StackState>::Action,
    &S,
    &Dispatcher<<S as StackState>::Action>,
) -> Option<<S as StackState>::Action>;

/// Type-erased middleware.
///
/// Wraps any [`Middleware`] (or a bare closure) behind one boxed function,
/// forwarding `process` calls unchanged.
pub struct AnyMiddleware<S: StackState> {
    name: String,
    process: Box<ProcessFn<S>>,
}

impl<S: StackState> AnyMiddleware<S> {
    pub fn new<M>(middleware: M) -> Self
    where
        M: Middleware<S> + 'static,
    {
        let name = middleware.name().to_string();
        Self {
            name,
            process: Box::new(
                move |action: S::Action, state: &S, dispatcher: &Dispatcher<S::Action>| {
                    middleware.process(action, state, dispatcher)
                },
            ),
        }
    }

    /// Builds middleware straight from a closure.
    pub fn from_fn<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(S::Action, &S, &Dispatcher<S::Action>) -> Option<S::Action> + 'static,
    {
        Self {
            name: name.into(),
            process: Box::new(f),
        }
    }
}

impl<S: StackState> Middleware<S> for AnyMiddleware<S> {
    fn process(
        &self,
        action: S::Action,
        state: &S,
        dispatcher: &Dispatcher<S::Action>,
    ) -> Option<S::Action> {
        (self.process)(action, state, dispatcher)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<S: StackState> fmt::Debug for AnyMiddleware<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyMiddleware").field("name", &self.name).finish()
    }
}

/// Ordered list of middleware.
pub struct MiddlewareChain<S: StackState> {
    middleware: Vec<AnyMiddleware<S>>,
}

impl<S: StackState> Default for MiddlewareChain<S> {
    fn default() -> Self {
        Self {
            middleware: Vec::new(),
        }
    }
}

impl<S: StackState> MiddlewareChain<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, middleware: AnyMiddleware<S>) {
        self.middleware.push(middleware);
    }

    pub fn len(&self) -> usize {
        self.middleware.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middleware.is_empty()
    }

    /// Names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.middleware.iter().map(|m| m.name()).collect()
    }

    /// Folds `action` through every middleware. `None` means some middleware
    /// aborted the dispatch.
    pub fn run(
        &self,
        action: S::Action,
        state: &S,
        dispatcher: &Dispatcher<S::Action>,
    ) -> Option<S::Action> {
        let mut current = action;
        for middleware in &self.middleware {
            match middleware.process(current, state, dispatcher) {
                Some(next) => current = next,
                None => {
                    debug!("Dispatch aborted by middleware '{}'", middleware.name());
                    return None;
                }
            }
        }
        Some(current)
    }
}

impl<S: StackState> fmt::Debug for MiddlewareChain<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::navigation::{NavigationAction, NavigationState};
    use crate::test_support::{Recorder, Screen::{self, *}};

    type Nav = NavigationState<Screen>;

    struct Tagging {
        seen: Recorder<NavigationAction<Screen>>,
    }

    impl Middleware<Nav> for Tagging {
        fn process(
            &self,
            action: NavigationAction<Screen>,
            _state: &Nav,
            _dispatcher: &Dispatcher<NavigationAction<Screen>>,
        ) -> Option<NavigationAction<Screen>> {
            self.seen.push(action.clone());
            Some(action)
        }

        fn name(&self) -> &str {
            "tagging"
        }
    }

    fn rewrite_settings() -> AnyMiddleware<Nav> {
        AnyMiddleware::<Nav>::from_fn("rewrite", |action, _state: &Nav, _d: &Dispatcher<_>| match action {
            NavigationAction::Push(Settings) => Some(NavigationAction::Push(Login)),
            other => Some(other),
        })
    }

    #[test]
    fn test_empty_chain_passes_action_through() {
        let chain = MiddlewareChain::<Nav>::new();
        let (dispatcher, _rx) = Dispatcher::channel();
        let out = chain.run(NavigationAction::Push(Home), &Nav::default(), &dispatcher);
        assert_eq!(out, Some(NavigationAction::Push(Home)));
    }

    #[test]
    fn test_later_middleware_sees_rewritten_action() {
        let seen = Recorder::new();
        let mut chain = MiddlewareChain::<Nav>::new();
        chain.push(rewrite_settings());
        chain.push(AnyMiddleware::new(Tagging { seen: seen.clone() }));
        let (dispatcher, _rx) = Dispatcher::channel();

        let out = chain.run(NavigationAction::Push(Settings), &Nav::default(), &dispatcher);

        assert_eq!(out, Some(NavigationAction::Push(Login)));
        assert_eq!(seen.take(), vec![NavigationAction::Push(Login)]);
    }

    #[test]
    fn test_abort_skips_remaining_middleware() {
        let seen = Recorder::new();
        let mut chain = MiddlewareChain::<Nav>::new();
        chain.push(AnyMiddleware::<Nav>::from_fn("block", |_a, _s: &Nav, _d: &Dispatcher<_>| None));
        chain.push(AnyMiddleware::new(Tagging { seen: seen.clone() }));
        let (dispatcher, _rx) = Dispatcher::channel();

        assert_eq!(chain.run(NavigationAction::Pop, &Nav::default(), &dispatcher), None);
        assert_eq!(seen.len(), 0);
    }

    #[test]
    fn test_erased_middleware_keeps_name_and_order() {
        let mut chain = MiddlewareChain::<Nav>::new();
        chain.push(rewrite_settings());
        chain.push(AnyMiddleware::new(Tagging { seen: Recorder::new() }));
        assert_eq!(chain.names(), vec!["rewrite", "tagging"]);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_dispatcher_queues_without_touching_current_action() {
        let mut chain = MiddlewareChain::<Nav>::new();
        chain.push(AnyMiddleware::<Nav>::from_fn("later", |action, _s: &Nav, d: &Dispatcher<_>| {
            d.send(NavigationAction::Push(Help));
            Some(action)
        }));
        let (dispatcher, rx) = Dispatcher::channel();

        let out = chain.run(NavigationAction::Pop, &Nav::default(), &dispatcher);

        assert_eq!(out, Some(NavigationAction::Pop));
        assert_eq!(rx.try_recv().ok(), Some(NavigationAction::Push(Help)));
    }

    #[test]
    fn test_dispatcher_send_fails_after_receiver_dropped() {
        let (dispatcher, rx) = Dispatcher::<NavigationAction<Screen>>::channel();
        drop(rx);
        assert!(!dispatcher.send(NavigationAction::Pop));
    }
}
