//! # Analytics Middleware
//!
//! Turns every action into an [`AnalyticsEvent`] and hands it to a sink
//! supplied by the host (a logger, a batching uploader, a test recorder).
//! The action itself passes through untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::state::StackState;
use crate::middleware::{Dispatcher, Middleware};

/// One navigation intent, as seen just before it is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent<A, R> {
    pub action: A,
    /// Top of the stack when the action was dispatched.
    pub from_destination: Option<R>,
    pub timestamp: DateTime<Utc>,
}

type Sink<S> = dyn Fn(AnalyticsEvent<<S as StackState>::Action, <S as StackState>::Route>);

pub struct AnalyticsMiddleware<S: StackState> {
    sink: Box<Sink<S>>,
}

impl<S: StackState> AnalyticsMiddleware<S> {
    pub fn new<F>(sink: F) -> Self
    where
        F: Fn(AnalyticsEvent<S::Action, S::Route>) + 'static,
    {
        Self {
            sink: Box::new(sink),
        }
    }
}

impl<S: StackState> Middleware<S> for AnalyticsMiddleware<S> {
    fn process(
        &self,
        action: S::Action,
        state: &S,
        _dispatcher: &Dispatcher<S::Action>,
    ) -> Option<S::Action> {
        (self.sink)(AnalyticsEvent {
            action: action.clone(),
            from_destination: state.top_route().cloned(),
            timestamp: Utc::now(),
        });
        Some(action)
    }

    fn name(&self) -> &str {
        "analytics"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::navigation::{NavigationAction, NavigationState};
    use crate::core::presentation::{
        PresentationAction, PresentationConfig, PresentationState, PresentationStyle,
    };
    use crate::test_support::{Recorder, Screen::{self, *}};

    #[test]
    fn test_event_records_action_and_origin() {
        let events = Recorder::new();
        let sink = events.clone();
        let middleware = AnalyticsMiddleware::<NavigationState<Screen>>::new(move |e| sink.push(e));
        let state = NavigationState::new(vec![Home, Settings]);
        let (dispatcher, _rx) = Dispatcher::channel();

        let before = Utc::now();
        let out = middleware.process(NavigationAction::Push(Help), &state, &dispatcher);
        let after = Utc::now();

        assert_eq!(out, Some(NavigationAction::Push(Help)));
        let recorded = events.take();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].action, NavigationAction::Push(Help));
        assert_eq!(recorded[0].from_destination, Some(Settings));
        assert!(recorded[0].timestamp >= before && recorded[0].timestamp <= after);
    }

    #[test]
    fn test_event_on_empty_stack_has_no_origin() {
        let events = Recorder::new();
        let sink = events.clone();
        let middleware =
            AnalyticsMiddleware::<PresentationState<Screen>>::new(move |e| sink.push(e));
        let (dispatcher, _rx) = Dispatcher::channel();
        let action = PresentationAction::Present {
            destination: Login,
            style: PresentationStyle::Sheet,
            config: PresentationConfig::default(),
            embed: false,
        };

        middleware.process(action, &PresentationState::default(), &dispatcher);

        assert_eq!(events.take()[0].from_destination, None);
    }

    #[test]
    fn test_event_serializes_to_json() {
        let event = AnalyticsEvent {
            action: NavigationAction::Push(Profile(4)),
            from_destination: Some(Home),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"]["Push"]["Profile"], 4);
        assert_eq!(json["from_destination"], "Home");
    }
}
