//! navstack: action-driven navigation and presentation stacks.
//!
//! ```rust,ignore
//! use navstack::{NavigationStore, GuardMiddleware, NavigationAction};
//!
//! let store = NavigationStore::default().with_middleware(GuardMiddleware::redirect(
//!     |action, _state| *action == NavigationAction::Push(Route::Settings),
//!     NavigationAction::Push(Route::Login),
//! ));
//! store.push(Route::Settings);
//! assert_eq!(store.current(), Some(Route::Login));
//! ```

pub mod core;
pub mod deep_link;
pub mod middleware;
pub mod registry;
pub mod router;
pub mod store;

#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    DepthChange, Detent, NavigationAction, NavigationState, PresentationAction,
    PresentationConfig, PresentationState, PresentationStyle, PresentedDestination, Route,
    StackAction, StackState, Visibility,
};
pub use deep_link::{DeepLinkError, DeepLinkParser, PathLinkParser};
pub use middleware::{
    AnalyticsEvent, AnalyticsMiddleware, AnyMiddleware, Dispatcher, GuardMiddleware,
    LoggingMiddleware, Middleware, MiddlewareChain,
};
pub use registry::RouteRegistry;
pub use router::{Router, RouterSnapshot};
pub use store::{NavigationStore, ObserverId, PresentationStore, Store};
