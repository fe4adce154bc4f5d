//! # Route Registry
//!
//! Lets independent feature modules each claim part of the route space.
//! Handlers are tried in registration order and the first one that returns
//! something wins. The core never calls this; it belongs to the binding
//! layer, which uses it to turn a route into whatever it renders.

use std::fmt;

use log::warn;

use crate::core::route::Route;

type Handler<R, V> = Box<dyn Fn(&R) -> Option<V>>;

pub struct RouteRegistry<R, V> {
    handlers: Vec<(String, Handler<R, V>)>,
    fallback: Option<Box<dyn Fn(&R) -> V>>,
}

impl<R: Route, V> Default for RouteRegistry<R, V> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
            fallback: None,
        }
    }
}

impl<R: Route, V> RouteRegistry<R, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handler. Return `None` from it for routes it does not own.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&R) -> Option<V> + 'static,
    {
        self.handlers.push((name.into(), Box::new(handler)));
        self
    }

    /// Used by [`resolve_or_fallback`](Self::resolve_or_fallback) when no
    /// handler matches.
    pub fn set_fallback<F>(&mut self, fallback: F) -> &mut Self
    where
        F: Fn(&R) -> V + 'static,
    {
        self.fallback = Some(Box::new(fallback));
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// First handler match, or `None` when no handler owns the route.
    pub fn resolve(&self, route: &R) -> Option<V> {
        self.handlers.iter().find_map(|(_, handler)| handler(route))
    }

    /// Like [`resolve`](Self::resolve), falling back on a miss. Returns
    /// `None` only when nothing matched and no fallback is set.
    pub fn resolve_or_fallback(&self, route: &R) -> Option<V> {
        if let Some(view) = self.resolve(route) {
            return Some(view);
        }
        warn!("No handler registered for route {:?}", route);
        self.fallback.as_ref().map(|fallback| fallback(route))
    }
}

impl<R, V> fmt::Debug for RouteRegistry<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRegistry")
            .field(
                "handlers",
                &self.handlers.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>(),
            )
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
