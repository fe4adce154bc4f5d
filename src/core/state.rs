//! # Stack State
//!
//! Core state shape shared by both stacks. This module contains domain logic
//! only, no UI types. Concrete states live in `navigation` and `presentation`.
//!
//! ```text
//! StackState
//! ├── NavigationState<R>     // path: Vec<R>
//! └── PresentationState<R>   // stack: Vec<PresentedDestination<R>>
//! ```
//!
//! State changes only happen through `reduce(state, action)`, and every
//! reduction returns a fresh value. A snapshot handed out earlier is never
//! touched again, so no surprise mutations.

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::action::StackAction;
use crate::core::route::Route;

/// An immutable stack of destinations with a pure, total reducer.
pub trait StackState:
    Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned + 'static
{
    type Route: Route;
    type Action: StackAction;

    /// Applies `action` and returns the resulting state. Never fails: input
    /// that makes no sense for the current state yields an unchanged copy.
    fn reduce(&self, action: Self::Action) -> Self;

    /// Number of entries in the stack.
    fn depth(&self) -> usize;

    /// Destination of the topmost entry.
    fn top_route(&self) -> Option<&Self::Route>;
}
