//! # Navigation Stack
//!
//! The linear push/pop stack: state, actions and the reducer.
//!
//! ```text
//! NavigationState
//! └── path: Vec<R>    // [root-adjacent, ..., current]
//! ```
//!
//! The same route may appear more than once. Positional actions clamp or
//! ignore bad indices instead of failing.

use serde::{Deserialize, Serialize};

use crate::core::action::{DepthChange, StackAction};
use crate::core::route::Route;
use crate::core::state::StackState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState<R> {
    pub path: Vec<R>,
}

impl<R> Default for NavigationState<R> {
    fn default() -> Self {
        Self { path: Vec::new() }
    }
}

impl<R: Route> NavigationState<R> {
    pub fn new(path: Vec<R>) -> Self {
        Self { path }
    }

    /// The route on top of the stack.
    pub fn current(&self) -> Option<&R> {
        self.path.last()
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn contains(&self, route: &R) -> bool {
        self.path.contains(route)
    }

    pub fn can_go_back(&self) -> bool {
        !self.path.is_empty()
    }

    /// Index of the last occurrence of `route`.
    pub fn last_index_of(&self, route: &R) -> Option<usize> {
        self.path.iter().rposition(|r| r == route)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationAction<R> {
    Push(R),
    Pop,
    /// Pops up to `n` entries. Over-popping empties the path.
    PopCount(usize),
    /// Pops back to the last occurrence of the route, keeping it on top.
    PopTo(R),
    PopToRoot,
    Replace(Vec<R>),
    /// Inserts at the index, clamped into `[0, len]`.
    InsertAt(R, usize),
    RemoveAt(usize),
}

impl<R: Route> StackAction for NavigationAction<R> {
    fn name(&self) -> &'static str {
        match self {
            NavigationAction::Push(_) => "push",
            NavigationAction::Pop => "pop",
            NavigationAction::PopCount(_) => "pop_count",
            NavigationAction::PopTo(_) => "pop_to",
            NavigationAction::PopToRoot => "pop_to_root",
            NavigationAction::Replace(_) => "replace",
            NavigationAction::InsertAt(_, _) => "insert_at",
            NavigationAction::RemoveAt(_) => "remove_at",
        }
    }

    fn depth_change(&self) -> DepthChange {
        match self {
            NavigationAction::Push(_) | NavigationAction::InsertAt(_, _) => {
                DepthChange::Increasing
            }
            NavigationAction::PopCount(0) => DepthChange::Neutral,
            NavigationAction::Pop
            | NavigationAction::PopCount(_)
            | NavigationAction::PopTo(_)
            | NavigationAction::PopToRoot
            | NavigationAction::RemoveAt(_) => DepthChange::Decreasing,
            NavigationAction::Replace(_) => DepthChange::Neutral,
        }
    }
}

impl<R: Route> StackState for NavigationState<R> {
    type Route = R;
    type Action = NavigationAction<R>;

    fn reduce(&self, action: NavigationAction<R>) -> Self {
        let mut path = self.path.clone();
        match action {
            NavigationAction::Push(route) => path.push(route),
            NavigationAction::Pop => {
                path.pop();
            }
            NavigationAction::PopCount(n) => {
                let keep = path.len().saturating_sub(n);
                path.truncate(keep);
            }
            NavigationAction::PopTo(route) => {
                if let Some(index) = self.last_index_of(&route) {
                    path.truncate(index + 1);
                }
            }
            NavigationAction::PopToRoot => path.clear(),
            NavigationAction::Replace(new_path) => path = new_path,
            NavigationAction::InsertAt(route, index) => {
                let index = index.min(path.len());
                path.insert(index, route);
            }
            NavigationAction::RemoveAt(index) => {
                if index < path.len() {
                    path.remove(index);
                }
            }
        }
        Self { path }
    }

    fn depth(&self) -> usize {
        self.path.len()
    }

    fn top_route(&self) -> Option<&R> {
        self.current()
    }
}
