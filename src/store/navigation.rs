//! Navigation store sugar.
//!
//! Each method builds one [`NavigationAction`] and dispatches it. Nothing
//! here bypasses middleware except [`apply_external_path`], which exists for
//! position changes the host has already made.
//!
//! [`apply_external_path`]: Store::apply_external_path

use crate::core::navigation::{NavigationAction, NavigationState};
use crate::core::route::Route;
use crate::store::Store;

pub type NavigationStore<R> = Store<NavigationState<R>>;

impl<R: Route> Store<NavigationState<R>> {
    pub fn path(&self) -> Vec<R> {
        self.state().path.clone()
    }

    pub fn current(&self) -> Option<R> {
        self.state().current().cloned()
    }

    pub fn push(&self, route: R) {
        self.dispatch(NavigationAction::Push(route));
    }

    pub fn pop(&self) {
        self.dispatch(NavigationAction::Pop);
    }

    pub fn pop_count(&self, count: usize) {
        self.dispatch(NavigationAction::PopCount(count));
    }

    /// Pops back to the last occurrence of `route`. Returns true only when
    /// the route was in the path and the pop itself was applied; a guard
    /// that blocks or rewrites it yields false.
    pub fn pop_to(&self, route: R) -> bool {
        let found = self.state().contains(&route);
        let action = NavigationAction::PopTo(route);
        let applied = self.dispatch_applied(action.clone());
        found && applied == Some(action)
    }

    pub fn pop_to_root(&self) {
        self.dispatch(NavigationAction::PopToRoot);
    }

    pub fn replace(&self, path: Vec<R>) {
        self.dispatch(NavigationAction::Replace(path));
    }

    pub fn insert(&self, route: R, at: usize) {
        self.dispatch(NavigationAction::InsertAt(route, at));
    }

    pub fn remove(&self, at: usize) {
        self.dispatch(NavigationAction::RemoveAt(at));
    }

    /// Adopts a path the host UI changed on its own (e.g. a back swipe).
    /// Skips middleware, still notifies observers.
    pub fn apply_external_path(&self, path: Vec<R>) -> bool {
        self.reset(NavigationState::new(path))
    }
}
