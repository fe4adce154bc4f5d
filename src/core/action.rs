//! # Actions
//!
//! A stack only changes through an action value. Each stack defines its own
//! closed enum (`NavigationAction`, `PresentationAction`); this module holds
//! what both share: a short name for log lines and the direction the action
//! moves the stack's depth.
//!
//! ```text
//! Push(Settings)    depth +1   "push"
//! PopTo(Home)       depth -n   "pop_to"
//! Replace([..])     neutral    "replace"
//! ```
//!
//! Middleware sees every action before the reducer does, so these labels are
//! what logging and analytics report.

use std::fmt::{self, Debug};

/// How an action moves the depth of its stack.
///
/// Only used for diagnostics. Control flow never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthChange {
    Increasing,
    Decreasing,
    Neutral,
}

impl fmt::Display for DepthChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepthChange::Increasing => write!(f, "deeper"),
            DepthChange::Decreasing => write!(f, "shallower"),
            DepthChange::Neutral => write!(f, "same depth"),
        }
    }
}

/// Common surface of navigation and presentation actions.
pub trait StackAction: Clone + Debug + PartialEq + 'static {
    /// Short lowercase name, e.g. `"push"` or `"dismiss_to"`.
    fn name(&self) -> &'static str;

    fn depth_change(&self) -> DepthChange;

    fn is_depth_increasing(&self) -> bool {
        self.depth_change() == DepthChange::Increasing
    }

    fn is_depth_decreasing(&self) -> bool {
        self.depth_change() == DepthChange::Decreasing
    }
}
