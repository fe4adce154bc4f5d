//! # Presentation Stack
//!
//! Modal presentations (sheets and full-screen covers), nested to any depth.
//!
//! ```text
//! PresentationState
//! └── stack: Vec<PresentedDestination<R>>    // last = frontmost
//!     ├── id: Uuid                 // fresh per presentation
//!     ├── destination: R
//!     ├── style: PresentationStyle
//!     ├── config: PresentationConfig
//!     └── embed_in_navigation: bool
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::action::{DepthChange, StackAction};
use crate::core::route::Route;
use crate::core::state::StackState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresentationStyle {
    /// Partial-height overlay.
    #[default]
    #[serde(rename = "sheet")]
    Sheet,
    /// Covers the whole screen.
    #[serde(rename = "full_screen_cover")]
    FullScreenCover,
}

/// An allowed resting height for a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Detent {
    Medium,
    Large,
    /// Fraction of the available height, `0.0..=1.0`.
    Fraction(f64),
    /// Fixed height in points.
    Height(f64),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Automatic,
    Visible,
    Hidden,
}

/// Display options for a presented entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationConfig {
    pub detents: Vec<Detent>,
    pub drag_indicator: Visibility,
    pub interactive_dismiss_disabled: bool,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            detents: vec![Detent::Large],
            drag_indicator: Visibility::Automatic,
            interactive_dismiss_disabled: false,
        }
    }
}

impl PresentationConfig {
    pub fn with_detents(mut self, detents: Vec<Detent>) -> Self {
        self.detents = detents;
        self
    }

    pub fn with_drag_indicator(mut self, visibility: Visibility) -> Self {
        self.drag_indicator = visibility;
        self
    }

    pub fn with_interactive_dismiss_disabled(mut self, disabled: bool) -> Self {
        self.interactive_dismiss_disabled = disabled;
        self
    }
}

/// One modal layer.
///
/// `id` is generated at present time and only identifies the layer for UI
/// binding. Two presentations of the same route are distinct entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentedDestination<R> {
    pub id: Uuid,
    pub destination: R,
    pub style: PresentationStyle,
    pub config: PresentationConfig,
    pub embed_in_navigation: bool,
}

impl<R: Route> PresentedDestination<R> {
    pub fn new(
        destination: R,
        style: PresentationStyle,
        config: PresentationConfig,
        embed_in_navigation: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            destination,
            style,
            config,
            embed_in_navigation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationState<R> {
    pub stack: Vec<PresentedDestination<R>>,
}

impl<R> Default for PresentationState<R> {
    fn default() -> Self {
        Self { stack: Vec::new() }
    }
}

impl<R: Route> PresentationState<R> {
    pub fn new(stack: Vec<PresentedDestination<R>>) -> Self {
        Self { stack }
    }

    /// The frontmost entry.
    pub fn top(&self) -> Option<&PresentedDestination<R>> {
        self.stack.last()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn contains(&self, route: &R) -> bool {
        self.stack.iter().any(|entry| &entry.destination == route)
    }

    /// Top entry, if it is presented with `style`.
    pub fn top_with_style(&self, style: PresentationStyle) -> Option<&PresentedDestination<R>> {
        self.top().filter(|entry| entry.style == style)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PresentationAction<R> {
    Present {
        destination: R,
        style: PresentationStyle,
        config: PresentationConfig,
        embed: bool,
    },
    Dismiss,
    DismissAll,
    /// Dismisses down to the deepest layer showing the route, keeping it.
    DismissTo(R),
    /// Swaps the frontmost layer. Presents when nothing is shown.
    Replace {
        destination: R,
        style: PresentationStyle,
        config: PresentationConfig,
        embed: bool,
    },
}

impl<R: Route> StackAction for PresentationAction<R> {
    fn name(&self) -> &'static str {
        match self {
            PresentationAction::Present { .. } => "present",
            PresentationAction::Dismiss => "dismiss",
            PresentationAction::DismissAll => "dismiss_all",
            PresentationAction::DismissTo(_) => "dismiss_to",
            PresentationAction::Replace { .. } => "replace",
        }
    }

    fn depth_change(&self) -> DepthChange {
        match self {
            PresentationAction::Present { .. } => DepthChange::Increasing,
            PresentationAction::Dismiss
            | PresentationAction::DismissAll
            | PresentationAction::DismissTo(_) => DepthChange::Decreasing,
            PresentationAction::Replace { .. } => DepthChange::Neutral,
        }
    }
}

impl<R: Route> StackState for PresentationState<R> {
    type Route = R;
    type Action = PresentationAction<R>;

    fn reduce(&self, action: PresentationAction<R>) -> Self {
        let mut stack = self.stack.clone();
        match action {
            PresentationAction::Present {
                destination,
                style,
                config,
                embed,
            } => stack.push(PresentedDestination::new(destination, style, config, embed)),
            PresentationAction::Dismiss => {
                stack.pop();
            }
            PresentationAction::DismissAll => stack.clear(),
            PresentationAction::DismissTo(route) => {
                if let Some(index) = stack.iter().rposition(|entry| entry.destination == route) {
                    stack.truncate(index + 1);
                }
            }
            PresentationAction::Replace {
                destination,
                style,
                config,
                embed,
            } => {
                stack.pop();
                stack.push(PresentedDestination::new(destination, style, config, embed));
            }
        }
        Self { stack }
    }

    fn depth(&self) -> usize {
        self.stack.len()
    }

    fn top_route(&self) -> Option<&R> {
        self.top().map(|entry| &entry.destination)
    }
}
