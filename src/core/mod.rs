//! # Core Stack Logic
//!
//! Stack states, actions and reducers for both navigation stacks.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (stacks)       │
//!                    │  • Action (intents)     │
//!                    │  • reduce() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────▼─────────────┐
//!                    │   Store + Middleware    │
//!                    └───────────┬─────────────┘
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │  Terminal  │      │  Desktop   │      │  Web/WASM  │
//!     │  binding   │      │  binding   │      │  binding   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! `config` and `persistence` are the only modules here that touch the
//! filesystem, and the stores never call them.
//!
//! ## Modules
//!
//! - [`route`]: the `Route` bound every destination satisfies
//! - [`action`]: the `StackAction` trait and `DepthChange`
//! - [`state`]: the `StackState` trait
//! - [`navigation`]: push/pop stack
//! - [`presentation`]: modal stack
//! - [`config`]: layered configuration
//! - [`persistence`]: JSON save/restore

pub mod action;
pub mod config;
pub mod navigation;
pub mod persistence;
pub mod presentation;
pub mod route;
pub mod state;

pub use action::{DepthChange, StackAction};
pub use navigation::{NavigationAction, NavigationState};
pub use presentation::{
    Detent, PresentationAction, PresentationConfig, PresentationState, PresentationStyle,
    PresentedDestination, Visibility,
};
pub use route::Route;
pub use state::StackState;
