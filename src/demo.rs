//! # Demo Wiring
//!
//! A concrete route type, a tiny step language and the router setup used by
//! the `navstack` binary.
//!
//! ```text
//! push settings | pop [n] | pop-to home | root | replace home/help
//! insert help 0 | remove 1 | back
//! sheet profile:7 | cover login | dismiss | dismiss-all | dismiss-to home
//! open app://home/profile:3
//! ```

use std::fmt;
use std::str::FromStr;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use navstack::core::config::ResolvedConfig;
use navstack::{
    AnalyticsMiddleware, DeepLinkError, GuardMiddleware, NavigationAction, NavigationState,
    PathLinkParser, PresentationState, RouteRegistry, Router,
};

pub const LINK_SCHEME: &str = "app";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DemoRoute {
    Home,
    Settings,
    Profile(u32),
    Login,
    Help,
}

impl DemoRoute {
    /// Screens that redirect to login for signed-out users.
    pub fn requires_auth(&self) -> bool {
        matches!(self, DemoRoute::Settings | DemoRoute::Profile(_))
    }
}

impl fmt::Display for DemoRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoRoute::Home => write!(f, "home"),
            DemoRoute::Settings => write!(f, "settings"),
            DemoRoute::Profile(id) => write!(f, "profile:{id}"),
            DemoRoute::Login => write!(f, "login"),
            DemoRoute::Help => write!(f, "help"),
        }
    }
}

impl FromStr for DemoRoute {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(DemoRoute::Home),
            "settings" => Ok(DemoRoute::Settings),
            "login" => Ok(DemoRoute::Login),
            "help" => Ok(DemoRoute::Help),
            other => match other.strip_prefix("profile:") {
                Some(id) => id
                    .parse()
                    .map(DemoRoute::Profile)
                    .map_err(|_| StepError::Route(s.to_string())),
                None => Err(StepError::Route(s.to_string())),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    Empty,
    Unknown(String),
    Route(String),
    Number(String),
    Missing(&'static str),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::Empty => write!(f, "empty step"),
            StepError::Unknown(cmd) => write!(f, "unknown step '{cmd}'"),
            StepError::Route(route) => write!(f, "unknown route '{route}'"),
            StepError::Number(n) => write!(f, "expected a number, got '{n}'"),
            StepError::Missing(what) => write!(f, "missing {what}"),
        }
    }
}

impl std::error::Error for StepError {}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Push(DemoRoute),
    Pop(usize),
    PopTo(DemoRoute),
    Root,
    Replace(Vec<DemoRoute>),
    Insert(DemoRoute, usize),
    Remove(usize),
    /// Host back gesture: drops the top without asking middleware.
    Back,
    Sheet(DemoRoute),
    Cover(DemoRoute),
    Dismiss,
    DismissAll,
    DismissTo(DemoRoute),
    Open(String),
}

fn number(arg: Option<&str>, what: &'static str) -> Result<usize, StepError> {
    let arg = arg.ok_or(StepError::Missing(what))?;
    arg.parse().map_err(|_| StepError::Number(arg.to_string()))
}

fn route(arg: Option<&str>) -> Result<DemoRoute, StepError> {
    arg.ok_or(StepError::Missing("route"))?.parse()
}

impl FromStr for Step {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let command = words.next().ok_or(StepError::Empty)?;
        let first = words.next();
        let second = words.next();
        match command {
            "push" => Ok(Step::Push(route(first)?)),
            "pop" => Ok(Step::Pop(match first {
                Some(_) => number(first, "count")?,
                None => 1,
            })),
            "pop-to" => Ok(Step::PopTo(route(first)?)),
            "root" => Ok(Step::Root),
            "replace" => first
                .ok_or(StepError::Missing("path"))?
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::parse)
                .collect::<Result<Vec<_>, _>>()
                .map(Step::Replace),
            "insert" => Ok(Step::Insert(route(first)?, number(second, "index")?)),
            "remove" => Ok(Step::Remove(number(first, "index")?)),
            "back" => Ok(Step::Back),
            "sheet" => Ok(Step::Sheet(route(first)?)),
            "cover" => Ok(Step::Cover(route(first)?)),
            "dismiss" => Ok(Step::Dismiss),
            "dismiss-all" => Ok(Step::DismissAll),
            "dismiss-to" => Ok(Step::DismissTo(route(first)?)),
            "open" => Ok(Step::Open(first.ok_or(StepError::Missing("link"))?.to_string())),
            other => Err(StepError::Unknown(other.to_string())),
        }
    }
}

/// Builds the demo router: config-driven logging, an auth guard on the
/// navigation stack and analytics on both stacks.
pub fn build_router(config: &ResolvedConfig, signed_in: bool) -> Router<DemoRoute> {
    let mut router = Router::from_config(config);

    router.navigation_mut().add_middleware(GuardMiddleware::new(
        move |action: NavigationAction<DemoRoute>, _state: &NavigationState<DemoRoute>| {
            match action {
                NavigationAction::Push(route) if route.requires_auth() && !signed_in => {
                    info!("Redirecting {} to login", route);
                    Some(NavigationAction::Push(DemoRoute::Login))
                }
                other => Some(other),
            }
        },
    ));

    if config.analytics {
        router
            .navigation_mut()
            .add_middleware(AnalyticsMiddleware::<NavigationState<DemoRoute>>::new(
                |event| match serde_json::to_string(&event) {
                    Ok(json) => info!("analytics {}", json),
                    Err(e) => warn!("Failed to encode analytics event: {}", e),
                },
            ));
        router
            .presentation_mut()
            .add_middleware(AnalyticsMiddleware::<PresentationState<DemoRoute>>::new(
                |event| match serde_json::to_string(&event) {
                    Ok(json) => info!("analytics {}", json),
                    Err(e) => warn!("Failed to encode analytics event: {}", e),
                },
            ));
    }

    router
}

pub fn apply(router: &Router<DemoRoute>, step: &Step) -> Result<(), DeepLinkError> {
    let navigation = router.navigation();
    let presentation = router.presentation();
    match step.clone() {
        Step::Push(route) => router.push(route),
        Step::Pop(1) => router.pop(),
        Step::Pop(count) => navigation.pop_count(count),
        Step::PopTo(route) => {
            if !router.pop_to(route.clone()) {
                warn!("pop-to: {} is not in the path", route);
            }
        }
        Step::Root => router.pop_to_root(),
        Step::Replace(path) => navigation.replace(path),
        Step::Insert(route, at) => navigation.insert(route, at),
        Step::Remove(at) => navigation.remove(at),
        Step::Back => {
            let mut path = navigation.path();
            path.pop();
            navigation.apply_external_path(path);
        }
        Step::Sheet(route) => router.sheet(route),
        Step::Cover(route) => router.full_screen_cover(route),
        Step::Dismiss => router.dismiss(),
        Step::DismissAll => router.dismiss_all(),
        Step::DismissTo(route) => {
            if !presentation.dismiss_to(route.clone()) {
                warn!("dismiss-to: {} is not presented", route);
            }
        }
        Step::Open(link) => {
            router.open_deep_link(&link, &PathLinkParser::with_scheme(LINK_SCHEME))?
        }
    }
    Ok(())
}

/// Maps each route to the label a real UI would render.
pub fn registry() -> RouteRegistry<DemoRoute, String> {
    let mut registry = RouteRegistry::new();
    registry
        .register("account", |route: &DemoRoute| match route {
            DemoRoute::Profile(id) => Some(format!("Profile #{id}")),
            DemoRoute::Login => Some("Sign In".to_string()),
            _ => None,
        })
        .register("app", |route: &DemoRoute| match route {
            DemoRoute::Home => Some("Home".to_string()),
            DemoRoute::Settings => Some("Settings".to_string()),
            _ => None,
        })
        .set_fallback(|route: &DemoRoute| format!("<no view for {route}>"));
    registry
}

/// Text summary of both stacks.
pub fn render(router: &Router<DemoRoute>, registry: &RouteRegistry<DemoRoute, String>) -> String {
    let view = |route: &DemoRoute| {
        registry
            .resolve_or_fallback(route)
            .unwrap_or_else(|| route.to_string())
    };
    let navigation = router.navigation().state();
    let presentation = router.presentation().state();

    let mut out = String::new();
    let path: Vec<String> = navigation.path.iter().map(view).collect();
    out.push_str(&format!("navigation ({}): [{}]\n", path.len(), path.join(" > ")));
    out.push_str(&format!("presented ({}):\n", presentation.len()));
    for entry in &presentation.stack {
        out.push_str(&format!(
            "  - {} as {:?}{}\n",
            view(&entry.destination),
            entry.style,
            if entry.embed_in_navigation { " (embedded)" } else { "" }
        ));
    }
    out
}
