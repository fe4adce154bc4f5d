//! # Router
//!
//! One navigation store plus one presentation store behind a single API.
//! The router keeps no state of its own; every call goes to exactly one of
//! the two stores, and the stores never see each other.
//!
//! ```text
//! Router<R>
//! ├── navigation: NavigationStore<R>     push / pop / pop_to / pop_to_root
//! └── presentation: PresentationStore<R> sheet / full_screen_cover / dismiss / dismiss_all
//! ```

use std::path::Path;

use log::{Level, debug, info};
use serde::{Deserialize, Serialize};

use crate::core::config::ResolvedConfig;
use crate::core::navigation::NavigationState;
use crate::core::persistence::{self, PersistenceError};
use crate::core::presentation::PresentationState;
use crate::core::route::Route;
use crate::deep_link::{DeepLinkError, DeepLinkParser};
use crate::middleware::LoggingMiddleware;
use crate::store::{NavigationStore, PresentationStore};

/// Both stacks at one instant, for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterSnapshot<R> {
    pub navigation: NavigationState<R>,
    pub presentation: PresentationState<R>,
}

#[derive(Debug)]
pub struct Router<R: Route> {
    navigation: NavigationStore<R>,
    presentation: PresentationStore<R>,
}

impl<R: Route> Default for Router<R> {
    fn default() -> Self {
        Self::new(NavigationStore::default(), PresentationStore::default())
    }
}

impl<R: Route> Router<R> {
    pub fn new(navigation: NavigationStore<R>, presentation: PresentationStore<R>) -> Self {
        Self {
            navigation,
            presentation,
        }
    }

    /// Empty router with action logging installed on both stores when the
    /// config asks for it.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut router = Self::default();
        if config.log_actions {
            router.install_logging(config.action_log_level, &config.action_log_prefix);
        }
        router
    }

    fn install_logging(&mut self, level: Level, prefix: &str) {
        self.navigation
            .add_middleware(LoggingMiddleware::new(level, format!("{prefix} nav")));
        self.presentation
            .add_middleware(LoggingMiddleware::new(level, format!("{prefix} modal")));
    }

    pub fn navigation(&self) -> &NavigationStore<R> {
        &self.navigation
    }

    pub fn presentation(&self) -> &PresentationStore<R> {
        &self.presentation
    }

    /// For registering middleware before the router is shared.
    pub fn navigation_mut(&mut self) -> &mut NavigationStore<R> {
        &mut self.navigation
    }

    pub fn presentation_mut(&mut self) -> &mut PresentationStore<R> {
        &mut self.presentation
    }

    pub fn push(&self, route: R) {
        self.navigation.push(route);
    }

    pub fn pop(&self) {
        self.navigation.pop();
    }

    pub fn pop_to(&self, route: R) -> bool {
        self.navigation.pop_to(route)
    }

    pub fn pop_to_root(&self) {
        self.navigation.pop_to_root();
    }

    pub fn sheet(&self, route: R) {
        self.presentation.sheet(route);
    }

    pub fn full_screen_cover(&self, route: R) {
        self.presentation.full_screen_cover(route);
    }

    pub fn dismiss(&self) {
        self.presentation.dismiss();
    }

    pub fn dismiss_all(&self) {
        self.presentation.dismiss_all();
    }

    /// Parses `link` and replaces the navigation path with the result.
    /// The presentation stack is left alone.
    pub fn open_deep_link<P>(&self, link: &str, parser: &P) -> Result<(), DeepLinkError>
    where
        P: DeepLinkParser<R>,
    {
        let path = parser.parse(link)?;
        info!("Opening deep link {} ({} routes)", link, path.len());
        self.navigation.replace(path);
        Ok(())
    }

    pub fn snapshot(&self) -> RouterSnapshot<R> {
        RouterSnapshot {
            navigation: (*self.navigation.state()).clone(),
            presentation: (*self.presentation.state()).clone(),
        }
    }

    /// Puts both stacks back to `snapshot` without running middleware.
    /// Observers of both stores are notified.
    ///
    /// All or nothing: if either store is mid-update, neither is touched and
    /// this returns false.
    pub fn restore(&self, snapshot: RouterSnapshot<R>) -> bool {
        if self.navigation.is_updating() || self.presentation.is_updating() {
            debug!("Ignoring restore while a store is updating");
            return false;
        }
        let navigation = self.navigation.reset(snapshot.navigation);
        let presentation = self.presentation.reset(snapshot.presentation);
        navigation && presentation
    }

    pub fn save_to(&self, path: &Path) -> Result<(), PersistenceError> {
        persistence::save_state(path, &self.snapshot())
    }

    pub fn restore_from(&self, path: &Path) -> Result<(), PersistenceError> {
        let snapshot = persistence::load_state(path)?;
        if !self.restore(snapshot) {
            return Err(PersistenceError::Busy);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::deep_link::PathLinkParser;
    use crate::test_support::Screen::{self, *};

    #[test]
    fn test_calls_reach_the_right_store() {
        let router = Router::<Screen>::default();
        router.push(Home);
        router.push(Settings);
        router.sheet(Help);
        router.full_screen_cover(Login);

        assert_eq!(router.navigation().path(), vec![Home, Settings]);
        assert_eq!(router.presentation().count(), 2);

        router.dismiss();
        assert_eq!(router.presentation().count(), 1);
        assert_eq!(router.navigation().path(), vec![Home, Settings]);

        router.pop();
        assert_eq!(router.navigation().path(), vec![Home]);
        assert_eq!(router.presentation().count(), 1);

        router.dismiss_all();
        router.pop_to_root();
        assert!(router.navigation().path().is_empty());
        assert_eq!(router.presentation().count(), 0);
    }

    #[test]
    fn test_pop_to_forwards_result() {
        let router = Router::<Screen>::default();
        router.push(Home);
        router.push(Help);
        assert!(!router.pop_to(Settings));
        assert!(router.pop_to(Home));
        assert_eq!(router.navigation().path(), vec![Home]);
    }

    #[test]
    fn test_from_config_installs_logging() {
        let config = ResolvedConfig {
            log_actions: true,
            ..ResolvedConfig::default()
        };
        let router = Router::<Screen>::from_config(&config);
        assert_eq!(router.navigation().middleware().names(), vec!["logging"]);
        assert_eq!(router.presentation().middleware().names(), vec!["logging"]);

        let quiet = ResolvedConfig {
            log_actions: false,
            ..ResolvedConfig::default()
        };
        assert!(Router::<Screen>::from_config(&quiet).navigation().middleware().is_empty());
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let router = Router::<Screen>::default();
        router.push(Home);
        router.push(Profile(5));
        router.sheet(Settings);
        let snapshot = router.snapshot();

        let fresh = Router::<Screen>::default();
        assert!(fresh.restore(snapshot.clone()));
        assert_eq!(fresh.snapshot(), snapshot);
    }

    #[test]
    fn test_save_and_restore_from_file() {
        let path = std::env::temp_dir()
            .join(format!("navstack-router-{}", uuid::Uuid::new_v4()))
            .join("router.json");
        let router = Router::<Screen>::default();
        router.push(Home);
        router.full_screen_cover(Login);
        router.save_to(&path).unwrap();

        let restored = Router::<Screen>::default();
        restored.restore_from(&path).unwrap();

        assert_eq!(restored.snapshot(), router.snapshot());
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_restore_from_inside_observer_is_refused_whole() {
        let path = std::env::temp_dir()
            .join(format!("navstack-router-{}", uuid::Uuid::new_v4()))
            .join("router.json");
        let saved = Router::<Screen>::default();
        saved.push(Home);
        saved.push(Settings);
        saved.sheet(Help);
        saved.save_to(&path).unwrap();

        let router = Rc::new(Router::<Screen>::default());
        let outcome = Rc::new(RefCell::new(None));
        {
            let weak = Rc::downgrade(&router);
            let outcome = Rc::clone(&outcome);
            let path = path.clone();
            router.navigation().subscribe(move |_: &NavigationState<Screen>, _: &NavigationState<Screen>| {
                if let Some(router) = weak.upgrade() {
                    *outcome.borrow_mut() = Some(router.restore_from(&path));
                }
            });
        }

        router.push(Login);

        let result = outcome.borrow_mut().take().unwrap();
        assert!(matches!(result, Err(PersistenceError::Busy)));
        assert_eq!(router.navigation().path(), vec![Login]);
        assert_eq!(router.presentation().count(), 0);

        // Outside a cycle the same file restores both stacks.
        router.restore_from(&path).unwrap();
        assert_eq!(router.navigation().path(), vec![Home, Settings]);
        assert_eq!(router.presentation().count(), 1);
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_deep_link_replaces_path() {
        let router = Router::<u32>::default();
        router.push(99);
        router.open_deep_link("app://1/2", &PathLinkParser::with_scheme("app")).unwrap();
        assert_eq!(router.navigation().path(), vec![1, 2]);

        let err = router.open_deep_link("app://x", &PathLinkParser::with_scheme("app"));
        assert!(err.is_err());
        assert_eq!(router.navigation().path(), vec![1, 2]);
    }
}
