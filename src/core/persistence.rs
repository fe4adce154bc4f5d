//! # State Persistence
//!
//! Save/restore stack state so a host can bring the user back to where they
//! were. The format is JSON; hosts that want something else can use the serde
//! derives on the state types directly.
//!
//! All writes use atomic rename (write `.tmp`, then `rename()`) for crash safety.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug)]
pub enum PersistenceError {
    Io(io::Error),
    Parse(serde_json::Error),
    /// The target store was mid-update, so nothing was restored.
    Busy,
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io(e) => write!(f, "state I/O error: {e}"),
            PersistenceError::Parse(e) => write!(f, "state parse error: {e}"),
            PersistenceError::Busy => write!(f, "state not restored: an update is in progress"),
        }
    }
}

impl std::error::Error for PersistenceError {}

/// Returns `~/.navstack/state.json`.
pub fn default_state_path() -> Option<PathBuf> {
    crate::core::config::config_dir().map(|d| d.join(crate::core::config::DEFAULT_STATE_FILE))
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, PersistenceError> {
    serde_json::to_string_pretty(value).map_err(PersistenceError::Parse)
}

pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, PersistenceError> {
    serde_json::from_str(json).map_err(PersistenceError::Parse)
}

/// Atomically write `value` as JSON to `path` (via `.tmp` + rename).
/// Missing parent directories are created.
pub fn save_state<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(PersistenceError::Io)?;
    }
    let tmp_path = path.with_extension("tmp");
    let json = to_json(value)?;
    fs::write(&tmp_path, json).map_err(PersistenceError::Io)?;
    fs::rename(&tmp_path, path).map_err(PersistenceError::Io)?;
    debug!("State saved to {}", path.display());
    Ok(())
}

pub fn load_state<T: DeserializeOwned>(path: &Path) -> Result<T, PersistenceError> {
    let json = fs::read_to_string(path).map_err(PersistenceError::Io)?;
    let value = from_json(&json)?;
    debug!("State loaded from {}", path.display());
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::navigation::{NavigationAction, NavigationState};
    use crate::core::presentation::{
        PresentationAction, PresentationConfig, PresentationState, PresentationStyle, Visibility,
    };
    use crate::core::state::StackState;
    use crate::test_support::Screen::{self, *};

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("navstack-persist-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_navigation_round_trip_through_file() {
        let dir = temp_dir();
        let path = dir.join("nested").join("nav.json");
        let state = NavigationState::new(vec![Home, Profile(12), Settings]);

        save_state(&path, &state).unwrap();
        let restored: NavigationState<Screen> = load_state(&path).unwrap();

        assert_eq!(restored, state);
        assert!(!path.with_extension("tmp").exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_presentation_round_trip_through_json() {
        let state = PresentationState::<Screen>::default()
            .reduce(PresentationAction::Present {
                destination: Settings,
                style: PresentationStyle::Sheet,
                config: PresentationConfig::default().with_drag_indicator(Visibility::Hidden),
                embed: true,
            })
            .reduce(PresentationAction::Present {
                destination: Login,
                style: PresentationStyle::FullScreenCover,
                config: PresentationConfig::default(),
                embed: false,
            });

        let restored: PresentationState<Screen> = from_json(&to_json(&state).unwrap()).unwrap();

        assert_eq!(restored, state);
    }

    #[test]
    fn test_empty_state_round_trip() {
        let state = NavigationState::<Screen>::default().reduce(NavigationAction::Pop);
        let restored: NavigationState<Screen> = from_json(&to_json(&state).unwrap()).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result: Result<NavigationState<Screen>, _> = load_state(&temp_dir().join("none.json"));
        assert!(matches!(result, Err(PersistenceError::Io(_))));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result: Result<NavigationState<Screen>, _> = from_json("{\"path\": [\"Nowhere\"]}");
        let err = result.unwrap_err();
        assert!(matches!(err, PersistenceError::Parse(_)));
        assert!(err.to_string().starts_with("state parse error"));
    }
}
