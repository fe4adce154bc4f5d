//! # Routes
//!
//! A route is any value that names a place the user can be. The core never
//! looks inside one: it only clones, compares and hashes routes.
//!
//! Hosts define their own route enums and get the bound for free:
//!
//! ```rust,ignore
//! #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
//! enum AppRoute {
//!     Home,
//!     Profile(u32),
//! }
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Anything that can sit in a navigation or presentation stack.
///
/// `Send + Sync` lets snapshots travel to worker threads and async guards.
/// The serde bounds keep every stack persistable.
pub trait Route:
    Clone + Eq + Hash + Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
}

impl<T> Route for T where
    T: Clone + Eq + Hash + Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
}
