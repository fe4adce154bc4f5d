//! # Deep Links
//!
//! Turns a link into a full replacement path. The stores only ever see the
//! result, as `NavigationAction::Replace`; parse failures stay here.
//!
//! ```text
//! "app://home/settings/profile:7"
//!        └─┬┘ └──┬───┘ └───┬───┘
//!        Home  Settings  Profile(7)     (each segment via R::from_str)
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use crate::core::route::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepLinkError {
    /// The link contains no path segments.
    Empty,
    /// The link's scheme is not the one this parser accepts.
    Scheme { expected: String, found: String },
    /// A segment did not parse into a route.
    Segment { segment: String, reason: String },
}

impl fmt::Display for DeepLinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeepLinkError::Empty => write!(f, "deep link has no path"),
            DeepLinkError::Scheme { expected, found } => {
                write!(f, "unexpected scheme '{found}', expected '{expected}'")
            }
            DeepLinkError::Segment { segment, reason } => {
                write!(f, "invalid segment '{segment}': {reason}")
            }
        }
    }
}

impl std::error::Error for DeepLinkError {}

/// Anything that can turn a link into a path of routes.
pub trait DeepLinkParser<R: Route> {
    fn parse(&self, link: &str) -> Result<Vec<R>, DeepLinkError>;
}

/// Splits `scheme://a/b/c` (or `/a/b/c`) on `/` and parses each segment with
/// `R::from_str`. Query strings and fragments are ignored.
#[derive(Debug, Clone)]
pub struct PathLinkParser<R> {
    scheme: Option<String>,
    _route: PhantomData<fn() -> R>,
}

impl<R> Default for PathLinkParser<R> {
    fn default() -> Self {
        Self {
            scheme: None,
            _route: PhantomData,
        }
    }
}

impl<R> PathLinkParser<R> {
    /// Accepts any scheme, or none.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accepts links with this scheme. Scheme-less paths still parse.
    pub fn with_scheme(scheme: impl Into<String>) -> Self {
        Self {
            scheme: Some(scheme.into()),
            _route: PhantomData,
        }
    }
}

impl<R> DeepLinkParser<R> for PathLinkParser<R>
where
    R: Route + FromStr,
    R::Err: fmt::Display,
{
    fn parse(&self, link: &str) -> Result<Vec<R>, DeepLinkError> {
        let link = link.trim();
        let rest = match link.split_once("://") {
            Some((scheme, rest)) => {
                if let Some(expected) = &self.scheme
                    && !expected.eq_ignore_ascii_case(scheme)
                {
                    return Err(DeepLinkError::Scheme {
                        expected: expected.clone(),
                        found: scheme.to_string(),
                    });
                }
                rest
            }
            None => link,
        };
        let path = rest.split(['?', '#']).next().unwrap_or_default();

        let routes = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                segment.parse::<R>().map_err(|e| DeepLinkError::Segment {
                    segment: segment.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<R>, DeepLinkError>>()?;

        if routes.is_empty() {
            return Err(DeepLinkError::Empty);
        }
        Ok(routes)
    }
}
