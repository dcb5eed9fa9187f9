//! Image name collision policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to do when two images on one page share a file name.
///
/// Only collisions within a single run are affected. Files left by an
/// earlier run of the same page are always overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Later image replaces the earlier one.
    Overwrite,
    /// Later image gets a deterministic suffix derived from its URL (default).
    #[default]
    Suffix,
    /// Abort the harvest.
    Fail,
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionPolicy::Overwrite => write!(f, "overwrite"),
            CollisionPolicy::Suffix => write!(f, "suffix"),
            CollisionPolicy::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            "suffix" => Ok(CollisionPolicy::Suffix),
            "fail" => Ok(CollisionPolicy::Fail),
            _ => Err(format!("Unknown collision policy: {}", s)),
        }
    }
}
