use std::{fmt::Display, str::FromStr};

use itertools::Itertools;
#[cfg(feature = "miette")]
use miette::Diagnostic;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A version identifier: one or more dot-separated non-negative integer components.
///
/// Mod package changelogs mostly use two components (`6.3`), but nothing rules out
/// more, so any number of components is accepted.
///
/// Ordering is lexicographic by component, so a shorter version sorts before any
/// longer version it prefixes: `6` < `6.0` < `6.3`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Version(Vec<u64>);

impl Version {
    /// Build a version from raw components.
    ///
    /// # Errors
    ///
    /// If `components` is empty.
    pub fn new(components: Vec<u64>) -> Result<Self, Error> {
        if components.is_empty() {
            return Err(Error(
                "a version must have at least one component".to_string(),
            ));
        }
        Ok(Self(components))
    }

    #[must_use]
    pub fn components(&self) -> &[u64] {
        &self.0
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components = s
            .split('.')
            .map(|component| {
                component
                    .parse::<u64>()
                    .map_err(|err| Error(format!("{component:?} in {s:?}: {err}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(components)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("."))
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(de::Error::custom)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "miette", derive(Diagnostic))]
#[error("Found invalid version {0}")]
#[cfg_attr(
    feature = "miette",
    diagnostic(
        code(semver::version),
        help("The version must be dot-separated non-negative integers, like `6.3`")
    )
)]
pub struct Error(String);
