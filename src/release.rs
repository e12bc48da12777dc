use serde::{Deserialize, Serialize};

use crate::semver::Version;

/// One changelog entry: a version plus the notes published with it.
///
/// Releases are created once, when published, and never edited afterwards.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Release {
    pub version: Version,
    /// One entry per bullet line, in authoring order.
    pub notes: Vec<String>,
}

impl Release {
    /// # Errors
    ///
    /// If `notes` is empty. Every published release lists at least one change.
    pub fn new(version: Version, notes: Vec<String>) -> Result<Self, EmptyNotesError> {
        if notes.is_empty() {
            return Err(EmptyNotesError { version });
        }
        Ok(Self { version, notes })
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "miette", derive(miette::Diagnostic))]
#[error("Release {version} has no notes")]
#[cfg_attr(
    feature = "miette",
    diagnostic(
        code(release::empty_notes),
        help("A release must list at least one change, like `- Initial release`")
    )
)]
pub struct EmptyNotesError {
    pub version: Version,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::Release;
    use crate::semver::Version;

    #[test]
    fn rejects_empty_notes() {
        let version = Version::from_str("1.0").unwrap();
        let err = Release::new(version, Vec::new()).unwrap_err();
        assert_eq!(err.version, Version::from_str("1.0").unwrap());
    }

    #[test]
    fn serde_round_trip() {
        let release = Release::new(
            Version::from_str("6.3").unwrap(),
            vec!["Added support for Android 12L and Android 13".to_string()],
        )
        .unwrap();
        let json = serde_json::to_string(&release).unwrap();
        assert_eq!(
            json,
            r#"{"version":"6.3","notes":["Added support for Android 12L and Android 13"]}"#
        );
        let parsed: Release = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, release);
    }
}
