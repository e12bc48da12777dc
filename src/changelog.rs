use std::{fmt::Display, str::FromStr};

use itertools::Itertools;
use tracing::debug;

use crate::{
    release::{EmptyNotesError, Release},
    semver::{self, Version},
};

/// A heading line names the version of the release below it.
const HEADING_PREFIX: &str = "### v";
/// Every note under a heading is a single bullet line.
const NOTE_PREFIX: &str = "- ";

/// The ordered history of a mod package, newest release first.
///
/// The order is exactly the order releases were added or appeared in the parsed
/// document. Published changelogs already list releases newest first, so the
/// store never re-sorts by version comparison.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Changelog {
    releases: Vec<Release>,
}

impl Changelog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new release at the head of the changelog.
    ///
    /// # Errors
    ///
    /// If a release with the same version is already recorded, or if the release
    /// has no notes. The changelog is left untouched either way.
    pub fn add_release(&mut self, release: Release) -> Result<(), PushError> {
        if release.notes.is_empty() {
            return Err(EmptyNotesError {
                version: release.version,
            }
            .into());
        }
        if self.get_release(&release.version).is_some() {
            return Err(PushError::DuplicateVersion(release.version));
        }
        debug!(
            "recording release {version} with {count} notes",
            version = release.version,
            count = release.notes.len()
        );
        self.releases.insert(0, release);
        Ok(())
    }

    /// All releases, newest first.
    #[must_use]
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    /// Find the release matching `version` exactly, if any.
    #[must_use]
    pub fn get_release(&self, version: &Version) -> Option<&Release> {
        self.releases
            .iter()
            .find(|release| release.version == *version)
    }

    /// The most recent release, if the changelog has any.
    #[must_use]
    pub fn latest(&self) -> Option<&Release> {
        self.releases.first()
    }
}

impl<'a> IntoIterator for &'a Changelog {
    type Item = &'a Release;
    type IntoIter = std::slice::Iter<'a, Release>;

    fn into_iter(self) -> Self::IntoIter {
        self.releases.iter()
    }
}

impl FromStr for Changelog {
    type Err = ParseError;

    /// Parse a plain-text changelog document: repeated blocks of a `### v` heading
    /// followed by `- ` bullet lines, blocks separated by blank lines.
    fn from_str(document: &str) -> Result<Self, Self::Err> {
        let mut releases: Vec<Release> = Vec::new();
        let mut open_block: Option<(Version, Vec<String>)> = None;

        for (index, line) in document.lines().enumerate() {
            let line_number = index + 1;
            if let Some(token) = line.strip_prefix(HEADING_PREFIX) {
                if let Some((version, notes)) = open_block.take() {
                    releases.push(close_block(version, notes)?);
                }
                let version = Version::from_str(token.trim_end())?;
                if releases
                    .iter()
                    .any(|release| release.version == version)
                {
                    return Err(ParseError::DuplicateVersion(version));
                }
                open_block = Some((version, Vec::new()));
            } else if let Some(note) = line.strip_prefix(NOTE_PREFIX) {
                let Some((_, notes)) = open_block.as_mut() else {
                    return Err(ParseError::UnexpectedLine {
                        line_number,
                        line: line.to_string(),
                    });
                };
                notes.push(note.to_string());
            } else if !line.trim().is_empty() {
                return Err(ParseError::UnexpectedLine {
                    line_number,
                    line: line.to_string(),
                });
            }
        }

        if let Some((version, notes)) = open_block {
            releases.push(close_block(version, notes)?);
        }
        debug!("parsed changelog with {count} releases", count = releases.len());
        Ok(Self { releases })
    }
}

fn close_block(version: Version, notes: Vec<String>) -> Result<Release, ParseError> {
    Release::new(version, notes).map_err(|err| ParseError::MissingNotes(err.version))
}

impl Display for Changelog {
    /// The inverse of parsing: the exact document layout, with one blank line
    /// between blocks and a trailing newline.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.releases.is_empty() {
            return Ok(());
        }
        let blocks = self
            .releases
            .iter()
            .map(|release| {
                format!(
                    "{HEADING_PREFIX}{version}\n{notes}",
                    version = release.version,
                    notes = release
                        .notes
                        .iter()
                        .map(|note| format!("{NOTE_PREFIX}{note}"))
                        .join("\n")
                )
            })
            .join("\n\n");
        writeln!(f, "{blocks}")
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "miette", derive(miette::Diagnostic))]
pub enum ParseError {
    #[error(transparent)]
    #[cfg_attr(feature = "miette", diagnostic(transparent))]
    Version(#[from] semver::Error),
    #[error("Release {0} has a heading but no notes")]
    #[cfg_attr(
        feature = "miette",
        diagnostic(
            code(changelog::missing_notes),
            help("Every `### v` heading must be followed by at least one `- ` bullet line")
        )
    )]
    MissingNotes(Version),
    #[error("Version {0} appears more than once")]
    #[cfg_attr(
        feature = "miette",
        diagnostic(
            code(changelog::duplicate_version),
            help("Each release may appear only once in a changelog")
        )
    )]
    DuplicateVersion(Version),
    #[error("Unexpected content on line {line_number}: {line}")]
    #[cfg_attr(
        feature = "miette",
        diagnostic(
            code(changelog::unexpected_line),
            help("Aside from blank separators, every line must start with `### v` or `- `")
        )
    )]
    UnexpectedLine { line_number: usize, line: String },
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "miette", derive(miette::Diagnostic))]
pub enum PushError {
    #[error(transparent)]
    #[cfg_attr(feature = "miette", diagnostic(transparent))]
    EmptyNotes(#[from] EmptyNotesError),
    #[error("Version {0} is already recorded in the changelog")]
    #[cfg_attr(
        feature = "miette",
        diagnostic(
            code(changelog::duplicate_version),
            help("A release is immutable once published, pick a new version instead")
        )
    )]
    DuplicateVersion(Version),
}
