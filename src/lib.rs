//! Parsing and maintenance of release changelogs for flashable mod packages.
//!
//! A changelog is an ordered, newest-first list of immutable releases. Each
//! release is a version (dot-separated non-negative integers, any number of
//! components) plus the bullet notes published with it. The plain-text layout is
//! the only interface:
//!
//! ```text
//! ### v6.3
//! - Added support for Android 12L and Android 13
//! - Updated the base template to MMT-Ex v2.0
//!
//! ### v6.2
//! - ...
//! ```
//!
//! Parsing and rendering are inverses, so a well-formed document survives a
//! round trip byte for byte.
//!
//! ```
//! use std::str::FromStr;
//!
//! use modlog::{Changelog, Version};
//!
//! let changelog = Changelog::from_str("### v1.0\n- Initial release for Magisk v15.0\n")?;
//! let release = changelog.get_release(&Version::from_str("1.0")?).unwrap();
//! assert_eq!(release.notes, ["Initial release for Magisk v15.0"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod changelog;
mod release;
pub mod semver;

pub use changelog::{Changelog, ParseError, PushError};
pub use release::{EmptyNotesError, Release};
pub use semver::Version;
