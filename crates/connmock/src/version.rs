//! Driver version, read from a TOML metadata document.
//!
//! The document carries a top-level `version` string. Only its leading
//! numeric part counts: "42.17-SNAPSHOT" is 42.17, "3" is 3.0. A missing file,
//! a missing field or a non-numeric value all yield 0.0.

use std::fmt;
use std::path::Path;

use tracing::{info, warn};

/// Metadata packaged with this crate.
const PACKAGED_METADATA: &str = concat!("version = \"", env!("CARGO_PKG_VERSION"), "\"\n");

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const UNKNOWN: Version = Version { major: 0, minor: 0 };

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Version of this build.
    pub fn packaged() -> Version {
        Self::from_metadata(PACKAGED_METADATA, "packaged metadata")
    }

    /// Reads the metadata file at `path`.
    pub fn load(path: &Path) -> Version {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_metadata(&content, &path.display().to_string()),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "version metadata not readable");
                Version::UNKNOWN
            }
        }
    }

    /// Extracts the version from a metadata document.
    pub fn from_metadata(document: &str, origin: &str) -> Version {
        let table = match toml::from_str::<toml::Table>(document) {
            Ok(table) => table,
            Err(e) => {
                warn!(origin, error = %e.message(), "version metadata is not valid TOML");
                return Version::UNKNOWN;
            }
        };
        let version = table
            .get("version")
            .and_then(toml::Value::as_str)
            .and_then(Version::parse)
            .unwrap_or(Version::UNKNOWN);
        info!(origin, %version, "driver version");
        version
    }

    /// Leading `major[.minor]` of `text`, ignoring any suffix.
    pub fn parse(text: &str) -> Option<Version> {
        let text = text.trim();
        let (major, rest) = leading_number(text)?;
        let minor = rest
            .strip_prefix('.')
            .and_then(leading_number)
            .map_or(0, |(minor, _)| minor);
        Some(Version { major, minor })
    }
}

fn leading_number(text: &str) -> Option<(u32, &str)> {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value = text[..digits].parse().ok()?;
    Some((value, &text[digits..]))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_leading_numeric_prefix() {
        assert_eq!(Version::parse("42.17"), Some(Version::new(42, 17)));
        assert_eq!(Version::parse("42.17-SNAPSHOT"), Some(Version::new(42, 17)));
        assert_eq!(Version::parse("1.2.3"), Some(Version::new(1, 2)));
        assert_eq!(Version::parse("3"), Some(Version::new(3, 0)));
        assert_eq!(Version::parse("3.x"), Some(Version::new(3, 0)));
        assert_eq!(Version::parse("develop"), None);
        assert_eq!(Version::parse(""), None);
        assert_eq!(Version::parse("99999999999.1"), None);
    }

    #[test]
    fn metadata_without_usable_version_is_unknown() {
        assert_eq!(Version::from_metadata("name = \"x\"", "t"), Version::UNKNOWN);
        assert_eq!(Version::from_metadata("version = 4", "t"), Version::UNKNOWN);
        assert_eq!(Version::from_metadata("version = \"develop\"", "t"), Version::UNKNOWN);
        assert_eq!(Version::from_metadata("not toml [", "t"), Version::UNKNOWN);
    }

    #[test]
    fn packaged_version_matches_manifest() {
        let expected = Version::parse(env!("CARGO_PKG_VERSION")).unwrap();
        assert_eq!(Version::packaged(), expected);
    }
}
