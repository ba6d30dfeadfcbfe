//! Shared typed models used across corpus loading, metrics, and output.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::errors::{CgrankError, CgrankResult};

/// Corpus-wide unique method identifier, assigned upstream and consumed as
/// an opaque key.
pub type MethodId = i64;

/// A metric ranking: MethodId mapped to a real-valued score, held in the
/// descending-score order established by the producing component.
pub type Ranking = IndexMap<MethodId, f64>;

// ---------------------------------------------------------------------------
// ArtefactCoordinate
// ---------------------------------------------------------------------------

/// A versioned package coordinate, rendered canonically as
/// `group:name$version`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ArtefactCoordinate {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl ArtefactCoordinate {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Parse an artefact input directory name of the form
    /// `group_name_version` (exactly three underscore-joined tokens).
    pub fn from_directory_name(dir_name: &str) -> CgrankResult<Self> {
        let parts: Vec<&str> = dir_name.split('_').collect();
        match parts.as_slice() {
            [group, name, version] if !group.is_empty() && !name.is_empty() && !version.is_empty() => {
                Ok(Self::new(*group, *name, *version))
            }
            _ => Err(CgrankError::MalformedArtefactDir(dir_name.to_string())),
        }
    }

    /// Parse a canonical coordinate token `group:name$version`, as embedded
    /// in fasten URIs.
    pub fn parse_token(token: &str) -> Option<Self> {
        let (group, rest) = token.split_once(':')?;
        let (name, version) = rest.split_once('$')?;
        if group.is_empty() || name.is_empty() || version.is_empty() {
            return None;
        }
        Some(Self::new(group, name, version))
    }

    /// Canonical string form, used both as the output directory name and as
    /// the substring match key against method URIs.
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ArtefactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}${}", self.group, self.name, self.version)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_rendering() {
        let coord = ArtefactCoordinate::new("org.apache.commons", "commons-lang3", "3.12.0");
        assert_eq!(coord.canonical(), "org.apache.commons:commons-lang3$3.12.0");
    }

    #[test]
    fn test_from_directory_name() {
        let coord = ArtefactCoordinate::from_directory_name("com.google.guava_guava_31.1-jre")
            .expect("three tokens");
        assert_eq!(coord.group, "com.google.guava");
        assert_eq!(coord.name, "guava");
        assert_eq!(coord.version, "31.1-jre");
        assert_eq!(coord.canonical(), "com.google.guava:guava$31.1-jre");
    }

    #[test]
    fn test_from_directory_name_rejects_wrong_arity() {
        assert!(ArtefactCoordinate::from_directory_name("only-two_tokens").is_err());
        assert!(ArtefactCoordinate::from_directory_name("a_b_c_d").is_err());
        assert!(ArtefactCoordinate::from_directory_name("").is_err());
        assert!(ArtefactCoordinate::from_directory_name("a__1.0").is_err());
    }

    #[test]
    fn test_parse_token_roundtrip() {
        let coord = ArtefactCoordinate::parse_token("g:a$1.0").expect("valid token");
        assert_eq!(coord, ArtefactCoordinate::new("g", "a", "1.0"));
        assert_eq!(
            ArtefactCoordinate::parse_token(&coord.canonical()),
            Some(coord)
        );
    }

    #[test]
    fn test_parse_token_rejects_malformed() {
        assert!(ArtefactCoordinate::parse_token("no-separators").is_none());
        assert!(ArtefactCoordinate::parse_token("g:a-no-version").is_none());
        assert!(ArtefactCoordinate::parse_token(":a$1.0").is_none());
    }
}
