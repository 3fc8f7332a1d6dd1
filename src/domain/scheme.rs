use crate::error::{Result, ScanError};
use std::fmt;
use std::str::FromStr;

/// Versioning scheme selecting which parser and ordering apply to a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scheme {
    /// `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`
    #[default]
    SemVer,
    /// Three dot-separated integers, e.g. `2024.05.1`
    CalVer,
    /// Plain lexicographic ordering of the raw tag
    String,
}

impl Scheme {
    /// Resolve an optional configured scheme name.
    ///
    /// An unset or empty value falls back to semver; any other unknown name is an error.
    pub fn resolve(name: Option<&str>) -> Result<Self> {
        match name {
            None => Ok(Scheme::default()),
            Some(s) if s.is_empty() => Ok(Scheme::default()),
            Some(s) => s.parse(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::SemVer => "semver",
            Scheme::CalVer => "calver",
            Scheme::String => "string",
        }
    }
}

impl FromStr for Scheme {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "semver" => Ok(Scheme::SemVer),
            "calver" => Ok(Scheme::CalVer),
            "string" => Ok(Scheme::String),
            other => Err(ScanError::UnsupportedScheme(other.to_string())),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
