//! Scheme-specific version values and their ordering
//!
//! Every scheme implements [`Versioned`]: a fallible parse from the raw tag string
//! plus a total order. Ordering is by precedence only, so two values may be equal
//! while their original spellings differ (e.g. `v1.0.0` and `1.0.0+build.7`).

use crate::domain::Scheme;
use crate::error::{Result, ScanError};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static SEMVER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]+)\.([0-9]+)\.([0-9]+)(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$",
    )
    .unwrap()
});

/// A version value that can be parsed from a raw tag and totally ordered
pub trait Versioned: Ord + Sized {
    /// Scheme this type implements
    const SCHEME: Scheme;

    /// Parse a raw tag string, failing with [`ScanError::InvalidVersion`]
    fn parse(raw: &str) -> Result<Self>;

    /// The raw string this value was parsed from
    fn original(&self) -> &str;
}

/// Semantic version parsed from a tag such as `v1.2.3-rc.1+build.5`
#[derive(Debug, Clone)]
pub struct SemVer {
    pub original: String,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre_release: String,
    pub build_metadata: String,
}

impl SemVer {
    pub fn is_pre_release(&self) -> bool {
        !self.pre_release.is_empty()
    }
}

impl Versioned for SemVer {
    const SCHEME: Scheme = Scheme::SemVer;

    fn parse(raw: &str) -> Result<Self> {
        let stripped = raw.strip_prefix('v').unwrap_or(raw);
        let invalid = || ScanError::invalid_version(Self::SCHEME, raw);

        let caps = SEMVER_RE.captures(stripped).ok_or_else(invalid)?;
        let number = |i: usize| caps[i].parse::<u64>().map_err(|_| invalid());

        Ok(SemVer {
            original: raw.to_string(),
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            pre_release: caps.get(4).map_or("", |m| m.as_str()).to_string(),
            build_metadata: caps.get(5).map_or("", |m| m.as_str()).to_string(),
        })
    }

    fn original(&self) -> &str {
        &self.original
    }
}

impl Ord for SemVer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| {
                // A release outranks any pre-release of the same core. Pre-release
                // strings are compared whole, not per dot-separated identifier.
                match (self.is_pre_release(), other.is_pre_release()) {
                    (false, false) => Ordering::Equal,
                    (false, true) => Ordering::Greater,
                    (true, false) => Ordering::Less,
                    (true, true) => self.pre_release.cmp(&other.pre_release),
                }
            })
    }
}

impl PartialOrd for SemVer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SemVer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemVer {}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.is_pre_release() {
            write!(f, "-{}", self.pre_release)?;
        }
        if !self.build_metadata.is_empty() {
            write!(f, "+{}", self.build_metadata)?;
        }
        Ok(())
    }
}

/// Calendar version with exactly three integer components, e.g. `2024.05.1`
#[derive(Debug, Clone)]
pub struct CalVer {
    pub original: String,
    pub parts: [u64; 3],
}

impl Versioned for CalVer {
    const SCHEME: Scheme = Scheme::CalVer;

    fn parse(raw: &str) -> Result<Self> {
        let invalid = || ScanError::invalid_version(Self::SCHEME, raw);

        let components: Vec<&str> = raw.split('.').collect();
        if components.len() != 3 {
            return Err(invalid());
        }

        let mut parts = [0u64; 3];
        for (slot, component) in parts.iter_mut().zip(&components) {
            if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *slot = component.parse().map_err(|_| invalid())?;
        }

        Ok(CalVer {
            original: raw.to_string(),
            parts,
        })
    }

    fn original(&self) -> &str {
        &self.original
    }
}

impl Ord for CalVer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts.cmp(&other.parts)
    }
}

impl PartialOrd for CalVer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CalVer {
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts
    }
}

impl Eq for CalVer {}

/// Unparsed tag ordered lexicographically; every string is valid
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RawVersion(pub String);

impl Versioned for RawVersion {
    const SCHEME: Scheme = Scheme::String;

    fn parse(raw: &str) -> Result<Self> {
        Ok(RawVersion(raw.to_string()))
    }

    fn original(&self) -> &str {
        &self.0
    }
}

/// Whether `raw` parses under `scheme`
pub fn is_valid(raw: &str, scheme: Scheme) -> bool {
    match scheme {
        Scheme::SemVer => SemVer::parse(raw).is_ok(),
        Scheme::CalVer => CalVer::parse(raw).is_ok(),
        Scheme::String => true,
    }
}

/// Parse both strings under `scheme` and order them
pub fn compare(a: &str, b: &str, scheme: Scheme) -> Result<Ordering> {
    fn cmp_as<V: Versioned>(a: &str, b: &str) -> Result<Ordering> {
        Ok(V::parse(a)?.cmp(&V::parse(b)?))
    }

    match scheme {
        Scheme::SemVer => cmp_as::<SemVer>(a, b),
        Scheme::CalVer => cmp_as::<CalVer>(a, b),
        Scheme::String => cmp_as::<RawVersion>(a, b),
    }
}
