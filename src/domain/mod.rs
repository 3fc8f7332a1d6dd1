//! Domain logic - pure versioning rules independent of git and configuration

pub mod policy;
pub mod scheme;
pub mod version;

pub use policy::VersioningPolicy;
pub use scheme::Scheme;
pub use version::{CalVer, RawVersion, SemVer, Versioned};
