//! Domain logic - the version model and bump rules, independent of files and git

pub mod bump;
pub mod prerelease;
pub mod version;

pub use bump::{resolve, BumpDirective, Resolution, VersionBump};
pub use prerelease::{Channel, PreRelease};
pub use version::Version;
