//! Bump resolution: how the current version moves to the next one
//!
//! Rules are applied in a fixed order: explicit version, numeric bump, finalize,
//! channel bump. A numeric bump resets the pre-release baseline, so
//! `1.2.3` with `--major --alpha` becomes `2.0.0-alpha.1`.

use crate::domain::prerelease::{Channel, PreRelease};
use crate::domain::version::Version;
use crate::error::{Error, Result};
use tracing::debug;

/// Numeric component to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

/// Everything requested for one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BumpDirective {
    /// Explicit target; when set, every other field is ignored
    pub explicit: Option<String>,
    pub numeric: Option<VersionBump>,
    pub channel: Option<Channel>,
    pub finalize: bool,
}

/// Outcome of resolving a directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Next(Version),
    /// Nothing was requested; the caller decides how to obtain a version
    NoDirective,
}

impl BumpDirective {
    /// Directive carrying only an explicit version
    pub fn explicit(version: impl Into<String>) -> Self {
        BumpDirective {
            explicit: Some(version.into()),
            ..Default::default()
        }
    }

    /// Explicit text that is present and not blank
    fn explicit_text(&self) -> Option<&str> {
        self.explicit
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.explicit_text().is_none()
            && self.numeric.is_none()
            && self.channel.is_none()
            && !self.finalize
    }
}

impl Version {
    /// Increment one numeric component, zero the lower ones and drop the label
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let overflow = |name: &str| Error::conflict(format!("{} version number overflows", name));
        let next = match bump_type {
            VersionBump::Major => Version::new(
                self.major.checked_add(1).ok_or_else(|| overflow("Major"))?,
                0,
                0,
            ),
            VersionBump::Minor => Version::new(
                self.major,
                self.minor.checked_add(1).ok_or_else(|| overflow("Minor"))?,
                0,
            ),
            VersionBump::Patch => Version::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(|| overflow("Patch"))?,
            ),
        };
        Ok(next)
    }
}

/// Compute the next version for `current` under `directive`
///
/// # Errors
/// * `Error::Parse` - the explicit version is malformed
/// * `Error::Conflict` - channel bump combined with finalize, or a move back to a
///   lower channel (beta or alpha from rc, alpha from beta)
pub fn resolve(current: &Version, directive: &BumpDirective) -> Result<Resolution> {
    if let Some(text) = directive.explicit_text() {
        debug!(explicit = text, "using explicit version");
        return Version::parse(text).map(Resolution::Next);
    }

    if directive.is_empty() {
        return Ok(Resolution::NoDirective);
    }

    let mut next = *current;

    if let Some(bump_type) = directive.numeric {
        next = next.bump(bump_type)?;
        debug!(?bump_type, %next, "applied numeric bump");
    }

    if directive.finalize {
        next = next.finalized();
    }

    if let Some(channel) = directive.channel {
        if directive.finalize {
            return Err(Error::conflict(
                "cannot bump channel on a finalized version",
            ));
        }

        // A numeric bump starts a fresh pre-release series
        let base = match directive.numeric {
            Some(_) => None,
            None => current.prerelease,
        };

        if directive.numeric.is_none() {
            check_channel_transition(base.map(|pr| pr.channel()), channel)?;
        }

        let prerelease = match base {
            Some(base) if base.channel() == channel => base.increment()?,
            _ => PreRelease::first(channel),
        };
        next = next.with_prerelease(prerelease);
        debug!(%channel, %next, "applied channel bump");
    }

    Ok(Resolution::Next(next))
}

/// A channel may only stay or move up: rc follows anything, beta never follows rc,
/// alpha never follows beta or rc.
fn check_channel_transition(from: Option<Channel>, to: Channel) -> Result<()> {
    match from {
        Some(from) if from > to => Err(Error::conflict(format!(
            "cannot bump to {} from a {} version",
            to, from
        ))),
        _ => Ok(()),
    }
}
