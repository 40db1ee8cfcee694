//! Pre-release channel handling
//!
//! A pre-release label is always `<channel>.<counter>` where the channel is one of
//! alpha, beta or rc and the counter starts at 1. Channels are ordered
//! alpha < beta < rc, and every channel sorts below the final release.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Pre-release channel (alpha, beta or rc)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    /// Alpha pre-release
    Alpha,
    /// Beta pre-release
    Beta,
    /// Release candidate
    ReleaseCandidate,
}

impl Channel {
    /// Parse a channel name
    ///
    /// Accepts "alpha", "beta" and "rc", ignoring case.
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "alpha" => Ok(Channel::Alpha),
            "beta" => Ok(Channel::Beta),
            "rc" => Ok(Channel::ReleaseCandidate),
            _ => Err(Error::parse(format!(
                "Unknown pre-release channel '{}', expected alpha, beta or rc.",
                s
            ))),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Alpha => write!(f, "alpha"),
            Channel::Beta => write!(f, "beta"),
            Channel::ReleaseCandidate => write!(f, "rc"),
        }
    }
}

/// Pre-release label such as `beta.2`
///
/// The counter is never zero: labels are created through [`PreRelease::first`] or
/// [`PreRelease::new`], and parsing rejects `.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreRelease {
    channel: Channel,
    counter: u32,
}

impl PreRelease {
    /// Create a label, rejecting a zero counter
    pub fn new(channel: Channel, counter: u32) -> Result<Self> {
        if counter == 0 {
            return Err(Error::parse(format!(
                "Pre-release counter for '{}' must be at least 1.",
                channel
            )));
        }
        Ok(PreRelease { channel, counter })
    }

    /// The first label on a channel (`<channel>.1`)
    pub fn first(channel: Channel) -> Self {
        PreRelease {
            channel,
            counter: 1,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Parse a label in `<channel>.<counter>` form
    ///
    /// # Examples
    /// ```ignore
    /// let pr = PreRelease::parse("rc.2")?;
    /// assert_eq!(pr.channel(), Channel::ReleaseCandidate);
    /// assert_eq!(pr.counter(), 2);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        // Reject anything that is not a syntactically valid SemVer pre-release first,
        // so "1.0.0-" or "1.0.0-rc..1" get a precise message.
        semver::Prerelease::new(s).map_err(|e| {
            Error::parse(format!("Pre-release label '{}' is not valid: {}", s, e))
        })?;

        let (channel, counter) = s.split_once('.').ok_or_else(|| {
            Error::parse(format!(
                "Pre-release label '{}' must have the form <channel>.<counter>.",
                s
            ))
        })?;

        let channel = Channel::parse(channel)?;
        let counter = counter.parse::<u32>().map_err(|_| {
            Error::parse(format!("Pre-release counter could not be parsed: '{}'", counter))
        })?;

        PreRelease::new(channel, counter)
    }

    /// The following label on the same channel
    pub fn increment(&self) -> Result<Self> {
        let counter = self.counter.checked_add(1).ok_or_else(|| {
            Error::conflict(format!("Pre-release counter for '{}' overflows", self.channel))
        })?;
        Ok(PreRelease {
            channel: self.channel,
            counter,
        })
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.channel, self.counter)
    }
}
