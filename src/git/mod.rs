//! Version-control side effects
//!
//! After the project file is written, the change is committed and the new commit
//! is tagged. The [Vcs] trait abstracts the two operations so the workflow can run
//! against:
//!
//! - [command::GitCommand]: the `git` executable
//! - [repository::Git2Repository]: libgit2 through the `git2` crate
//! - [mock::MockVcs]: an in-memory recorder for tests
//!
//! `commit` returns the id of the commit it created and `tag` takes that id, so a
//! tag can never land on a different commit than the one just made.

pub mod command;
pub mod mock;
pub mod repository;

pub use command::GitCommand;
pub use mock::{MockCall, MockVcs};
pub use repository::Git2Repository;

use std::fmt;
use std::path::Path;

use crate::config::GitBackend;
use crate::error::Result;

/// Full hash of a commit
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(hash: impl Into<String>) -> Self {
        CommitId(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First seven characters, for display
    pub fn short(&self) -> &str {
        self.0.get(..7).unwrap_or(&self.0)
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Commit and tag operations
pub trait Vcs {
    /// Commit every change to tracked files with `message`
    ///
    /// # Returns
    /// * `Ok(CommitId)` - The commit that was created
    /// * `Err` - Nothing to commit, no repository, or the commit failed
    fn commit(&self, message: &str) -> Result<CommitId>;

    /// Create a lightweight tag `name` pointing at `target`
    ///
    /// # Errors
    /// Fails if the tag already exists or `target` is unknown.
    fn tag(&self, name: &str, target: &CommitId) -> Result<()>;
}

/// Open the configured backend for the repository containing `dir`
pub fn open(backend: GitBackend, dir: &Path) -> Result<Box<dyn Vcs>> {
    match backend {
        GitBackend::Command => Ok(Box::new(GitCommand::new(dir))),
        GitBackend::Libgit2 => Ok(Box::new(Git2Repository::open(dir)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_id_short() {
        let id = CommitId::new("0123456789abcdef");
        assert_eq!(id.short(), "0123456");
        assert_eq!(id.to_string(), "0123456789abcdef");
        assert_eq!(CommitId::new("abc").short(), "abc");
    }

    #[test]
    fn test_open_command_backend_is_lazy() {
        // The git binary is only run on commit, so opening never fails
        assert!(open(GitBackend::Command, Path::new("/nonexistent")).is_ok());
    }
}
