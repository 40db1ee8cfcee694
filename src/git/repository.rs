use crate::error::{Error, Result};
use crate::git::{CommitId, Vcs};
use git2::{Commit, ErrorCode, Oid, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Current HEAD commit, or None on an unborn branch
    fn head_commit(&self) -> Result<Option<Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Vcs for Git2Repository {
    fn commit(&self, message: &str) -> Result<CommitId> {
        // Same as `git commit --all`: stage modifications and deletions of tracked files only
        let mut index = self.repo.index()?;
        index.update_all(["*"], None)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let parent = self.head_commit()?;

        if let Some(parent) = &parent {
            if parent.tree_id() == tree_id {
                return Err(Error::vcs("nothing to commit"));
            }
        }

        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;
        let parents: Vec<&Commit> = parent.iter().collect();

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        Ok(CommitId::new(oid.to_string()))
    }

    fn tag(&self, name: &str, target: &CommitId) -> Result<()> {
        let oid = Oid::from_str(target.as_str())?;
        let object = self
            .repo
            .find_object(oid, None)
            .map_err(|e| Error::vcs(format!("Cannot find object: {}", e)))?;

        self.repo
            .tag_lightweight(name, &object, false)
            .map_err(|e| Error::vcs(format!("Cannot create tag: {}", e)))?;

        Ok(())
    }
}
