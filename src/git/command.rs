use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};
use crate::git::{CommitId, Vcs};

/// Runs the `git` executable in a working directory
pub struct GitCommand {
    program: String,
    dir: PathBuf,
}

impl GitCommand {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        GitCommand {
            program: "git".to_string(),
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Use a different executable (e.g. a wrapper script)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Run git with `args` and return its trimmed stdout
    ///
    /// Any non-zero exit code is an error carrying git's output.
    fn run(&self, args: &[&str]) -> Result<String> {
        debug!(program = %self.program, ?args, "running git");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.dir)
            .output()
            .map_err(|e| Error::vcs(format!("failed to execute {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(Error::vcs(format!(
                "git {} exited with code {}\nStdout: {}\nStderr: {}",
                args.first().copied().unwrap_or_default(),
                output.status.code().unwrap_or(-1),
                stdout.trim(),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Vcs for GitCommand {
    fn commit(&self, message: &str) -> Result<CommitId> {
        self.run(&["commit", "--all", "--message", message])?;
        let hash = self.run(&["rev-parse", "HEAD"])?;
        Ok(CommitId::new(hash))
    }

    fn tag(&self, name: &str, target: &CommitId) -> Result<()> {
        self.run(&["tag", name, target.as_str()])?;
        Ok(())
    }
}
