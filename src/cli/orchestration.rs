//! Main workflow orchestration logic
//!
//! Load the project file, resolve the next version, write it back and run the git
//! side effects. Nothing here prints: the outcome comes back as a [BumpReport] and
//! the binary decides how to display it.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::{Config, GitConfig};
use crate::descriptor::{self, ProjectFile};
use crate::domain::{resolve, BumpDirective, Resolution, Version};
use crate::error::{Error, Result};
use crate::git::{CommitId, Vcs};

/// Arguments for the bump workflow
///
/// Mirrors the CLI arguments without depending on clap, so the workflow can be
/// driven programmatically.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BumpWorkflowArgs {
    /// Directory used for project file discovery and git
    pub working_dir: PathBuf,

    /// Explicit project file; also disables git integration
    pub project_file: Option<PathBuf>,

    /// Only report the current version
    pub show: bool,

    pub directive: BumpDirective,

    pub no_git: bool,

    pub no_git_tag: bool,

    /// Commit message; defaults to the tag name
    pub message: Option<String>,

    /// Prepended to the version to form the tag name
    pub git_version_prefix: Option<String>,
}

/// What happened on the git side
#[derive(Debug, Clone, PartialEq)]
pub enum GitOutcome {
    /// An explicit project file was given, so git was not touched
    SkippedExplicitProjectFile,
    /// Turned off by `--no-git` or configuration
    Disabled,
    Committed {
        commit: CommitId,
        tag: Option<String>,
    },
    /// Git failed; the version change itself still stands
    Failed(String),
}

/// Result of a workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct BumpReport {
    pub project_file: PathBuf,

    /// Version text as recorded in the file (`0.0.0` when absent)
    pub recorded: String,

    /// The new version; None for `--show`
    pub next: Option<Version>,

    /// None for `--show`
    pub git: Option<GitOutcome>,
}

/// Run the bump workflow
///
/// `prompt` is called when no directive was given and must return a version string.
/// `open_vcs` is called at most once, only when git integration is active.
///
/// # Errors
/// Project file lookup, version parsing and bump conflicts fail the run before the
/// file is written. Git failures never fail the run.
pub fn run_bump_workflow<P, F>(
    args: &BumpWorkflowArgs,
    config: &Config,
    mut prompt: P,
    open_vcs: F,
) -> Result<BumpReport>
where
    P: FnMut() -> Result<String>,
    F: FnOnce(&Path) -> Result<Box<dyn Vcs>>,
{
    let path = descriptor::locate(
        &args.working_dir,
        args.project_file.as_deref(),
        &config.project.extensions,
    )?;
    let mut file = ProjectFile::load(path)?;

    let recorded = file
        .recorded_version()
        .map(|text| text.trim().to_string())
        .unwrap_or_else(|| Version::default().to_string());

    if args.show {
        return Ok(BumpReport {
            project_file: file.path().to_path_buf(),
            recorded,
            next: None,
            git: None,
        });
    }

    let current = file.current_version()?;

    let next = match resolve(&current, &args.directive)? {
        Resolution::Next(next) => next,
        Resolution::NoDirective => {
            let text = prompt()?;
            match resolve(&current, &BumpDirective::explicit(text))? {
                Resolution::Next(next) => next,
                Resolution::NoDirective => {
                    return Err(Error::parse("Version string can not be empty."))
                }
            }
        }
    };

    if next.precedes(&current) {
        warn!(%current, %next, "new version is lower than the current version");
    }

    file.set_version(&next)?;
    file.save()?;

    let git = if args.no_git || !config.git.enabled {
        GitOutcome::Disabled
    } else if args.project_file.is_some() {
        GitOutcome::SkippedExplicitProjectFile
    } else {
        commit_and_tag(args, &config.git, &next, open_vcs)
    };

    Ok(BumpReport {
        project_file: file.path().to_path_buf(),
        recorded,
        next: Some(next),
        git: Some(git),
    })
}

fn commit_and_tag<F>(
    args: &BumpWorkflowArgs,
    git: &GitConfig,
    version: &Version,
    open_vcs: F,
) -> GitOutcome
where
    F: FnOnce(&Path) -> Result<Box<dyn Vcs>>,
{
    let version = version.to_string();
    let prefix = args
        .git_version_prefix
        .as_deref()
        .unwrap_or(&git.version_prefix);
    let tag = format!("{}{}", prefix, version);

    let message = match args.message.as_deref().filter(|m| !m.trim().is_empty()) {
        Some(message) => message.to_string(),
        None => match &git.message {
            Some(template) => GitConfig::render_message(template, &version, &tag),
            None => tag.clone(),
        },
    };
    let create_tag = git.tag && !args.no_git_tag;

    let result = open_vcs(args.working_dir.as_path()).and_then(|vcs| {
        let commit = vcs.commit(&message)?;
        debug!(commit = commit.short(), "committed version change");
        if !create_tag {
            return Ok((commit, None));
        }
        vcs.tag(&tag, &commit)?;
        debug!(%tag, "tagged commit");
        Ok((commit, Some(tag)))
    });

    match result {
        Ok((commit, tag)) => GitOutcome::Committed { commit, tag },
        Err(e) => {
            debug!(error = %e, "git integration failed, ignoring");
            GitOutcome::Failed(e.to_string())
        }
    }
}
