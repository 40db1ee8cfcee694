//! Command-line surface
//!
//! Parses flags into a [BumpWorkflowArgs] for [orchestration::run_bump_workflow].

pub mod orchestration;

use std::path::PathBuf;

use tracing::warn;

use crate::domain::{BumpDirective, Channel, VersionBump};
pub use orchestration::{run_bump_workflow, BumpReport, BumpWorkflowArgs, GitOutcome};

#[derive(clap::Parser, Debug, Default)]
#[command(
    name = "csproj-version",
    version,
    about = "Bump the version of a .csproj project file and commit and tag the change"
)]
pub struct Args {
    #[arg(long, help = "Show the current version and exit")]
    pub show: bool,

    #[arg(
        long = "new-version",
        value_name = "VERSION",
        help = "New version (must be SemVer compliant)"
    )]
    pub new_version: Option<String>,

    #[arg(long, help = "Auto-increment major version number")]
    pub major: bool,

    #[arg(long, help = "Auto-increment minor version number")]
    pub minor: bool,

    #[arg(long, help = "Auto-increment patch version number")]
    pub patch: bool,

    #[arg(long, help = "Start or continue an alpha pre-release")]
    pub alpha: bool,

    #[arg(long, help = "Start or continue a beta pre-release")]
    pub beta: bool,

    #[arg(long, help = "Start or continue a release candidate")]
    pub rc: bool,

    #[arg(long = "final", help = "Remove the pre-release label")]
    pub finalize: bool,

    #[arg(short = 'p', long = "project-file", help = "Path to project file")]
    pub project_file: Option<PathBuf>,

    #[arg(long, help = "Do not make any changes in git")]
    pub no_git: bool,

    #[arg(long, help = "Do not generate a git tag")]
    pub no_git_tag: bool,

    #[arg(long, help = "git commit message")]
    pub message: Option<String>,

    #[arg(long, help = "Prefix before version in git")]
    pub git_version_prefix: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Collect the bump flags into a directive
    ///
    /// Only one numeric flag and one channel flag take effect. The first set flag
    /// wins, in the order major, minor, patch and alpha, beta, rc.
    pub fn directive(&self) -> BumpDirective {
        let numeric = first_set(&[
            (self.major, VersionBump::Major),
            (self.minor, VersionBump::Minor),
            (self.patch, VersionBump::Patch),
        ]);
        let channel = first_set(&[
            (self.alpha, Channel::Alpha),
            (self.beta, Channel::Beta),
            (self.rc, Channel::ReleaseCandidate),
        ]);

        BumpDirective {
            explicit: self.new_version.clone(),
            numeric,
            channel,
            finalize: self.finalize,
        }
    }

    pub fn into_workflow_args(self, working_dir: PathBuf) -> BumpWorkflowArgs {
        let directive = self.directive();
        BumpWorkflowArgs {
            working_dir,
            project_file: self.project_file,
            show: self.show,
            directive,
            no_git: self.no_git,
            no_git_tag: self.no_git_tag,
            message: self.message,
            git_version_prefix: self.git_version_prefix,
        }
    }
}

fn first_set<T: Copy + std::fmt::Debug>(flags: &[(bool, T)]) -> Option<T> {
    let mut set = flags.iter().filter(|(on, _)| *on).map(|(_, value)| *value);
    let chosen = set.next();
    let ignored: Vec<T> = set.collect();
    if let Some(chosen) = chosen {
        if !ignored.is_empty() {
            warn!(?chosen, ?ignored, "more than one flag of the same kind given, ignoring the rest");
        }
    }
    chosen
}
