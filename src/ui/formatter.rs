//! Pure formatting functions for UI output.
//!
//! Turns a [BumpReport] into the exact lines written to stdout.

use crate::cli::{BumpReport, GitOutcome};

/// Printed when an explicit project file disables git
pub const GIT_SKIPPED_NOTICE: &str = "Not running git integration when project file has been specified, to prevent running git in wrong directory.";

/// Lines to print for a finished run, in order.
///
/// `--show` produces only the current version. Otherwise the new version, the git
/// notice (only when git was skipped for an explicit project file) and a final
/// success line follow.
pub fn report_lines(report: &BumpReport) -> Vec<String> {
    let mut lines = vec![format!("Current version: {}", report.recorded)];

    let Some(next) = &report.next else {
        return lines;
    };

    lines.push(format!("New version: {}", next));

    if let Some(GitOutcome::SkippedExplicitProjectFile) = report.git {
        lines.push(GIT_SKIPPED_NOTICE.to_string());
    }

    lines.push(format!("Successfully set version to {}", next));
    lines
}
