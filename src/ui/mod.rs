//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Printing and interactive input handling

use std::io::{self, BufRead, Write};

use console::style;

use crate::cli::BumpReport;
use crate::error::Result;

pub mod formatter;

pub use formatter::{report_lines, GIT_SKIPPED_NOTICE};

/// Format and print an error message in red on stderr.
pub fn display_error(message: &str) {
    eprintln!("{}", style(message).red().for_stderr());
}

/// Write the report lines to `out`.
pub fn write_report<W: Write>(out: &mut W, report: &BumpReport) -> io::Result<()> {
    for line in report_lines(report) {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

/// Asks for a version number on stdout and reads one line from stdin.
///
/// Returns the line without its trailing newline; EOF yields an empty string.
pub fn prompt_version() -> Result<String> {
    let stdin = io::stdin();
    read_version(&mut stdin.lock(), &mut io::stdout())
}

fn read_version<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    write!(out, "Version number: ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
