//! Project file (descriptor) access
//!
//! The document is edited as text: only the first `<Version>` element is touched
//! (or a new one inserted), and every other byte is written back unchanged.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::domain::Version;
use crate::error::{Error, Result};

fn version_element() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"<Version(?:\s[^>]*?)?(?:/>|>([^<]*)</Version\s*>)")
            .expect("version element pattern is valid")
    })
}

fn property_group_open() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"<PropertyGroup(?:\s[^>]*?)?(/?)>").expect("property group pattern is valid")
    })
}

fn property_group_close() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"</PropertyGroup\s*>").expect("closing pattern is valid"))
}

fn element_close() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"</[A-Za-z_][\w.:-]*\s*>").expect("closing tag pattern is valid")
    })
}

fn element_open() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"<([A-Za-z_][\w.:-]*)(?:\s[^>]*?)?(/?)>").expect("start tag pattern is valid")
    })
}

/// Comments, CDATA sections and processing instructions
fn markup_ignored() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<!--.*?-->|<!\[CDATA\[.*?\]\]>|<\?.*?\?>")
            .expect("ignored markup pattern is valid")
    })
}

/// Byte ranges of the document that hold no elements
fn ignored_spans(contents: &str) -> Vec<Range<usize>> {
    markup_ignored()
        .find_iter(contents)
        .map(|m| m.range())
        .collect()
}

/// Matches of `re` at or after `from` that start outside every ignored span
fn matches_outside<'t>(
    re: &'static Regex,
    contents: &'t str,
    spans: &'t [Range<usize>],
    from: usize,
) -> impl Iterator<Item = Captures<'t>> + 't {
    re.captures_iter(contents).filter(move |caps| {
        let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
        start >= from && !spans.iter().any(|span| span.contains(&start))
    })
}

/// Locate the project file to operate on
///
/// An explicit path must exist. Otherwise `dir` must contain exactly one file with
/// one of the given extensions.
///
/// # Errors
/// * `Error::NotFound` - explicit path missing, no candidate, or more than one candidate
pub fn locate(dir: &Path, explicit: Option<&Path>, extensions: &[String]) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(Error::not_found("Unable to find a project file."))
        };
    }

    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
                .unwrap_or(false)
        })
        .collect();
    candidates.sort();

    match candidates.len() {
        0 => Err(Error::not_found("Unable to find a project file.")),
        1 => Ok(candidates.remove(0)),
        _ => {
            let names: Vec<String> = candidates
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect();
            Err(Error::not_found(format!(
                "Found more than one project file ({}); use --project-file to pick one.",
                names.join(", ")
            )))
        }
    }
}

/// A loaded project file
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFile {
    path: PathBuf,
    contents: String,
}

impl ProjectFile {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = fs::read_to_string(&path)?;
        debug!(path = %path.display(), "loaded project file");
        Ok(ProjectFile { path, contents })
    }

    pub fn from_contents(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        ProjectFile {
            path: path.into(),
            contents: contents.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Text of the first `<Version>` element, if the document has one
    ///
    /// A self-closing `<Version/>` yields an empty string.
    pub fn recorded_version(&self) -> Option<&str> {
        let spans = ignored_spans(&self.contents);
        let value = matches_outside(version_element(), &self.contents, &spans, 0)
            .next()
            .map(|caps| caps.get(1).map(|m| m.range()))?;
        Some(value.map(|range| &self.contents[range]).unwrap_or(""))
    }

    /// Recorded version parsed, or `0.0.0` when the element is absent
    pub fn current_version(&self) -> Result<Version> {
        match self.recorded_version() {
            Some(text) => Version::parse(text),
            None => Ok(Version::default()),
        }
    }

    /// Record `version` in the document, inserting the element if needed
    pub fn set_version(&mut self, version: &Version) -> Result<()> {
        let rendered = version.to_string();
        let contents = &self.contents;
        let spans = ignored_spans(contents);

        let found = matches_outside(version_element(), contents, &spans, 0).next();
        let (range, replacement) = if let Some(caps) = found {
            match caps.get(1) {
                Some(value) => (value.range(), rendered),
                None => {
                    let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
                    (whole, format!("<Version>{}</Version>", rendered))
                }
            }
        } else {
            insertion(contents, &spans, &rendered)?
        };

        self.contents.replace_range(range, &replacement);
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, &self.contents)?;
        debug!(path = %self.path.display(), "wrote project file");
        Ok(())
    }
}

/// Where and what to insert when the document has no `<Version>` element
fn insertion(
    contents: &str,
    spans: &[Range<usize>],
    rendered: &str,
) -> Result<(Range<usize>, String)> {
    let element = format!("<Version>{}</Version>", rendered);

    if let Some(caps) = matches_outside(property_group_open(), contents, spans, 0).next() {
        let open = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
        let self_closing = caps.get(1).map(|m| !m.as_str().is_empty()).unwrap_or(false);

        if self_closing {
            return Ok((open, format!("<PropertyGroup>{}</PropertyGroup>", element)));
        }

        let close = matches_outside(property_group_close(), contents, spans, open.end)
            .next()
            .and_then(|caps| caps.get(0).map(|m| m.start()))
            .ok_or_else(|| Error::descriptor("<PropertyGroup> is never closed"))?;
        return Ok(insert_before(contents, close, &element));
    }

    let group = format!("<PropertyGroup>{}</PropertyGroup>", element);

    let root = matches_outside(element_open(), contents, spans, 0)
        .next()
        .ok_or_else(|| Error::descriptor("no root element"))?;
    let root_tag = root.get(0).map(|m| m.range()).unwrap_or(0..0);
    let root_name = root.get(1).map(|m| m.as_str()).unwrap_or_default();
    let root_self_closing = root.get(2).map(|m| !m.as_str().is_empty()).unwrap_or(false);

    if root_self_closing {
        let start_tag = contents[root_tag.clone()]
            .trim_end_matches('>')
            .trim_end_matches('/')
            .trim_end();
        let expanded = format!("{}>{}</{}>", start_tag, group, root_name);
        return Ok((root_tag, expanded));
    }

    // Only comments, processing instructions and whitespace may follow the root,
    // so its closing tag is the last one outside the ignored spans.
    let close = matches_outside(element_close(), contents, spans, root_tag.end)
        .last()
        .and_then(|caps| caps.get(0).map(|m| m.start()))
        .ok_or_else(|| Error::descriptor("no closing tag for the root element"))?;
    Ok(insert_before(contents, close, &group))
}

/// Insert `element` before the closing tag at `at`, on its own line when the closing
/// tag starts a line, indented one level deeper than that tag.
fn insert_before(contents: &str, at: usize, element: &str) -> (Range<usize>, String) {
    let before = &contents[..at];
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let indent = &before[line_start..];

    if line_start > 0 && indent.chars().all(|c| c == ' ' || c == '\t') {
        let newline = if contents.contains("\r\n") { "\r\n" } else { "\n" };
        let unit = if indent.contains('\t') { "\t" } else { "  " };
        let text = format!("{indent}{unit}{element}{newline}");
        (line_start..line_start, text)
    } else {
        (at..at, element.to_string())
    }
}
