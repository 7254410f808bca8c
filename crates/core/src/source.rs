//! Loading the flat `name=value` parameter source.
//!
//! The [`SourceProvider`] trait abstracts where the text comes from so the
//! registry can be built from files or from in-memory fixtures. Parsing the
//! text itself is [`parse_source`], which produces a [`RawSource`].

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::ParamError;

// ──────────────────────────────────────────────
// Providers
// ──────────────────────────────────────────────

/// Trait that abstracts reading parameter source text.
pub trait SourceProvider {
    /// Read the source text for a given path.
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error>;
}

/// Filesystem-backed source provider, delegating to `std::fs::read_to_string`.
pub struct FileSystemProvider;

impl SourceProvider for FileSystemProvider {
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error> {
        std::fs::read_to_string(path)
    }
}

/// In-memory source provider for tests and embedding.
///
/// Maps paths to source text. Lookups normalize `.` and `..` without
/// touching the filesystem.
pub struct InMemoryProvider {
    files: HashMap<PathBuf, String>,
}

impl InMemoryProvider {
    pub fn new(files: HashMap<PathBuf, String>) -> Self {
        let files = files
            .into_iter()
            .map(|(path, text)| (Self::normalize_path(&path), text))
            .collect();
        Self { files }
    }

    fn normalize_path(path: &Path) -> PathBuf {
        let mut components = Vec::new();
        for component in path.components() {
            match component {
                std::path::Component::CurDir => {}
                std::path::Component::ParentDir => {
                    // `..` never climbs past the root.
                    if matches!(
                        components.last(),
                        Some(c) if !matches!(
                            c,
                            std::path::Component::RootDir | std::path::Component::Prefix(_)
                        )
                    ) {
                        components.pop();
                    }
                }
                other => components.push(other),
            }
        }
        components.iter().collect()
    }
}

impl SourceProvider for InMemoryProvider {
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error> {
        let normalized = Self::normalize_path(path);
        self.files.get(&normalized).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("file not found in memory: {}", normalized.display()),
            )
        })
    }
}

// ──────────────────────────────────────────────
// Options
// ──────────────────────────────────────────────

/// Policy knobs for the line format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    /// A line whose first non-blank character is one of these is a comment.
    pub comment_markers: Vec<char>,
    /// Recognize `[section]` headers and prefix following names with `section.`.
    pub sections: bool,
}

impl Default for SourceOptions {
    fn default() -> Self {
        SourceOptions {
            comment_markers: vec!['#'],
            sections: true,
        }
    }
}

// ──────────────────────────────────────────────
// Raw source
// ──────────────────────────────────────────────

/// A raw assignment: the unparsed right-hand side and the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub value: String,
    /// 1-based line number of the assignment that won.
    pub line: usize,
}

/// Parameter name → raw text, as read from the source. Later assignments to
/// the same name replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSource(BTreeMap<String, RawEntry>);

impl RawSource {
    pub fn new() -> Self {
        RawSource(BTreeMap::new())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|e| e.value.as_str())
    }

    pub fn entry(&self, name: &str) -> Option<&RawEntry> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(name, raw value)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, e)| (k.as_str(), e.value.as_str()))
    }

    /// Insert an assignment, returning the value it replaced.
    pub fn insert(&mut self, name: String, value: String, line: usize) -> Option<String> {
        self.0
            .insert(name, RawEntry { value, line })
            .map(|previous| previous.value)
    }

    /// Serialize to a JSON object of raw strings.
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        serde_json::Value::Object(map)
    }
}

// ──────────────────────────────────────────────
// Parsing
// ──────────────────────────────────────────────

/// Parse source text into a [`RawSource`].
///
/// Each line is trimmed. Blank lines and comment lines are skipped,
/// `[section]` headers switch the name prefix, and everything else must be
/// `name=value` split at the first `=`. A line containing `=` is always an
/// assignment, even if it starts with `[`. The name is trimmed; the value is
/// the rest of the line as written and may be empty. The name may not.
pub fn parse_source(text: &str, options: &SourceOptions) -> Result<RawSource, ParamError> {
    let mut raw = RawSource::new();
    let mut section = String::new();

    for (idx, full_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = full_line.trim();

        if line.is_empty() {
            continue;
        }
        if line
            .chars()
            .next()
            .is_some_and(|c| options.comment_markers.contains(&c))
        {
            continue;
        }

        if options.sections && line.starts_with('[') && !line.contains('=') {
            let name = line
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
                .ok_or_else(|| malformed(line_no, line))?;
            section = name.trim().to_string();
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| malformed(line_no, line))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(malformed(line_no, line));
        }
        let name = if section.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", section, key)
        };

        let value = value.to_string();
        if let Some(previous) = raw.insert(name.clone(), value, line_no) {
            tracing::debug!(name = %name, previous = %previous, line = line_no, "parameter reassigned");
        }
    }

    tracing::debug!(count = raw.len(), "parameter source parsed");
    Ok(raw)
}

/// Read `path` through `provider` and parse it.
pub fn load_source(
    provider: &dyn SourceProvider,
    path: &Path,
    options: &SourceOptions,
) -> Result<RawSource, ParamError> {
    let text = provider.read_source(path).map_err(|e| ParamError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_source(&text, options)
}

fn malformed(line: usize, text: &str) -> ParamError {
    ParamError::MalformedLine {
        line,
        text: text.to_string(),
    }
}
