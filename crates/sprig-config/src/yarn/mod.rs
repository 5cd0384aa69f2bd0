//! yarn.lock (v1) parsing
//!
//! The classic yarn lockfile is an indentation-based text format:
//!
//! ```text
//! "@babel/code-frame@^7.0.0", "@babel/code-frame@^7.10.4":
//!   version "7.10.4"
//!   resolved "https://registry.yarnpkg.com/..."
//!   dependencies:
//!     "@babel/highlight" "^7.10.4"
//! ```
//!
//! Every selector of a block resolves to the same entry.

use camino::Utf8Path;
use indexmap::IndexMap;
use sprig_core::error::SprigError;
use sprig_core::types::split_selector;

use crate::ConfigResult;

/// A parsed yarn.lock
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YarnLock {
    entries: Vec<YarnEntry>,
    selectors: IndexMap<String, usize>,
}

/// One resolved package block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YarnEntry {
    /// `name@range` selectors sharing this resolution
    pub selectors: Vec<String>,
    pub version: String,
    pub resolved: Option<String>,
    pub integrity: Option<String>,
    pub dependencies: IndexMap<String, String>,
    pub optional_dependencies: IndexMap<String, String>,
}

impl YarnEntry {
    /// Package name taken from the first selector
    pub fn name(&self) -> Option<&str> {
        self.selectors
            .first()
            .and_then(|selector| split_selector(selector))
            .map(|(name, _)| name)
    }
}

impl YarnLock {
    /// Look up the entry for a `name@range` selector
    pub fn get(&self, selector: &str) -> Option<(usize, &YarnEntry)> {
        let index = *self.selectors.get(selector)?;
        self.entries.get(index).map(|entry| (index, entry))
    }

    /// All entries in file order
    pub fn entries(&self) -> &[YarnEntry] {
        &self.entries
    }

    /// Number of distinct resolved packages
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, entry: YarnEntry) {
        let index = self.entries.len();
        for selector in &entry.selectors {
            self.selectors.insert(selector.clone(), index);
        }
        self.entries.push(entry);
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    None,
    Dependencies,
    OptionalDependencies,
    Other,
}

/// Parse the text of a yarn.lock file
pub fn parse_yarn_lock(content: &str) -> ConfigResult<YarnLock> {
    let mut lock = YarnLock::default();
    let mut current: Option<YarnEntry> = None;
    let mut section = Section::None;

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim_end();
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let indent = line.len() - trimmed.len();
        match indent {
            0 => {
                if trimmed.starts_with("__metadata") {
                    return Err(parse_error(
                        line_no,
                        "yarn berry lockfiles are not supported",
                    ));
                }
                let header = trimmed
                    .strip_suffix(':')
                    .ok_or_else(|| parse_error(line_no, "expected `selector:` block header"))?;

                if let Some(entry) = current.take() {
                    lock.push(finish_entry(entry, line_no)?);
                }
                let selectors = split_selectors(header);
                if selectors.iter().any(|s| split_selector(s).is_none()) {
                    return Err(parse_error(line_no, "selector is not of the form name@range"));
                }
                current = Some(YarnEntry {
                    selectors,
                    ..YarnEntry::default()
                });
                section = Section::None;
            },
            2 => {
                let entry = current
                    .as_mut()
                    .ok_or_else(|| parse_error(line_no, "field outside of a package block"))?;

                if let Some(name) = trimmed.strip_suffix(':') {
                    section = match unquote(name).as_str() {
                        "dependencies" => Section::Dependencies,
                        "optionalDependencies" => Section::OptionalDependencies,
                        _ => Section::Other,
                    };
                    continue;
                }

                section = Section::None;
                let (key, value) = split_key_value(trimmed)
                    .ok_or_else(|| parse_error(line_no, "expected `key value`"))?;
                match key.as_str() {
                    "version" => entry.version = value,
                    "resolved" => entry.resolved = Some(value),
                    "integrity" => entry.integrity = Some(value),
                    _ => {},
                }
            },
            4 => {
                let entry = current
                    .as_mut()
                    .ok_or_else(|| parse_error(line_no, "dependency outside of a package block"))?;
                let (name, range) = split_key_value(trimmed)
                    .ok_or_else(|| parse_error(line_no, "expected `name range`"))?;
                match section {
                    Section::Dependencies => {
                        entry.dependencies.insert(name, range);
                    },
                    Section::OptionalDependencies => {
                        entry.optional_dependencies.insert(name, range);
                    },
                    Section::Other => {},
                    Section::None => {
                        return Err(parse_error(line_no, "unexpected indentation"));
                    },
                }
            },
            _ => return Err(parse_error(line_no, "unexpected indentation")),
        }
    }

    if let Some(entry) = current.take() {
        let last_line = content.lines().count();
        lock.push(finish_entry(entry, last_line)?);
    }

    Ok(lock)
}

/// Load and parse yarn.lock from file path
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<YarnLock> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SprigError::io(format!("Failed to read {}", path), e))?;

    parse_yarn_lock(&content)
}

fn finish_entry(entry: YarnEntry, line: usize) -> ConfigResult<YarnEntry> {
    if entry.version.is_empty() {
        return Err(parse_error(
            line,
            &format!("block {} has no version", entry.selectors.join(", ")),
        ));
    }
    Ok(entry)
}

fn parse_error(line: usize, message: &str) -> SprigError {
    SprigError::LockfileParse {
        line,
        message: message.to_string(),
    }
}

/// Split a block header into selectors, honoring quotes
fn split_selectors(header: &str) -> Vec<String> {
    let mut selectors = Vec::new();
    let mut buf = String::new();
    let mut in_quotes = false;

    for c in header.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                selectors.push(buf.trim().to_string());
                buf.clear();
            },
            _ => buf.push(c),
        }
    }
    if !buf.trim().is_empty() {
        selectors.push(buf.trim().to_string());
    }

    selectors.retain(|s| !s.is_empty());
    selectors
}

/// Split `key value` where either side may be quoted
fn split_key_value(line: &str) -> Option<(String, String)> {
    let (key, rest) = if let Some(quoted) = line.strip_prefix('"') {
        let end = quoted.find('"')?;
        (&quoted[..end], &quoted[end + 1..])
    } else {
        let end = line.find(char::is_whitespace)?;
        (&line[..end], &line[end..])
    };

    let value = rest.trim();
    if value.is_empty() {
        return None;
    }
    Some((key.to_string(), unquote(value)))
}

fn unquote(value: &str) -> String {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
        .replace("\\\"", "\"")
}
