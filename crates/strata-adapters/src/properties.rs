//! `build.properties` adapter.
//!
//! The file is a list of `key=value` lines. Comments (`#` or `!`) and blank
//! lines are kept exactly as written, and entries keep their order, so a
//! user's hand-edited file survives every write.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use strata_core::{
    application::{ApplicationError, ports::PropertiesStore},
    error::{StrataError, StrataResult},
};

/// Default file name under the component root.
pub const BUILD_PROPERTIES: &str = "build.properties";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    /// `raw` holds the line as read; it is dropped once the value changes.
    Entry {
        key: String,
        value: String,
        raw: Option<String>,
    },
    Verbatim(String),
}

impl Line {
    fn parse(raw: &str) -> Self {
        let trimmed = raw.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            return Self::Verbatim(raw.to_string());
        }
        match trimmed.split_once('=') {
            Some((key, value)) => Self::Entry {
                key: key.trim().to_string(),
                value: value.trim().to_string(),
                raw: Some(raw.to_string()),
            },
            None => Self::Verbatim(raw.to_string()),
        }
    }

    fn new_entry(key: &str, value: &str) -> Self {
        Self::Entry {
            key: key.to_string(),
            value: value.to_string(),
            raw: None,
        }
    }

    fn key(&self) -> Option<&str> {
        match self {
            Self::Entry { key, .. } => Some(key.as_str()),
            Self::Verbatim(_) => None,
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Entry { raw: Some(raw), .. } => raw.clone(),
            Self::Entry { key, value, .. } => format!("{key}={value}"),
            Self::Verbatim(raw) => raw.clone(),
        }
    }
}

/// Properties store backed by `<root>/build.properties`.
#[derive(Debug, Clone)]
pub struct BuildPropertiesFile {
    file_name: String,
}

impl Default for BuildPropertiesFile {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildPropertiesFile {
    pub fn new() -> Self {
        Self::with_file_name(BUILD_PROPERTIES)
    }

    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    fn path(&self, root: &Path) -> PathBuf {
        root.join(&self.file_name)
    }

    fn load(&self, root: &Path) -> StrataResult<Vec<Line>> {
        let path = self.path(root);
        if !path.is_file() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&path).map_err(|e| properties_error(&path, e))?;
        Ok(text.lines().map(Line::parse).collect())
    }

    fn store(&self, root: &Path, lines: &[Line]) -> StrataResult<()> {
        let path = self.path(root);
        let mut text = lines.iter().map(Line::render).collect::<Vec<_>>().join("\n");
        text.push('\n');
        fs::write(&path, text).map_err(|e| properties_error(&path, e))
    }
}

fn properties_error(path: &Path, e: impl std::fmt::Display) -> StrataError {
    ApplicationError::Properties {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}

impl PropertiesStore for BuildPropertiesFile {
    fn exists(&self, root: &Path) -> bool {
        self.path(root).is_file()
    }

    fn read_all(&self, root: &Path) -> StrataResult<Vec<(String, String)>> {
        Ok(self
            .load(root)?
            .into_iter()
            .filter_map(|line| match line {
                Line::Entry { key, value, .. } => Some((key, value)),
                Line::Verbatim(_) => None,
            })
            .collect())
    }

    fn read(&self, root: &Path, key: &str) -> StrataResult<Option<String>> {
        // Later duplicates win, as they do for Phing.
        Ok(self
            .read_all(root)?
            .into_iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v))
    }

    fn write(&self, root: &Path, key: &str, value: &str) -> StrataResult<()> {
        let mut lines = self.load(root)?;
        let existing = lines.iter_mut().rev().find(|line| line.key() == Some(key));

        match existing {
            Some(Line::Entry { value: v, raw, .. }) => {
                if v.as_str() != value {
                    *v = value.to_string();
                    *raw = None;
                }
            }
            _ => lines.push(Line::new_entry(key, value)),
        }

        debug!(key, value, "Property written");
        self.store(root, &lines)
    }

    fn append(
        &self,
        root: &Path,
        key: &str,
        value: &str,
        after: Option<&str>,
    ) -> StrataResult<()> {
        let mut lines = self.load(root)?;
        let entry = Line::new_entry(key, value);

        let anchor = after.and_then(|anchor| {
            lines
                .iter()
                .rposition(|line| line.key() == Some(anchor))
        });

        match anchor {
            Some(index) => lines.insert(index + 1, entry),
            None => lines.push(entry),
        }

        debug!(key, value, ?after, "Property appended");
        self.store(root, &lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
# project settings
project.name=demo

project.patchLevel = 3
project.stability=beta
";

    fn seeded() -> (TempDir, BuildPropertiesFile) {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(BUILD_PROPERTIES), SAMPLE).unwrap();
        (tmp, BuildPropertiesFile::new())
    }

    fn contents(tmp: &TempDir) -> String {
        fs::read_to_string(tmp.path().join(BUILD_PROPERTIES)).unwrap()
    }

    #[test]
    fn reads_trimmed_values() {
        let (tmp, store) = seeded();
        assert_eq!(
            store.read(tmp.path(), "project.patchLevel").unwrap(),
            Some("3".into())
        );
        assert_eq!(store.read(tmp.path(), "missing").unwrap(), None);
        assert_eq!(store.read_all(tmp.path()).unwrap().len(), 3);
    }

    #[test]
    fn write_updates_in_place_and_keeps_comments() {
        let (tmp, store) = seeded();
        store.write(tmp.path(), "project.name", "other").unwrap();

        let text = contents(&tmp);
        assert!(text.starts_with("# project settings\nproject.name=other\n\n"));
    }

    #[test]
    fn append_after_anchor() {
        let (tmp, store) = seeded();
        store
            .append(tmp.path(), "project.snapshot", "false", Some("project.patchLevel"))
            .unwrap();

        let text = contents(&tmp);
        assert!(text.contains("project.patchLevel = 3\nproject.snapshot=false\nproject.stability=beta"));
    }

    #[test]
    fn untouched_entries_keep_their_spacing() {
        let (tmp, store) = seeded();
        store.write(tmp.path(), "project.stability", "stable").unwrap();

        assert_eq!(
            contents(&tmp),
            "# project settings\nproject.name=demo\n\nproject.patchLevel = 3\nproject.stability=stable\n"
        );
    }

    #[test]
    fn rewriting_the_same_value_keeps_the_line() {
        let (tmp, store) = seeded();
        store.write(tmp.path(), "project.patchLevel", "3").unwrap();
        assert_eq!(contents(&tmp), SAMPLE);
    }

    #[test]
    fn append_without_anchor_goes_last() {
        let (tmp, store) = seeded();
        store
            .append(tmp.path(), "pear.local", "/var/www/${project.channel}", Some("nope"))
            .unwrap();
        assert!(contents(&tmp).ends_with("pear.local=/var/www/${project.channel}\n"));
    }

    #[test]
    fn missing_file_is_created_on_write() {
        let tmp = TempDir::new().unwrap();
        let store = BuildPropertiesFile::new();
        assert!(!store.exists(tmp.path()));

        store.write(tmp.path(), "component.version", "12").unwrap();
        assert!(store.exists(tmp.path()));
        assert_eq!(contents(&tmp), "component.version=12\n");
    }
}
