use lazy_static::lazy_static;
use regex::Regex;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Value;

use crate::error::Result;

/// Pattern matching typed source paths (`.ts` / `.tsx`).
const TYPED_SOURCES_PATTERN: &str = r"\.tsx?$";

lazy_static! {
    static ref TYPED_SOURCES_RE: Regex = Regex::new(TYPED_SOURCES_PATTERN).unwrap();
}

/// A file-path predicate attached to an override rule.
///
/// Serializes as its pattern string; equality compares patterns, not the
/// compiled automaton.
#[derive(Debug, Clone)]
pub struct FilePattern {
    pattern: String,
    regex: Regex,
}

impl FilePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The canonical pattern for typed sources (`.ts` / `.tsx` files).
    pub fn typed_sources() -> Self {
        Self {
            pattern: TYPED_SOURCES_PATTERN.to_string(),
            regex: TYPED_SOURCES_RE.clone(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

impl PartialEq for FilePattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for FilePattern {}

impl Serialize for FilePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.pattern)
    }
}

/// Option payload attached to a preset or plugin reference.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryOptions {
    /// No payload; the entry serializes as a bare name.
    Bare,
    /// Registered at this position but turned off; serializes as
    /// `[name, false]`. Used to pin ordering for plugins that are only
    /// enabled through an override.
    Disabled,
    /// An option payload; serializes as `[name, {..}]`.
    Config(Value),
}

/// A single preset or plugin reference in the emitted pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    pub options: EntryOptions,
}

impl Entry {
    pub fn bare(name: &str) -> Self {
        Self {
            name: name.to_string(),
            options: EntryOptions::Bare,
        }
    }

    pub fn disabled(name: &str) -> Self {
        Self {
            name: name.to_string(),
            options: EntryOptions::Disabled,
        }
    }

    pub fn with_options(name: &str, options: Value) -> Self {
        Self {
            name: name.to_string(),
            options: EntryOptions::Config(options),
        }
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.options {
            EntryOptions::Bare => serializer.serialize_str(&self.name),
            EntryOptions::Disabled => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&self.name)?;
                seq.serialize_element(&false)?;
                seq.end()
            }
            EntryOptions::Config(options) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&self.name)?;
                seq.serialize_element(options)?;
                seq.end()
            }
        }
    }
}

/// Scopes a plugin list to files matching (`test`) or not matching
/// (`exclude`) a pattern, layered on top of the base plugin list.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct OverrideEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<FilePattern>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<FilePattern>,

    pub plugins: Vec<Entry>,
}

/// The resolved transform pipeline: ordered presets, plugins, and
/// per-file-pattern overrides. Order is significant; the transform engine
/// applies each sequence as given.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TransformConfig {
    pub presets: Vec<Entry>,
    pub plugins: Vec<Entry>,
    pub overrides: Vec<OverrideEntry>,
}

impl TransformConfig {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_sources_pattern() {
        let pattern = FilePattern::typed_sources();

        assert!(pattern.matches("src/App.ts"));
        assert!(pattern.matches("src/App.tsx"));
        assert!(!pattern.matches("src/App.js"));
        assert!(!pattern.matches("src/App.jsx"));
        assert!(!pattern.matches("src/App.ts.bak"));
    }

    #[test]
    fn test_file_pattern_rejects_invalid_regex() {
        assert!(FilePattern::new(r"\.tsx?$").is_ok());
        assert!(FilePattern::new(r"[").is_err());
    }

    #[test]
    fn test_bare_entry_serializes_as_name() {
        let entry = Entry::bare("babel-plugin-macros");
        assert_eq!(serde_json::to_value(&entry).unwrap(), json!("babel-plugin-macros"));
    }

    #[test]
    fn test_disabled_entry_serializes_as_name_false_pair() {
        let entry = Entry::disabled("@babel/plugin-proposal-decorators");
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!(["@babel/plugin-proposal-decorators", false])
        );
    }

    #[test]
    fn test_configured_entry_serializes_as_name_options_pair() {
        let entry = Entry::with_options("@babel/plugin-proposal-class-properties", json!({"loose": true}));
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!(["@babel/plugin-proposal-class-properties", {"loose": true}])
        );
    }

    #[test]
    fn test_override_serialization_skips_absent_predicates() {
        let entry = OverrideEntry {
            test: Some(FilePattern::typed_sources()),
            exclude: None,
            plugins: vec![Entry::bare("x")],
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value, json!({"test": r"\.tsx?$", "plugins": ["x"]}));
    }
}
