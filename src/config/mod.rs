//! Placeholder variable table.
//!
//! The table is built once at startup and handed by reference to the
//! detector and renderer. It starts from the built-in entries and may be
//! overridden or extended by a variables file:
//!
//! ```toml
//! [variables]
//! rust-version-str = "1.38.0"
//! crate-name = "shortcut"
//! ```

mod error;

pub use error::ConfigError;

use crate::{debug, log};
use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};

/// Built-in placeholder values.
const BUILTIN_VARS: [(&str, &str); 4] = [
    ("git-blob-version", "8cdab059d22eb8f30e1408c2fbf0ae666fa231d9"),
    (
        "github-repo-url",
        "https://github.com/parallel-rust-cpp/shortcut-comparison",
    ),
    ("ppc-url", "http://ppc.cs.aalto.fi"),
    ("rust-version-str", "1.37.0"),
];

// ============================================================================
// VarTable
// ============================================================================

/// Mapping from placeholder name to replacement value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct VarTable(BTreeMap<String, String>);

impl VarTable {
    /// The four built-in variables.
    pub fn builtin() -> Self {
        BUILTIN_VARS.into_iter().collect()
    }

    /// Built-in table, merged with the variables file when one is given.
    pub fn load(vars_file: Option<&Path>) -> Result<Self, ConfigError> {
        let table = Self::builtin();
        match vars_file {
            Some(path) => {
                let file = VarsFile::from_path(path)?;
                debug!("vars"; "loaded {} variables from {}", file.variables.len(), path.display());
                let table = table.merge(file.variables);
                for (key, value) in table.iter() {
                    debug!("vars"; "{} = {}", key, value);
                }
                Ok(table)
            }
            None => Ok(table),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The literal `{{key}}` token of every entry.
    pub fn tokens(&self) -> impl Iterator<Item = String> + '_ {
        self.0.keys().map(|key| token(key))
    }

    /// Entries of `other` override or extend this table.
    pub fn merge(mut self, other: VarTable) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VarTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Wrap a variable name in placeholder delimiters.
pub fn token(key: &str) -> String {
    format!("{{{{{key}}}}}")
}

// ============================================================================
// variables file
// ============================================================================

/// Root structure of a variables file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VarsFile {
    variables: VarTable,
}

impl VarsFile {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (file, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(file)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let file = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((file, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        log!("warning"; "unknown fields in {}, ignoring:", path.display());
        for field in fields {
            eprintln!("- {}", field);
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_vars(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_builtin_entries() {
        let vars = VarTable::builtin();
        assert_eq!(vars.len(), 4);
        assert_eq!(
            vars.get("git-blob-version"),
            Some("8cdab059d22eb8f30e1408c2fbf0ae666fa231d9")
        );
        assert_eq!(
            vars.get("github-repo-url"),
            Some("https://github.com/parallel-rust-cpp/shortcut-comparison")
        );
        assert_eq!(vars.get("ppc-url"), Some("http://ppc.cs.aalto.fi"));
        assert_eq!(vars.get("rust-version-str"), Some("1.37.0"));
        assert_eq!(vars.get("missing"), None);
    }

    #[test]
    fn test_token() {
        assert_eq!(token("ppc-url"), "{{ppc-url}}");
        let tokens: Vec<_> = VarTable::from_iter([("a", "1"), ("b", "2")]).tokens().collect();
        assert_eq!(tokens, vec!["{{a}}", "{{b}}"]);
    }

    #[test]
    fn test_merge_overrides_and_extends() {
        let extra = VarTable::from_iter([("rust-version-str", "1.38.0"), ("crate", "shortcut")]);
        let vars = VarTable::builtin().merge(extra);
        assert_eq!(vars.len(), 5);
        assert_eq!(vars.get("rust-version-str"), Some("1.38.0"));
        assert_eq!(vars.get("crate"), Some("shortcut"));
        assert_eq!(vars.get("ppc-url"), Some("http://ppc.cs.aalto.fi"));
    }

    #[test]
    fn test_load_without_file_is_builtin() {
        assert_eq!(VarTable::load(None).unwrap(), VarTable::builtin());
    }

    #[test]
    fn test_load_vars_file() {
        let file = write_vars(
            r#"
[variables]
rust-version-str = "1.40.0"
book-title = "Shortcut"
"#,
        );
        let vars = VarTable::load(Some(file.path())).unwrap();
        assert_eq!(vars.get("rust-version-str"), Some("1.40.0"));
        assert_eq!(vars.get("book-title"), Some("Shortcut"));
        assert_eq!(vars.len(), 5);
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (file, ignored) = VarsFile::parse_with_ignored(
            r#"
colour = "blue"

[variables]
a = "1"
"#,
        )
        .unwrap();
        assert_eq!(file.variables.get("a"), Some("1"));
        assert_eq!(ignored, vec!["colour".to_string()]);
    }

    #[test]
    fn test_empty_file_is_empty_table() {
        let (file, ignored) = VarsFile::parse_with_ignored("").unwrap();
        assert!(file.variables.is_empty());
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_non_string_value_rejected() {
        let result = VarsFile::parse_with_ignored("[variables]\nanswer = 42\n");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = VarTable::load(Some(Path::new("/nonexistent/vars.toml")));
        assert!(matches!(result, Err(ConfigError::Io(..))));
    }
}
