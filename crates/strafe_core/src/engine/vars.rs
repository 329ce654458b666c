//! Engine variable map: flat `key=value` configuration.
//!
//! Format: one `key=value` pair per line, no quoting. `=` cannot appear in
//! a key or a value (there is no escaping mechanism); blank lines are
//! skipped. Loading registers new keys or overwrites existing ones.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VarError {
    #[error("line {line} is not a key=value pair")]
    Malformed { line: usize },

    #[error("'{text}' cannot be used in a key or value")]
    InvalidText { text: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Flat string-to-string configuration store.
///
/// Keys iterate in sorted order, so rendering is deterministic and files
/// diff cleanly across saves.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VarMap {
    vars: BTreeMap<String, String>,
}

impl VarMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or overwrite a variable.
    pub fn set(&mut self, key: &str, value: impl ToString) -> Result<(), VarError> {
        let value = value.to_string();
        for text in [key, value.as_str()] {
            if text.contains('=') || text.contains('\n') {
                return Err(VarError::InvalidText {
                    text: text.to_string(),
                });
            }
        }
        if key.is_empty() {
            return Err(VarError::InvalidText {
                text: String::new(),
            });
        }
        self.vars.insert(key.to_string(), value);
        Ok(())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Typed lookup; `None` when the key is absent or fails to parse.
    pub fn get<T: FromStr>(&self, key: &str) -> Option<T> {
        self.vars.get(key)?.parse().ok()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Merge `key=value` lines into the map, overwriting existing keys.
    pub fn load_str(&mut self, text: &str) -> Result<(), VarError> {
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let mut parts = line.split('=');
            let (key, value) = match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) if !key.is_empty() => (key, value),
                _ => return Err(VarError::Malformed { line: index + 1 }),
            };
            self.vars.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    /// Render the map back into the line format, keys sorted.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.vars {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), VarError> {
        let text = std::fs::read_to_string(path)?;
        self.load_str(&text)
    }

    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<(), VarError> {
        std::fs::write(path, self.render())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_registers_and_overwrites() {
        let mut vars = VarMap::new();
        vars.set("volume", 5).unwrap();
        vars.load_str("volume=9\nfullscreen=true\n").unwrap();

        assert_eq!(vars.get::<u32>("volume"), Some(9));
        assert_eq!(vars.get::<bool>("fullscreen"), Some(true));
    }

    #[test]
    fn render_round_trips() {
        let mut vars = VarMap::new();
        vars.set("b", "two").unwrap();
        vars.set("a", 1).unwrap();

        let text = vars.render();
        assert_eq!(text, "a=1\nb=two\n");

        let mut reloaded = VarMap::new();
        reloaded.load_str(&text).unwrap();
        assert_eq!(reloaded, vars);
    }

    #[test]
    fn equals_sign_is_rejected_in_keys_and_values() {
        let mut vars = VarMap::new();
        assert!(vars.set("bad=key", 1).is_err());
        assert!(vars.set("key", "bad=value").is_err());
        assert!(vars.set("", 1).is_err());
    }

    #[test]
    fn malformed_lines_report_their_number() {
        let mut vars = VarMap::new();
        let err = vars.load_str("ok=1\nnot a pair\n").unwrap_err();
        assert!(matches!(err, VarError::Malformed { line: 2 }));
    }

    #[test]
    fn typed_get_fails_soft() {
        let mut vars = VarMap::new();
        vars.set("width", "wide").unwrap();
        assert_eq!(vars.get::<u32>("width"), None);
        assert_eq!(vars.get_str("width"), Some("wide"));
        assert_eq!(vars.get::<u32>("missing"), None);
    }
}
