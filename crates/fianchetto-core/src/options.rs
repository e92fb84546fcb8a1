//! Engine option declarations and the backing value store.

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;

/// Value shape of a declared option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    Spin { default: i64, min: i64, max: i64 },
    Text { default: String },
}

/// A single option an engine advertises to the GUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOption {
    pub name: String,
    pub kind: OptionKind,
}

impl EngineOption {
    pub fn spin(name: &str, default: i64, min: i64, max: i64) -> Self {
        EngineOption {
            name: name.to_owned(),
            kind: OptionKind::Spin { default, min, max },
        }
    }

    pub fn text(name: &str, default: &str) -> Self {
        EngineOption {
            name: name.to_owned(),
            kind: OptionKind::Text {
                default: default.to_owned(),
            },
        }
    }

    fn default_value(&self) -> String {
        match &self.kind {
            OptionKind::Spin { default, .. } => default.to_string(),
            OptionKind::Text { default } => default.clone(),
        }
    }
}

impl fmt::Display for EngineOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            OptionKind::Spin { default, min, max } => write!(
                f,
                "option name {} type spin default {} min {} max {}",
                self.name, default, min, max
            ),
            OptionKind::Text { default } => {
                write!(f, "option name {} type string default {}", self.name, default)
            }
        }
    }
}

/// Thread-safe option store.
///
/// Keys are normalized to lowercase on both read and write, matching the
/// protocol's case-insensitive option names. Reads fall back to the
/// declared default.
pub struct Options {
    declared: Vec<EngineOption>,
    values: RwLock<HashMap<String, String>>,
}

impl Options {
    pub fn new(declared: Vec<EngineOption>) -> Self {
        Options {
            declared,
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Declared options in declaration order, for the `uci` reply.
    pub fn declared(&self) -> &[EngineOption] {
        &self.declared
    }

    pub fn get(&self, name: &str) -> Option<String> {
        let key = name.to_lowercase();
        if let Some(value) = self.values.read().get(&key) {
            return Some(value.clone());
        }
        self.declared
            .iter()
            .find(|opt| opt.name.to_lowercase() == key)
            .map(EngineOption::default_value)
    }

    pub fn set(&self, name: &str, value: &str) {
        self.values
            .write()
            .insert(name.to_lowercase(), value.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_option_display() {
        let opt = EngineOption::spin("testoption", 50, 0, 100);
        assert_eq!(
            opt.to_string(),
            "option name testoption type spin default 50 min 0 max 100"
        );
    }

    #[test]
    fn text_option_display() {
        let opt = EngineOption::text("about", "fianchetto");
        assert_eq!(
            opt.to_string(),
            "option name about type string default fianchetto"
        );
    }

    #[test]
    fn get_falls_back_to_declared_default() {
        let opts = Options::new(vec![EngineOption::spin("Hash", 32, 1, 4096)]);
        assert_eq!(opts.get("hash").as_deref(), Some("32"));
        assert_eq!(opts.get("unknown"), None);
    }

    #[test]
    fn set_and_get_are_case_insensitive() {
        let opts = Options::new(vec![EngineOption::spin("Hash", 32, 1, 4096)]);
        opts.set("HASH", "64");
        assert_eq!(opts.get("Hash").as_deref(), Some("64"));
        assert_eq!(opts.get("hash").as_deref(), Some("64"));
    }
}
