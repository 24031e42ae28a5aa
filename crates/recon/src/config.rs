use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::MergeError;
use crate::policy::Policy;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// A `*.merge.toml` file: two inputs, the shared key and the merge policy.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeConfig {
    pub name: String,
    /// Key field name; both inputs must carry it.
    pub key: String,
    pub first: InputConfig,
    pub second: InputConfig,
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Inputs + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub file: String,
    /// Fields to keep. `None` keeps every header column.
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

impl InputConfig {
    /// Field selection with the key moved to the front, or `None` for "all".
    pub fn field_list(&self, key: &str) -> Option<Vec<String>> {
        self.fields.as_ref().map(|fields| {
            let mut out = vec![key.to_string()];
            out.extend(fields.iter().filter(|f| *f != key).cloned());
            out
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub csv: Option<String>,
    #[serde(default)]
    pub json: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl MergeConfig {
    pub fn from_toml(input: &str) -> Result<Self, MergeError> {
        let config: MergeConfig =
            toml::from_str(input).map_err(|e| MergeError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MergeError> {
        if self.key.trim().is_empty() {
            return Err(MergeError::ConfigValidation("key must not be empty".into()));
        }

        for (side, input) in [("first", &self.first), ("second", &self.second)] {
            if input.file.trim().is_empty() {
                return Err(MergeError::ConfigValidation(format!(
                    "[{side}]: file must not be empty"
                )));
            }
            if let Some(ref fields) = input.fields {
                let mut seen = HashSet::new();
                for f in fields {
                    if !seen.insert(f.as_str()) {
                        return Err(MergeError::ConfigValidation(format!(
                            "[{side}]: duplicate field '{f}'"
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Resolve an input or output path relative to the config file's directory.
    pub fn resolve(&self, base_dir: &Path, file: &str) -> PathBuf {
        base_dir.join(file)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
