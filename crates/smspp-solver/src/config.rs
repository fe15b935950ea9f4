//! Solver configuration files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SolverError;

/// Built-in configuration templates compiled into the crate.
const TEMPLATES: &[(&str, &str)] = &[
    (
        "uc_solverconfig",
        include_str!("../templates/uc_solverconfig.txt"),
    ),
    (
        "investment_solverconfig",
        include_str!("../templates/investment_solverconfig.txt"),
    ),
];

#[derive(Debug, Clone)]
enum ConfigSource {
    Template { name: &'static str, text: &'static str },
    File { path: PathBuf },
}

/// A solver configuration, either a built-in template or a file on disk,
/// with optional parameter overrides applied before the run.
#[derive(Debug, Clone)]
pub struct SMSConfig {
    source: ConfigSource,
    overrides: Vec<(String, String)>,
}

impl SMSConfig {
    /// Looks up a built-in template by name. A trailing `.txt` is
    /// accepted and ignored.
    pub fn from_template(name: &str) -> Result<Self, SolverError> {
        let stem = name.strip_suffix(".txt").unwrap_or(name);
        for (tname, text) in TEMPLATES {
            if *tname == stem {
                return Ok(Self {
                    source: ConfigSource::Template { name: tname, text },
                    overrides: Vec::new(),
                });
            }
        }
        Err(SolverError::ConfigNotFound {
            name: name.to_string(),
            available: Self::templates(),
        })
    }

    /// Uses an existing configuration file on disk.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: ConfigSource::File { path: path.into() },
            overrides: Vec::new(),
        }
    }

    /// The names of all built-in templates.
    pub fn templates() -> Vec<&'static str> {
        TEMPLATES.iter().map(|(name, _)| *name).collect()
    }

    /// Overrides a parameter line. When a non-comment line starts with
    /// `key`, its remainder is replaced by `value`; otherwise a new
    /// `key value` line is appended.
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    /// A stable name for the materialized file.
    pub fn file_name(&self) -> String {
        match &self.source {
            ConfigSource::Template { name, .. } => format!("{name}.txt"),
            ConfigSource::File { path } => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "solverconfig.txt".to_string()),
        }
    }

    /// The configuration text with overrides applied.
    pub fn contents(&self) -> Result<String, SolverError> {
        let base = match &self.source {
            ConfigSource::Template { text, .. } => (*text).to_string(),
            ConfigSource::File { path } => fs::read_to_string(path)?,
        };
        if self.overrides.is_empty() {
            return Ok(base);
        }

        let mut lines: Vec<String> = base.lines().map(str::to_string).collect();
        for (key, value) in &self.overrides {
            let mut replaced = false;
            for line in lines.iter_mut() {
                let trimmed = line.trim_start();
                if trimmed.starts_with('#') {
                    continue;
                }
                if trimmed.split_whitespace().next() == Some(key.as_str()) {
                    *line = format!("{key} {value}");
                    replaced = true;
                    break;
                }
            }
            if !replaced {
                lines.push(format!("{key} {value}"));
            }
        }
        let mut out = lines.join("\n");
        out.push('\n');
        Ok(out)
    }

    /// Writes the configuration into `dir` and returns the file path.
    ///
    /// A path-sourced configuration with no overrides is used in place,
    /// avoiding a pointless copy.
    pub fn materialize(&self, dir: &Path) -> Result<PathBuf, SolverError> {
        if let ConfigSource::File { path } = &self.source {
            if self.overrides.is_empty() {
                return Ok(path.clone());
            }
        }
        let target = dir.join(self.file_name());
        fs::write(&target, self.contents()?)?;
        tracing::debug!(
            component = "solver",
            operation = "materialize_config",
            status = "success",
            path = %target.display(),
            overrides = self.overrides.len(),
            "Wrote solver configuration"
        );
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_lookup_accepts_txt_suffix() {
        assert!(SMSConfig::from_template("uc_solverconfig").is_ok());
        assert!(SMSConfig::from_template("uc_solverconfig.txt").is_ok());
    }

    #[test]
    fn test_unknown_template_lists_available() {
        let err = SMSConfig::from_template("bogus").unwrap_err();
        assert_eq!(err.code(), "CONFIG_NOT_FOUND");
        assert!(err.to_string().contains("investment_solverconfig"));
    }

    #[test]
    fn test_override_replaces_existing_parameter() {
        let config = SMSConfig::from_template("uc_solverconfig")
            .unwrap()
            .with_override("intLogVerb", "2");
        let text = config.contents().unwrap();
        assert!(text.contains("intLogVerb 2"));
        assert!(!text.contains("intLogVerb 0"));
    }

    #[test]
    fn test_override_appends_missing_parameter() {
        let config = SMSConfig::from_template("uc_solverconfig")
            .unwrap()
            .with_override("dblMaxTime", "3600");
        let text = config.contents().unwrap();
        assert!(text.ends_with("dblMaxTime 3600\n"));
    }

    #[test]
    fn test_materialize_path_source_without_overrides_is_passthrough() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("custom.txt");
        std::fs::write(&source, "intLogVerb 1\n").unwrap();

        let config = SMSConfig::from_path(&source);
        let out = config.materialize(dir.path()).unwrap();
        assert_eq!(out, source);

        let config = SMSConfig::from_path(&source).with_override("intLogVerb", "4");
        let out = config.materialize(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(out).unwrap(), "intLogVerb 4\n");
    }
}
