//! Shared configuration loader for the classlex tools.
//!
//! `defaults/classlex.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top of
//! those defaults via [`Loader`] before deserializing into [`ClasslexConfig`].

use classlex::{ConfigError as OptionsError, ScanOptions};
use classlex_analysis::DiagnosticSettings;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

const DEFAULT_TOML: &str = include_str!("../defaults/classlex.default.toml");

/// Top-level configuration consumed by classlex applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ClasslexConfig {
    pub scanner: ScannerConfig,
    pub twin: TwinConfig,
    pub diagnostics: DiagnosticSettings,
}

/// Class string syntax.
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    pub separator: String,
    pub handle_brackets: bool,
    pub open_chars: String,
    pub close_chars: String,
    pub handle_important: bool,
    pub important_marker: String,
    pub max_depth: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwinConfig {
    pub enabled: bool,
}

/// Failures while turning configuration sources into scan options.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Source(#[from] ConfigError),
    #[error("invalid scanner settings: {0}")]
    Options(#[from] OptionsError),
    #[error("important_marker must be a single character, got {0:?}")]
    Marker(String),
}

impl ClasslexConfig {
    /// Validated edit-mode, greedy scan options for these settings.
    ///
    /// Twin mode always uses `:` and turns on groups and important markers, whatever the
    /// scanner section says.
    pub fn scan_options(&self) -> Result<ScanOptions, LoadError> {
        let scanner = &self.scanner;
        let mut marker = scanner.important_marker.chars();
        let (Some(important_marker), None) = (marker.next(), marker.next()) else {
            return Err(LoadError::Marker(scanner.important_marker.clone()));
        };

        let mut options = ScanOptions::new()
            .separator(scanner.separator.clone())
            .brackets(scanner.handle_brackets)
            .bracket_chars(scanner.open_chars.clone(), scanner.close_chars.clone())
            .important(scanner.handle_important)
            .important_marker(important_marker)
            .max_depth(scanner.max_depth);
        if self.twin.enabled {
            options = options.separator(":").brackets(true).important(true);
        }
        options.validate()?;
        Ok(options)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        debug!(path = %path.as_ref().display(), "layering configuration file");
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ClasslexConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ClasslexConfig, ConfigError> {
    Loader::new().build()
}

/// The raw embedded defaults, for display.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.scanner.separator, ":");
        assert!(!config.scanner.handle_brackets);
        assert!(!config.twin.enabled);
        assert!(config.diagnostics.empty_class);
        assert_eq!(config.scan_options().unwrap(), ScanOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("scanner.separator", "_")
            .expect("override to apply")
            .set_override("scanner.handle_brackets", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        let options = config.scan_options().unwrap();
        assert_eq!(options.separator, "_");
        assert!(options.handle_brackets);
    }

    #[test]
    fn twin_forces_its_syntax() {
        let config = Loader::new()
            .set_override("twin.enabled", true)
            .unwrap()
            .set_override("scanner.separator", "_")
            .unwrap()
            .build()
            .unwrap();
        let options = config.scan_options().unwrap();
        assert_eq!(options.separator, ":");
        assert!(options.handle_brackets);
        assert!(options.handle_important);
    }

    #[test]
    fn rejects_empty_separator() {
        let config = Loader::new()
            .set_override("scanner.separator", "")
            .unwrap()
            .build()
            .unwrap();
        assert!(matches!(
            config.scan_options(),
            Err(LoadError::Options(OptionsError::EmptySeparator))
        ));
    }

    #[test]
    fn rejects_unbounded_depth() {
        let config = Loader::new()
            .set_override("scanner.max_depth", 1_000_000)
            .unwrap()
            .build()
            .unwrap();
        assert!(matches!(
            config.scan_options(),
            Err(LoadError::Options(OptionsError::DepthTooLarge { .. }))
        ));
    }

    #[test]
    fn rejects_long_marker() {
        let config = Loader::new()
            .set_override("scanner.important_marker", "!!")
            .unwrap()
            .build()
            .unwrap();
        assert!(matches!(config.scan_options(), Err(LoadError::Marker(_))));
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[scanner]\nhandle_important = true\n\n[diagnostics]\nduplicate_class = false")
            .unwrap();
        let config = Loader::new().with_file(file.path()).build().unwrap();
        assert!(config.scanner.handle_important);
        assert!(!config.diagnostics.duplicate_class);
        assert!(config.diagnostics.empty_group);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here/classlex.toml")
            .build()
            .unwrap();
        assert_eq!(config.scanner.separator, ":");
    }

    #[test]
    fn missing_required_file_fails() {
        assert!(Loader::new()
            .with_file("/definitely/not/here/classlex.toml")
            .build()
            .is_err());
    }
}
