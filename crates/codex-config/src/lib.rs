//! Configuration management for Codex.
//!
//! Parses `codex.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Path Expansion
//!
//! `site.template` supports environment variable and home directory expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//! - `~/...` - expands to the user's home directory
//!
//! Relative paths are resolved against the directory containing the config
//! file. Without a config file they resolve against the current directory.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override page template path.
    pub template: Option<PathBuf>,
    /// Override output file extension.
    pub extension: Option<String>,
    /// Override keep-going flag.
    pub keep_going: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "codex.toml";

/// Default template filename.
const DEFAULT_TEMPLATE: &str = "template.htm";

/// Default output file extension.
const DEFAULT_EXTENSION: &str = "htm";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration (template path is a relative string from TOML).
    site: SiteConfigRaw,
    /// Markdown rendering configuration.
    pub markdown: MarkdownConfig,
    /// Build behavior configuration.
    pub build: BuildConfig,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    template: Option<String>,
    extension: Option<String>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Page template file.
    pub template: PathBuf,
    /// Extension of generated files, without the leading dot.
    pub extension: String,
}

/// Markdown rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Enable GitHub Flavored Markdown (tables, strikethrough, task lists).
    pub gfm: bool,
    /// Use the first H1 heading as page title instead of the file name.
    pub extract_title: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            extract_title: false,
        }
    }
}

/// Build behavior configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Continue past per-page failures and report them at the end.
    pub keep_going: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.template`").
        field: String,
        /// Error message (e.g., "${`TEMPLATE_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `codex.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(template) = &settings.template {
            self.site_resolved.template.clone_from(template);
        }
        if let Some(extension) = &settings.extension {
            self.site_resolved.extension.clone_from(extension);
        }
        if let Some(keep_going) = settings.keep_going {
            self.build.keep_going = keep_going;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_config_from(&cwd)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            markdown: MarkdownConfig::default(),
            build: BuildConfig::default(),
            site_resolved: SiteConfig {
                template: base.join(DEFAULT_TEMPLATE),
                extension: DEFAULT_EXTENSION.to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let extension = &self.site_resolved.extension;
        require_non_empty(extension, "site.extension")?;
        if extension.starts_with('.') || extension.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "site.extension must be a bare extension like \"htm\", got {extension:?}"
            )));
        }
        if self.site_resolved.template.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "site.template cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand and resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let template = match self.site.template.as_deref() {
            Some(raw) => {
                require_non_empty(raw, "site.template")?;
                config_dir.join(expand::expand_path(raw, "site.template")?)
            }
            None => config_dir.join(DEFAULT_TEMPLATE),
        };

        self.site_resolved = SiteConfig {
            template,
            extension: self
                .site
                .extension
                .clone()
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_owned()),
        };

        Ok(())
    }
}
