use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use crate::models::{CriteriaOverrides, MatchingCriteria};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Per-field overrides of the default matching criteria
    #[serde(default)]
    pub matching: CriteriaOverrides,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub runner: RunnerSettings,
}

impl Settings {
    /// Matching criteria with the configured overrides applied to the defaults
    pub fn criteria(&self) -> MatchingCriteria {
        self.matching.apply(MatchingCriteria::default())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Batch runner input and output options
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunnerSettings {
    /// JSON file with `sources` and `candidates`; a CLI argument takes precedence
    #[serde(default)]
    pub input_path: Option<PathBuf>,
    #[serde(default)]
    pub pretty_output: bool,
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with NEWSLETTER_MATCH)
    /// 5. `LOG_LEVEL` / `LOG_FORMAT`
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., NEWSLETTER_MATCH__MATCHING__MIN_MATCH_SCORE -> matching.min_match_score
            .add_source(
                Environment::with_prefix("NEWSLETTER_MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("NEWSLETTER_MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the unprefixed logging variables on top of the loaded config
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(level) = env::var("LOG_LEVEL") {
        builder = builder.set_override("logging.level", level)?;
    }
    if let Ok(format) = env::var("LOG_FORMAT") {
        builder = builder.set_override("logging.format", format)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_empty_settings_use_default_criteria() {
        let settings = Settings::default();
        assert_eq!(settings.criteria(), MatchingCriteria::default());
        assert!(settings.runner.input_path.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "newsletter-match-settings-{}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[matching]\nmin_match_score = 30.0\nmax_suggestions = 3\n\n[runner]\npretty_output = true"
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let criteria = settings.criteria();
        assert_eq!(criteria.min_match_score, 30.0);
        assert_eq!(criteria.max_suggestions, 3);
        assert_eq!(criteria.category_weight, 0.25);
        assert!(settings.runner.pretty_output);
        assert_eq!(settings.logging.level, "info");
    }
}
