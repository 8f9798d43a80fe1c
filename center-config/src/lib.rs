//! Loader for dashboard configuration with YAML + environment overlays.
//!
//! Sources are merged in this order, later ones winning:
//!
//! 1. built-in defaults (every field is optional)
//! 2. files or inline YAML added with [`CenterConfigLoader::with_file`],
//!    [`CenterConfigLoader::with_optional_file`] and [`CenterConfigLoader::with_yaml_str`]
//! 3. `CENTER__`-prefixed environment variables, `__` separating nesting
//!    (`CENTER__UI__TICK_MS=120`)
//!
//! `${VAR}` and `~` inside string values are expanded after merging.
use center_common::{
    Locale,
    observability::{LogConfig, LogFormat},
};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;
const APP_DIR: &str = "service-center";
const MAX_OVERDUE_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CenterConfig {
    pub version: Option<String>,
    pub locale: Locale,
    pub dataset: DatasetConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Where records come from. Without a path the built-in seed is used.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Redraw/tick interval in milliseconds.
    pub tick_ms: u64,
    /// Age after which an unsolved ticket is flagged overdue.
    pub overdue_hours: i64,
    /// Number of bars in the recurring-issues chart.
    pub top_issues: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: 80,
            overdue_hours: 48,
            top_issues: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: Option<PathBuf>,
    pub format: LogFormat,
    pub filter: String,
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            format: LogFormat::Text,
            filter: "info".into(),
            stderr: false,
        }
    }
}

impl LoggingConfig {
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            log_dir: self.dir.clone(),
            emit_stderr: self.stderr,
            format: self.format,
            default_filter: self.filter.clone(),
            ..LogConfig::default()
        }
    }
}

impl CenterConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.tick_ms < 10 {
            return Err(ConfigError::Message(format!(
                "ui.tick_ms must be at least 10, got {}",
                self.ui.tick_ms
            )));
        }
        if !(1..=MAX_OVERDUE_HOURS).contains(&self.ui.overdue_hours) {
            return Err(ConfigError::Message(format!(
                "ui.overdue_hours must be between 1 and {MAX_OVERDUE_HOURS}, got {}",
                self.ui.overdue_hours
            )));
        }
        if self.ui.top_issues == 0 {
            return Err(ConfigError::Message("ui.top_issues must be positive".into()));
        }
        Ok(())
    }
}

/// `<config dir>/service-center/center.yaml`, e.g. `~/.config/service-center/center.yaml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("center.yaml"))
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') || s.starts_with('~') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::full(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct CenterConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for CenterConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CenterConfigLoader {
    /// Start from defaults; `CENTER__` env overrides are applied in [`Self::load`].
    ///
    /// ```
    /// use center_config::CenterConfigLoader;
    /// use center_common::Locale;
    ///
    /// let config = CenterConfigLoader::new().load().expect("defaults are valid");
    /// assert_eq!(config.locale, Locale::Ar);
    /// assert_eq!(config.ui.overdue_hours, 48);
    /// assert!(config.dataset.path.is_none());
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a required YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that may be absent.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use center_config::CenterConfigLoader;
    /// use center_common::Locale;
    ///
    /// let cfg = CenterConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// version: "1"
    /// locale: en
    /// ui:
    ///   top_issues: 3
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.version.as_deref(), Some("1"));
    /// assert_eq!(cfg.locale, Locale::En);
    /// assert_eq!(cfg.ui.top_issues, 3);
    /// assert_eq!(cfg.ui.tick_ms, 80);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Merge all sources, expand `${VAR}` placeholders and validate.
    pub fn load(self) -> Result<CenterConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("CENTER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: CenterConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        typed.validate()?;
        Ok(typed)
    }
}
