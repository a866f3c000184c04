use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

pub const ARTIFACT_DIR_ENV: &str = "BUILD_ARTIFACTSTAGINGDIRECTORY";
pub const LOG_FILTER_ENV: &str = "GRANTWATCH_LOG";
pub const LOG_FORMAT_ENV: &str = "GRANTWATCH_LOG_FORMAT";
pub const REPORT_FILE_NAME: &str = "rbac-changes.md";
pub const DEFAULT_REPORT_DIR: &str = ".";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "invalid log format '{other}', expected one of: human, json"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewConfig {
    pub report_dir: PathBuf,
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            log_format: LogFormat::Human,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub code: &'static str,
    pub message: String,
}

impl ReviewConfig {
    pub fn from_env() -> (Self, Vec<ConfigWarning>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<ConfigWarning>) {
        let mut config = Self::default();
        let mut warnings = Vec::new();

        if let Some(dir) = normalize_optional(lookup(ARTIFACT_DIR_ENV)) {
            config.report_dir = PathBuf::from(dir);
        }
        if let Some(filter) = normalize_optional(lookup(LOG_FILTER_ENV)) {
            match EnvFilter::try_new(&filter) {
                Ok(_) => config.log_filter = filter,
                Err(err) => warnings.push(ConfigWarning {
                    code: "invalid_log_filter",
                    message: format!(
                        "invalid log filter '{filter}', using '{DEFAULT_LOG_FILTER}': {err}"
                    ),
                }),
            }
        }
        if let Some(format) = normalize_optional(lookup(LOG_FORMAT_ENV)) {
            match format.parse() {
                Ok(parsed) => config.log_format = parsed,
                Err(message) => warnings.push(ConfigWarning {
                    code: "invalid_log_format",
                    message,
                }),
            }
        }

        (config, warnings)
    }

    pub fn with_report_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.report_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn report_path(&self) -> PathBuf {
        self.report_dir.join(REPORT_FILE_NAME)
    }
}

fn normalize_optional(input: Option<String>) -> Option<String> {
    input
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
