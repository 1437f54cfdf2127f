//! Scheduler configuration structures.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Prefix of every environment variable read by [`SchedulerConfig::from_env`].
pub const ENV_PREFIX: &str = "BATCH_SCHEDULER_";

/// Capacity probe selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacitySource {
    /// OS thread count of the current process.
    #[default]
    ProcessThreads,
    /// Logical CPU count.
    AvailableParallelism,
    /// Constant hint.
    Fixed(i64),
}

impl FromStr for CapacitySource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "process_threads" => Ok(Self::ProcessThreads),
            "available_parallelism" => Ok(Self::AvailableParallelism),
            other => other
                .parse::<i64>()
                .map(Self::Fixed)
                .map_err(|_| format!("unknown capacity source `{other}`")),
        }
    }
}

/// Progress sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressMode {
    /// Log each completed batch through `tracing`.
    #[default]
    Tracing,
    /// Discard progress events.
    Silent,
}

impl FromStr for ProgressMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "tracing" => Ok(Self::Tracing),
            "silent" => Ok(Self::Silent),
            other => Err(format!("unknown progress mode `{other}`")),
        }
    }
}

/// Root scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Default batch size for `run_default`; `None` sizes from the capacity hint.
    #[serde(default)]
    pub batch_size: Option<i64>,
    /// Upper bound for batch sizes taken from the capacity hint.
    #[serde(default)]
    pub max_auto_batch_size: Option<i64>,
    /// Capacity probe selection.
    #[serde(default)]
    pub capacity: CapacitySource,
    /// Progress sink selection.
    #[serde(default)]
    pub progress: ProgressMode,
    /// Capture task panics as failures.
    #[serde(default = "default_catch_panics")]
    pub catch_panics: bool,
}

const fn default_catch_panics() -> bool {
    true
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            batch_size: None,
            max_auto_batch_size: None,
            capacity: CapacitySource::default(),
            progress: ProgressMode::default(),
            catch_panics: default_catch_panics(),
        }
    }
}

impl SchedulerConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(size) = self.batch_size {
            if size <= 0 {
                return Err(format!("batch_size must be greater than 0, got {size}"));
            }
        }
        if let Some(max) = self.max_auto_batch_size {
            if max <= 0 {
                return Err(format!("max_auto_batch_size must be greater than 0, got {max}"));
            }
        }
        Ok(())
    }

    /// Parse scheduler configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from `BATCH_SCHEDULER_*` environment variables.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    /// Unset variables keep their defaults. A `.env` file that exists but
    /// cannot be read or parsed is an error.
    pub fn from_env() -> Result<Self, String> {
        check_dotenv(dotenvy::dotenv())?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), loading `path` instead of the
    /// working directory's `.env`. A missing file is skipped.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, String> {
        check_dotenv(dotenvy::from_path(path))?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup using the
    /// `BATCH_SCHEDULER_*` names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));
        let mut cfg = Self::default();

        if let Some(raw) = get("BATCH_SIZE") {
            cfg.batch_size = Some(parse_var("BATCH_SIZE", &raw)?);
        }
        if let Some(raw) = get("MAX_AUTO_BATCH_SIZE") {
            cfg.max_auto_batch_size = Some(parse_var("MAX_AUTO_BATCH_SIZE", &raw)?);
        }
        if let Some(raw) = get("CAPACITY") {
            cfg.capacity = parse_var("CAPACITY", &raw)?;
        }
        if let Some(raw) = get("PROGRESS") {
            cfg.progress = parse_var("PROGRESS", &raw)?;
        }
        if let Some(raw) = get("CATCH_PANICS") {
            cfg.catch_panics = parse_var("CATCH_PANICS", &raw)?;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

fn check_dotenv<T>(loaded: dotenvy::Result<T>) -> Result<(), String> {
    match loaded {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(format!("{ENV_PREFIX}*: .env: {e}")),
    }
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| format!("{ENV_PREFIX}{name}: {e}"))
}
