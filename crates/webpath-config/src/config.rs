use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use webpath_dap::{LaunchRequestArguments, PathMapping};

/// Log verbosity level.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Most verbose.
    Trace,
    /// Debug messages.
    Debug,
    /// Informational messages (default).
    #[default]
    Info,
    /// Warnings only.
    Warn,
    /// Errors only.
    Error,
}

impl LogLevel {
    /// Lowercase level name as understood by `EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log verbosity level.
    #[serde(default)]
    pub level: LogLevel,
    /// Optional path to a log file.
    pub file: Option<PathBuf>,
}

/// Path resolution settings applied when no launch/attach arguments
/// override them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Directory the target's scripts are served from.
    pub web_root: Option<String>,
    /// Page URL; restricts `web_root` resolution to its origin.
    pub url: Option<String>,
    /// Fold client paths to lowercase for comparison. Unset follows the
    /// platform: folded on Windows and macOS.
    pub case_insensitive_paths: Option<bool>,
    /// URL-prefix to local-directory rules, in priority order for equally
    /// long prefixes.
    #[serde(default)]
    pub path_mapping: PathMapping,
}

impl ResolverConfig {
    /// The equivalent `launch` arguments.
    pub fn to_launch_arguments(&self) -> LaunchRequestArguments {
        LaunchRequestArguments {
            url: self.url.clone(),
            web_root: self.web_root.clone(),
            path_mapping: self.path_mapping.clone(),
            ..Default::default()
        }
    }
}

/// Top-level webpath configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path resolution settings.
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}
