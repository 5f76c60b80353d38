use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::ConfigError;
use crate::merge::merge_configs;
use crate::validate::validate_first;

/// Name of the per-project directory holding an overlay `config.toml`.
pub const PROJECT_DIR_NAME: &str = ".webpath";

/// Content written into a newly-created default config file.
const DEFAULT_CONFIG_CONTENT: &str = r#"# webpath configuration
# Uncomment and edit settings below to override defaults.

# [resolver]
# web_root = "/home/user/project"
# url = "http://localhost:8080"
# case_insensitive_paths = true   # default: true on Windows/macOS

# [resolver.path_mapping]
# "/app/" = "/home/user/project/src"

# [log]
# level = "info"
# file = "/tmp/webpath.log"
"#;

/// Load and merge configuration.
///
/// 1. Reads `config_dir/config.toml`, creating it with commented-out
///    defaults when missing.
/// 2. Looks for `.webpath/config.toml` from `project_dir` upward.
/// 3. Merges `Config::default() <- global <- project`.
/// 4. Validates the result.
pub fn load_config(config_dir: &Path, project_dir: Option<&Path>) -> Result<Config, ConfigError> {
    let global_path = config_dir.join("config.toml");

    if !global_path.exists() {
        std::fs::create_dir_all(config_dir)?;
        std::fs::write(&global_path, DEFAULT_CONFIG_CONTENT).map_err(|source| {
            ConfigError::CreateDefault {
                path: global_path.clone(),
                source,
            }
        })?;
        tracing::info!("Created default config at {}", global_path.display());
    }

    let mut config = Config::default();

    let global_content = std::fs::read_to_string(&global_path)?;
    if has_non_comment_content(&global_content) {
        config = merge_configs(&config, &global_content)?;
    }

    if let Some(project_path) = project_dir.and_then(find_project_config) {
        tracing::debug!("Merging project config {}", project_path.display());
        let project_content = std::fs::read_to_string(&project_path)?;
        config = merge_configs(&config, &project_content)?;
    }

    validate_first(&config)?;
    Ok(config)
}

/// Load a single config file given explicitly (no default creation, no
/// project overlay).
pub fn load_file(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    load_from_str(&std::fs::read_to_string(path)?)
}

/// Parse a TOML string directly into a validated [`Config`].
pub fn load_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_first(&config)?;
    Ok(config)
}

/// Walk from `start` upward looking for `.webpath/config.toml`.
fn find_project_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_DIR_NAME).join("config.toml"))
        .find(|candidate| candidate.is_file())
}

/// Whether `content` has at least one non-empty, non-comment line.
fn has_non_comment_content(content: &str) -> bool {
    content.lines().any(|l| {
        let trimmed = l.trim();
        !trimmed.is_empty() && !trimmed.starts_with('#')
    })
}
