use crate::config::Config;
use crate::error::ConfigError;

/// Layer an overlay TOML document on top of `base`.
///
/// Tables merge key by key, so an overlay `[resolver.path_mapping]` adds
/// rules after the base ones (or replaces the directory of a prefix it
/// repeats). Scalars and arrays in the overlay replace the base value.
pub fn merge_configs(base: &Config, overlay_toml: &str) -> Result<Config, ConfigError> {
    let mut merged = toml::Value::try_from(base).map_err(|e| ConfigError::Parse(e.to_string()))?;
    let overlay: toml::Value =
        toml::from_str(overlay_toml).map_err(|e| ConfigError::Parse(e.to_string()))?;

    overlay_value(&mut merged, overlay);

    merged
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))
}

fn overlay_value(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => overlay_value(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use webpath_dap::PathMapping;

    #[test]
    fn empty_overlay_returns_base() {
        let base = Config::default();
        assert_eq!(merge_configs(&base, "").unwrap(), base);
    }

    #[test]
    fn overlay_replaces_scalars_and_keeps_siblings() {
        let mut base = Config::default();
        base.resolver.web_root = Some("/global".into());
        base.resolver.url = Some("http://localhost/".into());
        let merged = merge_configs(&base, "[resolver]\nweb_root = \"/project\"\n").unwrap();
        assert_eq!(merged.resolver.web_root.as_deref(), Some("/project"));
        assert_eq!(merged.resolver.url.as_deref(), Some("http://localhost/"));
        assert_eq!(merged.log, base.log);
    }

    #[test]
    fn overlay_extends_path_mapping_in_order() {
        let mut base = Config::default();
        base.resolver.path_mapping = PathMapping::new()
            .with("/app/", "/global/app")
            .with("/lib/", "/global/lib");
        let overlay = "[resolver.path_mapping]\n\"/lib/\" = \"/project/lib\"\n\"/vendor/\" = \"/project/vendor\"\n";
        let merged = merge_configs(&base, overlay).unwrap();
        let rules: Vec<(&str, &str)> = merged.resolver.path_mapping.iter().collect();
        assert_eq!(
            rules,
            vec![
                ("/app/", "/global/app"),
                ("/lib/", "/project/lib"),
                ("/vendor/", "/project/vendor"),
            ]
        );
    }

    #[test]
    fn overlay_sets_log_level() {
        let merged = merge_configs(&Config::default(), "[log]\nlevel = \"trace\"\n").unwrap();
        assert_eq!(merged.log.level, LogLevel::Trace);
    }

    #[test]
    fn invalid_overlay_is_parse_error() {
        let err = merge_configs(&Config::default(), "{{invalid}}").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn wrongly_typed_overlay_is_parse_error() {
        let err = merge_configs(&Config::default(), "[resolver]\nweb_root = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
