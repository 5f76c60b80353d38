use url::Url;

use crate::config::Config;
use crate::error::ConfigError;

/// Validate a [`Config`], returning all detected violations.
pub fn validate(config: &Config) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let resolver = &config.resolver;

    if resolver
        .web_root
        .as_deref()
        .is_some_and(|root| root.trim().is_empty())
    {
        errors.push(invalid("resolver.web_root", "must not be empty when set"));
    }

    if let Some(raw) = resolver.url.as_deref() {
        if let Err(e) = Url::parse(raw) {
            errors.push(invalid(
                "resolver.url",
                format!("must be an absolute URL, got {raw:?}: {e}"),
            ));
        }
    }

    for (prefix, dir) in resolver.path_mapping.iter() {
        if prefix.is_empty() {
            errors.push(invalid("resolver.path_mapping", "prefix must not be empty"));
        }
        if dir.trim().is_empty() {
            errors.push(invalid(
                "resolver.path_mapping",
                format!("directory for {prefix:?} must not be empty"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Validate and keep only the first violation.
pub(crate) fn validate_first(config: &Config) -> Result<(), ConfigError> {
    validate(config).map_err(|errors| {
        errors
            .into_iter()
            .next()
            .unwrap_or_else(|| invalid("unknown", "validation failed"))
    })
}
