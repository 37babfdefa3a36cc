use super::models::{Config, HandlerConfig};
use std::str::FromStr;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Handler key '{country}' is not an alphanumeric country code")]
    InvalidCountryCode { country: String },

    #[error("Handler '{country}' must set exactly one of 'builtin' or 'pattern'")]
    AmbiguousHandler { country: String },

    #[error("Handler '{country}' sets neither 'builtin' nor 'pattern'")]
    EmptyHandler { country: String },

    #[error("Handler '{country}' declares a pattern without a hint")]
    MissingHint { country: String },

    #[error("Handler '{country}' sets more than one of 'split_at', 'split_tail', 'prefix'")]
    ConflictingLayout { country: String },

    #[error("Invalid log level '{level}', expected trace, debug, info, warn, error or off")]
    InvalidLogLevel { level: String },
}

/// Validate the entire configuration.
///
/// Only structure is checked here. Whether a built-in alias exists or a
/// pattern compiles is decided when the country is first looked up, where
/// a broken binding simply makes the country unsupported.
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_logging(config)?;
    validate_handlers(config)?;
    Ok(())
}

fn validate_logging(config: &Config) -> Result<(), ValidationError> {
    LevelFilter::from_str(&config.logging.level).map_err(|_| ValidationError::InvalidLogLevel {
        level: config.logging.level.clone(),
    })?;
    Ok(())
}

fn validate_handlers(config: &Config) -> Result<(), ValidationError> {
    for (country, handler) in &config.handlers {
        if country.is_empty() || !country.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidCountryCode {
                country: country.clone(),
            });
        }

        validate_handler(country, handler)?;
    }

    Ok(())
}

fn validate_handler(country: &str, handler: &HandlerConfig) -> Result<(), ValidationError> {
    match (&handler.builtin, &handler.pattern) {
        (Some(_), Some(_)) => {
            return Err(ValidationError::AmbiguousHandler {
                country: country.to_string(),
            });
        }
        (None, None) => {
            return Err(ValidationError::EmptyHandler {
                country: country.to_string(),
            });
        }
        (None, Some(_)) => {
            let has_hint = handler
                .hint
                .as_deref()
                .is_some_and(|hint| !hint.trim().is_empty());
            if !has_hint {
                return Err(ValidationError::MissingHint {
                    country: country.to_string(),
                });
            }
        }
        (Some(_), None) => {}
    }

    let layouts = [
        handler.split_at.is_some(),
        handler.split_tail.is_some(),
        handler.prefix.is_some(),
    ];
    if layouts.iter().filter(|set| **set).count() > 1 {
        return Err(ValidationError::ConflictingLayout {
            country: country.to_string(),
        });
    }

    Ok(())
}
