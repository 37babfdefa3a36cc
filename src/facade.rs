//! Process-wide shared manager.
//!
//! Convenience for callers that do not want to thread a
//! [`PostalCodeManager`] through their code. The shared manager starts with
//! the built-in rules only; bindings registered here are visible to every
//! caller in the process.

use std::sync::LazyLock;

use crate::error::Result;
use crate::handlers::HandlerFactory;
use crate::manager::PostalCodeManager;
use crate::postal_code::PostalCode;

static MANAGER: LazyLock<PostalCodeManager> = LazyLock::new(PostalCodeManager::new);

pub fn manager() -> &'static PostalCodeManager {
    &MANAGER
}

pub fn is_supported_country(country: &str) -> bool {
    manager().is_supported_country(country)
}

pub fn validate(postal_code: &str, country: &str) -> Result<bool> {
    manager().validate(postal_code, country)
}

pub fn format(postal_code: &str, country: &str) -> Result<String> {
    manager().format(postal_code, country)
}

pub fn format_or_none(postal_code: &str, country: &str) -> Result<Option<String>> {
    manager().format_or_none(postal_code, country)
}

pub fn hint(country: &str) -> Result<String> {
    manager().hint(country)
}

pub fn register_handler(country: &str, factory: HandlerFactory) -> &'static PostalCodeManager {
    manager().register_handler(country, factory)
}

pub fn postal_code(
    postal_code: impl Into<String>,
    country: impl Into<String>,
) -> PostalCode<'static> {
    manager().postal_code(postal_code, country)
}
