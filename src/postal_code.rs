use std::fmt;

use crate::error::Result;
use crate::manager::PostalCodeManager;
use crate::normalize::normalize;

/// A postal code paired with its country, bound to the manager that
/// interprets it.
///
/// Construction never validates; every query goes through the manager and
/// so reflects the bindings registered at call time.
#[derive(Debug, Clone)]
pub struct PostalCode<'m> {
    original: String,
    country: String,
    manager: &'m PostalCodeManager,
}

impl<'m> PostalCode<'m> {
    pub fn new(
        original: impl Into<String>,
        country: impl Into<String>,
        manager: &'m PostalCodeManager,
    ) -> Self {
        Self {
            original: original.into(),
            country: country.into(),
            manager,
        }
    }

    pub fn is_valid(&self) -> Result<bool> {
        self.manager.validate(&self.original, &self.country)
    }

    pub fn format(&self) -> Result<String> {
        self.manager.format(&self.original, &self.country)
    }

    pub fn format_or_none(&self) -> Result<Option<String>> {
        self.manager.format_or_none(&self.original, &self.country)
    }

    /// Formatted code, or `fallback` when the country's rule rejects it
    pub fn format_or(&self, fallback: impl Into<String>) -> Result<String> {
        Ok(self
            .format_or_none()?
            .unwrap_or_else(|| fallback.into()))
    }

    pub fn hint(&self) -> Result<String> {
        self.manager.hint(&self.country)
    }

    pub fn is_country_supported(&self) -> bool {
        self.manager.is_supported_country(&self.country)
    }

    /// Country code as given
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Input exactly as given
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn normalized(&self) -> String {
        normalize(&self.original)
    }
}

impl fmt::Display for PostalCode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format_or_none() {
            Ok(Some(formatted)) => f.write_str(&formatted),
            _ => f.write_str(&self.original),
        }
    }
}
