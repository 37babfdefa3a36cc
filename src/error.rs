use thiserror::Error;

/// Failures raised by the postal code manager.
///
/// Callers branch on the variant: an unknown country means no rule exists
/// at all, an invalid postal code means the rule exists and rejected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostalCodeError {
    #[error("Unknown country: {country}")]
    UnknownCountry { country: String },

    #[error("Invalid postal code \"{postal_code}\" for country {country}, expected: {hint}")]
    InvalidPostalCode {
        postal_code: String,
        country: String,
        hint: String,
    },
}

impl PostalCodeError {
    pub(crate) fn unknown_country(country: impl Into<String>) -> Self {
        Self::UnknownCountry {
            country: country.into(),
        }
    }

    pub(crate) fn invalid_postal_code(
        postal_code: impl Into<String>,
        country: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::InvalidPostalCode {
            postal_code: postal_code.into(),
            country: country.into(),
            hint: hint.into(),
        }
    }

    /// Uppercased country code the failing call was made for.
    pub fn country(&self) -> &str {
        match self {
            Self::UnknownCountry { country } | Self::InvalidPostalCode { country, .. } => country,
        }
    }

    /// Original (unnormalized) postal code, for invalid postal code failures.
    pub fn postal_code(&self) -> Option<&str> {
        match self {
            Self::InvalidPostalCode { postal_code, .. } => Some(postal_code),
            Self::UnknownCountry { .. } => None,
        }
    }

    /// Expected format of the country's rule, for invalid postal code failures.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::InvalidPostalCode { hint, .. } => Some(hint),
            Self::UnknownCountry { .. } => None,
        }
    }

    pub fn is_unknown_country(&self) -> bool {
        matches!(self, Self::UnknownCountry { .. })
    }

    pub fn is_invalid_postal_code(&self) -> bool {
        matches!(self, Self::InvalidPostalCode { .. })
    }
}

pub type Result<T> = std::result::Result<T, PostalCodeError>;
