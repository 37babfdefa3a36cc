use std::fmt;

/// Postal code rule for a single country.
///
/// Handlers only ever receive normalized input (see [`crate::normalize`]).
/// The manager always calls [`validate`](PostalCodeHandler::validate)
/// before [`format`](PostalCodeHandler::format).
pub trait PostalCodeHandler: Send + Sync {
    /// Whether the normalized code matches the country's structure
    fn validate(&self, postal_code: &str) -> bool;

    /// Canonical display form of a code this handler accepts
    fn format(&self, postal_code: &str) -> String;

    /// Non-empty description of the expected format, e.g. `NN-NNN`
    fn hint(&self) -> &str;
}

impl fmt::Debug for dyn PostalCodeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostalCodeHandler")
            .field("hint", &self.hint())
            .finish()
    }
}
