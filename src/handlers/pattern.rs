use regex::Regex;

use super::countries::CountryRule;
use super::traits::PostalCodeHandler;
use super::types::Layout;

/// Regex-driven handler backing every built-in rule and every
/// pattern-based handler declared in configuration.
#[derive(Debug, Clone)]
pub struct PatternHandler {
    pattern: Regex,
    hint: String,
    layout: Layout,
}

impl PatternHandler {
    /// Compile `pattern`. The pattern is matched against the whole
    /// normalized code, so anchors are optional.
    pub fn new(
        pattern: &str,
        hint: impl Into<String>,
        layout: Layout,
    ) -> Result<Self, regex::Error> {
        let anchored = format!("^(?:{pattern})$");
        Ok(Self {
            pattern: Regex::new(&anchored)?,
            hint: hint.into(),
            layout,
        })
    }

    pub fn from_rule(rule: &CountryRule) -> Result<Self, regex::Error> {
        Self::new(rule.pattern, rule.hint, rule.layout.clone())
    }
}

impl PostalCodeHandler for PatternHandler {
    fn validate(&self, postal_code: &str) -> bool {
        self.pattern.is_match(postal_code)
    }

    fn format(&self, postal_code: &str) -> String {
        self.layout.apply(postal_code)
    }

    fn hint(&self) -> &str {
        &self.hint
    }
}
