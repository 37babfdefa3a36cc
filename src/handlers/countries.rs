//! Built-in postal code rules, one per supported country.
//!
//! Patterns are written against normalized input (uppercase, no spaces or
//! hyphens) and are matched against the whole code.

use super::types::Layout;

/// Declarative rule for one country.
#[derive(Debug, Clone)]
pub struct CountryRule {
    /// Uppercased ISO 3166-1 alpha-2 code
    pub country: &'static str,
    pub pattern: &'static str,
    pub hint: &'static str,
    pub layout: Layout,
}

const fn rule(
    country: &'static str,
    pattern: &'static str,
    hint: &'static str,
    layout: Layout,
) -> CountryRule {
    CountryRule {
        country,
        pattern,
        hint,
        layout,
    }
}

/// Lebanon: rural and placeholder codes stay compact, 8-digit urban and
/// P.O. Box codes are split in two groups of four.
fn format_lebanon(code: &str) -> String {
    if code.len() == 8 {
        Layout::split(4, " ").apply(code)
    } else {
        code.to_string()
    }
}

/// Sorted by country code.
static COUNTRY_RULES: &[CountryRule] = &[
    rule("AD", "(?:AD)?[0-9]{3}", "ADNNN", Layout::prefixed("AD", "")),
    rule("AF", "[0-9]{4}", "NNNN", Layout::Compact),
    rule("AR", "[0-9]{4}|[A-Z][0-9]{4}[A-Z]{3}", "NNNN or ANNNNAAA", Layout::Compact),
    rule("AT", "[1-9][0-9]{3}", "NNNN", Layout::Compact),
    rule("AU", "[0-9]{4}", "NNNN", Layout::Compact),
    rule("BE", "[1-9][0-9]{3}", "NNNN", Layout::Compact),
    rule("BR", "[0-9]{8}", "NNNNN-NNN", Layout::split(5, "-")),
    rule(
        "CA",
        "[ABCEGHJ-NPRSTVXY][0-9][ABCEGHJ-NPRSTV-Z][0-9][ABCEGHJ-NPRSTV-Z][0-9]",
        "ANA NAN",
        Layout::split(3, " "),
    ),
    rule("CH", "[1-9][0-9]{3}", "NNNN", Layout::Compact),
    rule("CN", "[0-9]{6}", "NNNNNN", Layout::Compact),
    rule("CZ", "[1-7][0-9]{4}", "NNN NN", Layout::split(3, " ")),
    rule("DE", "[0-9]{5}", "NNNNN", Layout::Compact),
    rule("DK", "[1-9][0-9]{3}", "NNNN", Layout::Compact),
    rule("ES", "(?:0[1-9]|[1-4][0-9]|5[0-2])[0-9]{3}", "NNNNN", Layout::Compact),
    rule("FI", "[0-9]{5}", "NNNNN", Layout::Compact),
    rule("FR", "[0-9]{5}", "NNNNN", Layout::Compact),
    rule(
        "GB",
        "[A-Z]{1,2}[0-9][A-Z0-9]?[0-9][A-Z]{2}|GIR0AA",
        "AN NAA, ANN NAA, AAN NAA, AANN NAA, ANA NAA or AANA NAA",
        Layout::split_tail(3, " "),
    ),
    rule("GR", "[1-8][0-9]{4}", "NNN NN", Layout::split(3, " ")),
    rule("HU", "[1-9][0-9]{3}", "NNNN", Layout::Compact),
    rule(
        "IE",
        "(?:[AC-FHKNPRTV-Y][0-9]{2}|D6W)[0-9AC-FHKNPRTV-Y]{4}",
        "ANN AAAA",
        Layout::split(3, " "),
    ),
    rule("IN", "[1-9][0-9]{5}", "NNNNNN", Layout::Compact),
    rule("IT", "[0-9]{5}", "NNNNN", Layout::Compact),
    rule("JP", "[0-9]{7}", "NNN-NNNN", Layout::split(3, "-")),
    rule("KR", "[0-9]{5}", "NNNNN", Layout::Compact),
    rule(
        "LB",
        "[0-9]{4}|[0-9]{5}|[0-9]{8}",
        "NNNN, NNNNN or NNNN NNNN",
        Layout::Custom(format_lebanon),
    ),
    rule("LT", "(?:LT)?[0-9]{5}", "LT-NNNNN", Layout::prefixed("LT", "-")),
    rule("LU", "L?[0-9]{4}", "L-NNNN", Layout::prefixed("L", "-")),
    rule("LV", "(?:LV)?[0-9]{4}", "LV-NNNN", Layout::prefixed("LV", "-")),
    rule("MT", "[A-Z]{3}[0-9]{4}", "AAA NNNN", Layout::split(3, " ")),
    rule("MX", "[0-9]{5}", "NNNNN", Layout::Compact),
    rule(
        "NL",
        "[1-9][0-9]{3}(?:[A-RT-Z][A-Z]|S[BCE-RT-Z])",
        "NNNN AA",
        Layout::split(4, " "),
    ),
    rule("NO", "[0-9]{4}", "NNNN", Layout::Compact),
    rule("NZ", "[0-9]{4}", "NNNN", Layout::Compact),
    rule("PL", "[0-9]{5}", "NN-NNN", Layout::split(2, "-")),
    rule("PT", "[1-9][0-9]{6}", "NNNN-NNN", Layout::split(4, "-")),
    rule("RO", "[0-9]{6}", "NNNNNN", Layout::Compact),
    rule("RU", "[1-9][0-9]{5}", "NNNNNN", Layout::Compact),
    rule("SE", "[1-9][0-9]{4}", "NNN NN", Layout::split(3, " ")),
    rule("SG", "[0-9]{6}", "NNNNNN", Layout::Compact),
    rule("SK", "[089][0-9]{4}", "NNN NN", Layout::split(3, " ")),
    rule("TR", "(?:0[1-9]|[1-7][0-9]|8[01])[0-9]{3}", "NNNNN", Layout::Compact),
    rule("TW", "[0-9]{3}(?:[0-9]{2,3})?", "NNN, NNNNN or NNNNNN", Layout::Compact),
    rule("UA", "[0-9]{5}", "NNNNN", Layout::Compact),
    rule("US", "[0-9]{5}(?:[0-9]{4})?", "NNNNN or NNNNN-NNNN", Layout::split(5, "-")),
    rule("ZA", "[0-9]{4}", "NNNN", Layout::Compact),
];

/// Look up the built-in rule for an uppercased country code.
pub fn rule_for(country: &str) -> Option<&'static CountryRule> {
    COUNTRY_RULES
        .binary_search_by(|rule| rule.country.cmp(country))
        .ok()
        .map(|index| &COUNTRY_RULES[index])
}

pub fn rules() -> &'static [CountryRule] {
    COUNTRY_RULES
}
