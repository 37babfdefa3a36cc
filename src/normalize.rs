//! Input normalization applied before any handler sees a postal code.

/// Strip spaces and hyphens, then ASCII-uppercase what remains.
///
/// Every other character is kept verbatim, so punctuation such as `_`, `.`
/// or `/` reaches the handler and fails its rule.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
