use std::borrow::Cow;

/// How a rule renders an accepted, normalized postal code.
#[derive(Debug, Clone, Default)]
pub enum Layout {
    /// Emit the normalized code unchanged
    #[default]
    Compact,
    /// Insert `separator` after the first `at` characters when the code is longer
    Split {
        at: usize,
        separator: Cow<'static, str>,
    },
    /// Insert `separator` before the last `tail` characters
    SplitTail {
        tail: usize,
        separator: Cow<'static, str>,
    },
    /// Drop an optional leading `prefix`, then emit `prefix + separator + rest`
    Prefixed {
        prefix: Cow<'static, str>,
        separator: Cow<'static, str>,
    },
    /// Country-specific rendering
    Custom(fn(&str) -> String),
}

impl Layout {
    pub const fn split(at: usize, separator: &'static str) -> Self {
        Self::Split {
            at,
            separator: Cow::Borrowed(separator),
        }
    }

    pub const fn split_tail(tail: usize, separator: &'static str) -> Self {
        Self::SplitTail {
            tail,
            separator: Cow::Borrowed(separator),
        }
    }

    pub const fn prefixed(prefix: &'static str, separator: &'static str) -> Self {
        Self::Prefixed {
            prefix: Cow::Borrowed(prefix),
            separator: Cow::Borrowed(separator),
        }
    }

    /// Render `code`. Never panics; positions that fall outside the code or
    /// inside a multi-byte character leave the code as is.
    pub fn apply(&self, code: &str) -> String {
        match self {
            Layout::Compact => code.to_string(),
            Layout::Split { at, separator } => {
                if code.len() > *at && code.is_char_boundary(*at) {
                    let (head, tail) = code.split_at(*at);
                    format!("{head}{separator}{tail}")
                } else {
                    code.to_string()
                }
            }
            Layout::SplitTail { tail, separator } => match code.len().checked_sub(*tail) {
                Some(at) if at > 0 && code.is_char_boundary(at) => {
                    let (head, rest) = code.split_at(at);
                    format!("{head}{separator}{rest}")
                }
                _ => code.to_string(),
            },
            Layout::Prefixed { prefix, separator } => {
                let rest = code.strip_prefix(&**prefix).unwrap_or(code);
                format!("{prefix}{separator}{rest}")
            }
            Layout::Custom(render) => render(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact() {
        assert_eq!(Layout::Compact.apply("12345"), "12345");
    }

    #[test]
    fn test_split() {
        let layout = Layout::split(2, "-");
        assert_eq!(layout.apply("12345"), "12-345");
        assert_eq!(layout.apply("12"), "12");
        assert_eq!(layout.apply(""), "");
    }

    #[test]
    fn test_split_only_when_longer() {
        let layout = Layout::split(5, "-");
        assert_eq!(layout.apply("12345"), "12345");
        assert_eq!(layout.apply("123456789"), "12345-6789");
    }

    #[test]
    fn test_split_tail() {
        let layout = Layout::split_tail(3, " ");
        assert_eq!(layout.apply("WC2E9RZ"), "WC2E 9RZ");
        assert_eq!(layout.apply("M11AE"), "M1 1AE");
        assert_eq!(layout.apply("9RZ"), "9RZ");
        assert_eq!(layout.apply("RZ"), "RZ");
    }

    #[test]
    fn test_prefixed() {
        let layout = Layout::prefixed("LV", "-");
        assert_eq!(layout.apply("1050"), "LV-1050");
        assert_eq!(layout.apply("LV1050"), "LV-1050");
    }

    #[test]
    fn test_multibyte_input_does_not_panic() {
        assert_eq!(Layout::split(1, "-").apply("éé"), "éé");
        assert_eq!(Layout::split_tail(1, " ").apply("ßx"), "ß x");
        assert_eq!(Layout::split_tail(1, " ").apply("xß"), "xß");
    }

    #[test]
    fn test_custom() {
        fn shout(code: &str) -> String {
            format!("<{code}>")
        }
        assert_eq!(Layout::Custom(shout).apply("AB"), "<AB>");
    }
}
