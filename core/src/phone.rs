//! Phone number normalization.

/// Strip the punctuation people type into phone numbers: parentheses,
/// dashes and spaces. Everything else, including `+` and `.`, is kept.
pub fn clean_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '(' | ')' | '-' | ' '))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_us_formatting() {
        assert_eq!(clean_phone("(891) 234-1213"), "8912341213");
        assert_eq!(clean_phone("123-331-1245"), "1233311245");
    }

    #[test]
    fn strips_in_any_position_and_count() {
        assert_eq!(clean_phone(" --(12)) 3 -"), "123");
        assert_eq!(clean_phone("()- "), "");
    }

    #[test]
    fn clean_input_is_unchanged() {
        for raw in ["1238889999", "+18085551212", "808.555.1212", ""] {
            assert_eq!(clean_phone(raw), raw);
            assert_eq!(clean_phone(&clean_phone(raw)), clean_phone(raw));
        }
    }
}
