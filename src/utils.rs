use std::borrow::Cow;

pub fn is_devanagari_char(cp: char) -> bool {
    // Devanagari, Devanagari Extended
    (cp >= '\u{0900}' && cp <= '\u{097F}') || (cp >= '\u{A8E0}' && cp <= '\u{A8FF}')
}

/// Share of non-whitespace chars that are already Devanagari. Used to warn
/// when text that looks converted is fed back in.
pub fn devanagari_ratio(text: &str) -> f32 {
    let mut total = 0usize;
    let mut deva = 0usize;
    for c in text.chars().filter(|c| !c.is_whitespace()) {
        total += 1;
        if is_devanagari_char(c) {
            deva += 1;
        }
    }
    if total == 0 {
        return 0.0;
    }
    deva as f32 / total as f32
}

pub fn strip_bom(line: &str) -> &str {
    line.strip_prefix('\u{FEFF}').unwrap_or(line)
}

/// Drops `<...>` markup. An unterminated `<` removes the rest of the text.
pub fn strip_tags(text: &str) -> Cow<'_, str> {
    if !text.contains('<') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match (in_tag, c) {
            (false, '<') => in_tag = true,
            (true, '>') => in_tag = false,
            (false, _) => out.push(c),
            (true, _) => {}
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markup() {
        assert_eq!(strip_tags("<b>g]kfn</b>"), "g]kfn");
        assert_eq!(strip_tags("a<br/>b"), "ab");
        assert_eq!(strip_tags("ab<c"), "ab");
        assert!(matches!(strip_tags("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn bom_only_at_start() {
        assert_eq!(strip_bom("\u{FEFF}abc"), "abc");
        assert_eq!(strip_bom("a\u{FEFF}"), "a\u{FEFF}");
    }

    #[test]
    fn ratio() {
        assert_eq!(devanagari_ratio(""), 0.0);
        assert_eq!(devanagari_ratio("नेपाल"), 1.0);
        assert_eq!(devanagari_ratio("g]kfn"), 0.0);
    }
}
