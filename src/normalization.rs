use std::borrow::Cow;

use crate::glyph_table::{GlyphTable, MAX_SEQUENCE_CHARS};

const HOOK: char = 'm';

// Signs that may be typed between a base and its right hook.
fn is_hook_leader(c: char) -> bool {
    c == ']' || c == '\'' || c == 'F'
}

// True when the keys at the end of `prefix` plus the hook make a glyph.
fn takes_hook(prefix: &str, table: &GlyphTable) -> bool {
    let mut start = prefix.len();
    for _ in 1..MAX_SEQUENCE_CHARS {
        match prefix[..start].char_indices().next_back() {
            Some((i, _)) => start = i,
            None => return false,
        }
        let mut key = String::with_capacity(prefix.len() - start + 1);
        key.push_str(&prefix[start..]);
        key.push(HOOK);
        if table.get_sequence(&key).is_some() {
            return true;
        }
    }
    false
}

/// Moves the right-hook key in front of a sign typed before it, so that
/// `k]m` becomes `km]` and matches the `km` (फ) glyph. Only bases that
/// have a hooked glyph in `table` are touched.
pub fn legacy_normalize<'a>(text: &'a str, table: &GlyphTable) -> Cow<'a, str> {
    if !text.contains(HOOK) {
        return Cow::Borrowed(text);
    }

    let mut normalized = String::with_capacity(text.len());
    let mut changed = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if is_hook_leader(c) && chars.peek() == Some(&HOOK) && takes_hook(&normalized, table) {
            chars.next();
            normalized.push(HOOK);
            changed = true;
        }
        normalized.push(c);
    }

    if changed {
        Cow::Owned(normalized)
    } else {
        Cow::Borrowed(text)
    }
}
