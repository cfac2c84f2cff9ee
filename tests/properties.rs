use nepali_unicode::{
    convert, GlyphTable, HisabConverter, LegacyFont, LegacySwapConverter, PreetiConverter, TargetFont,
};

fn printable_ascii() -> Vec<char> {
    (0x20u8..0x7f).map(char::from).collect()
}

// Deterministic pseudo-random key strings over the legacy keyboard.
fn keystrokes(count: usize, max_len: usize) -> Vec<String> {
    let keys: Vec<char> = printable_ascii()
        .into_iter()
        .chain("¡¢£§°¶¿ÅËÌÍÎÝåßª´•›„‹«ØÞç˜‘‰".chars())
        .collect();
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    (0..count)
        .map(|_| {
            let len = (next() as usize) % (max_len + 1);
            (0..len).map(|_| keys[(next() as usize) % keys.len()]).collect()
        })
        .collect()
}

#[test]
fn every_key_pair_converts() {
    let keys = printable_ascii();
    for &a in &keys {
        for &b in &keys {
            let text: String = [a, b].iter().collect();
            assert!(!PreetiConverter::convert(&text).is_empty(), "{:?}", text);
            assert!(!HisabConverter::convert(&text).is_empty(), "{:?}", text);
        }
    }
}

#[test]
fn random_keystrokes_convert() {
    for text in keystrokes(20_000, 24) {
        let out = PreetiConverter::convert(&text);
        assert!(text.is_empty() == out.is_empty(), "{:?} -> {:?}", text, out);
    }
}

#[test]
fn hisab_matches_preeti_after_swap() {
    for text in keystrokes(5_000, 16) {
        let hisab = LegacySwapConverter::preeti_to_hisab(&text);
        assert_eq!(HisabConverter::convert(&hisab), PreetiConverter::convert(&text), "{:?}", text);
    }
}

#[test]
fn swap_is_an_involution() {
    for text in keystrokes(5_000, 32) {
        assert_eq!(
            LegacySwapConverter::hisab_to_preeti(&LegacySwapConverter::preeti_to_hisab(&text)),
            text
        );
        assert_eq!(
            LegacySwapConverter::preeti_to_hisab(&LegacySwapConverter::hisab_to_preeti(&text)),
            text
        );
    }
}

// `m` is unmapped on its own but completes a glyph after some bases,
// possibly with one sign typed in between.
fn hooks_onto(table: &GlyphTable, text: &str) -> bool {
    let base = text.strip_suffix([']', '\'', 'F']).unwrap_or(text);
    let chars: Vec<char> = base.chars().collect();
    (1..=2).filter(|&n| n <= chars.len()).any(|n| {
        let mut key: String = chars[chars.len() - n..].iter().collect();
        key.push('m');
        table.get_sequence(&key).is_some()
    })
}

#[test]
fn unmapped_chars_keep_their_position() {
    let table = GlyphTable::preeti();
    let markers = ['€', '→', 'न', '\u{200D}', 'é', 'm'];
    let texts = keystrokes(2_000, 8);
    for &marker in &markers {
        assert!(table.get(marker).is_none());
        for pair in texts.chunks(2) {
            let (a, b) = (&pair[0], pair.get(1).map(String::as_str).unwrap_or(""));
            if marker == 'm' && hooks_onto(table, a) {
                continue;
            }
            let joined = format!("{}{}{}", a, marker, b);
            let expected = format!("{}{}{}", PreetiConverter::convert(a), marker, PreetiConverter::convert(b));
            assert_eq!(PreetiConverter::convert(&joined), expected, "{:?}", joined);
        }
    }
}

#[test]
fn same_font_is_identity() {
    for text in keystrokes(1_000, 16) {
        assert_eq!(convert(&text, LegacyFont::Preeti, TargetFont::Preeti), text);
        assert_eq!(convert(&text, LegacyFont::Hisab, TargetFont::Hisab), text);
    }
}

#[test]
fn converters_are_shareable_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                keystrokes(500, 12)
                    .into_iter()
                    .skip(i)
                    .map(|t| PreetiConverter::convert(&t))
                    .count()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().is_ok());
    }
}
