use std::borrow::Cow;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::swap;

pub const VIRAMA: &str = "\u{094D}";
pub const MAX_SEQUENCE_CHARS: usize = 3;

/// Semantic role of one legacy glyph. Decides how the segmenter groups it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlyphRole {
    Consonant,
    IndependentVowel,
    /// Typed before the consonant it follows in logical order (ि).
    DependentVowelSignPre,
    DependentVowelSignPost,
    /// Virama forms and the nukta. Binds to the consonant on its left.
    HalfFormJoiner,
    /// Precomposed half consonant, binds to the consonant on its right.
    ConjunctTrigger,
    /// Anusvara, candrabindu, visarga.
    VowelModifier,
    /// र् typed after the syllable it is written over.
    Reph,
    Numeral,
    Punctuation,
    Whitespace,
    Unrecognized,
}

impl GlyphRole {
    pub fn is_anchor(self) -> bool {
        matches!(self, GlyphRole::Consonant | GlyphRole::IndependentVowel)
    }

    /// Roles that never join a cluster and keep their mapped fragment.
    pub fn is_standalone(self) -> bool {
        matches!(
            self,
            GlyphRole::Numeral | GlyphRole::Punctuation | GlyphRole::Whitespace | GlyphRole::Unrecognized
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegacyFont {
    Preeti,
    Hisab,
}

impl LegacyFont {
    pub fn name(self) -> &'static str {
        match self {
            LegacyFont::Preeti => "preeti",
            LegacyFont::Hisab => "hisab",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub role: GlyphRole,
    pub fragment: &'static str,
}

/// One matched unit of legacy input: a single key or a multi-key sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub raw: &'a str,
    pub role: GlyphRole,
    pub fragment: &'a str,
}

impl<'a> Token<'a> {
    /// Malformed placement: emit the raw keystroke instead of the mapped glyph.
    pub fn degrade(self) -> Self {
        Token {
            raw: self.raw,
            role: GlyphRole::Unrecognized,
            fragment: self.raw,
        }
    }

    pub fn is_bare_virama(&self) -> bool {
        self.role == GlyphRole::HalfFormJoiner && self.fragment == VIRAMA
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    pub key: String,
    pub role: GlyphRole,
    pub fragment: String,
}

const CON: GlyphRole = GlyphRole::Consonant;
const IND: GlyphRole = GlyphRole::IndependentVowel;
const PRE: GlyphRole = GlyphRole::DependentVowelSignPre;
const POST: GlyphRole = GlyphRole::DependentVowelSignPost;
const JOIN: GlyphRole = GlyphRole::HalfFormJoiner;
const HALF: GlyphRole = GlyphRole::ConjunctTrigger;
const MOD: GlyphRole = GlyphRole::VowelModifier;
const REPH: GlyphRole = GlyphRole::Reph;
const NUM: GlyphRole = GlyphRole::Numeral;
const PUNCT: GlyphRole = GlyphRole::Punctuation;
const WS: GlyphRole = GlyphRole::Whitespace;

// Preeti key assignment. Hisab differs only in the digit row, see `build`.
static PREETI_ENTRIES: &[(&str, GlyphRole, &str)] = &[
    // consonants
    ("a", CON, "ब"),
    ("b", CON, "द"),
    ("d", CON, "म"),
    ("e", CON, "भ"),
    ("g", CON, "न"),
    ("h", CON, "ज"),
    ("j", CON, "व"),
    ("k", CON, "प"),
    ("n", CON, "ल"),
    ("o", CON, "य"),
    ("q", CON, "त्र"),
    ("r", CON, "च"),
    ("s", CON, "क"),
    ("t", CON, "त"),
    ("u", CON, "ग"),
    ("v", CON, "ख"),
    ("w", CON, "ध"),
    ("x", CON, "ह"),
    ("y", CON, "थ"),
    ("z", CON, "श"),
    ("B", CON, "द्य"),
    ("Q", CON, "त्त"),
    (";", CON, "स"),
    (">", CON, "श्र"),
    ("/", CON, "र"),
    ("?", CON, "रु"),
    ("`", CON, "ञ"),
    ("1", CON, "ज्ञ"),
    ("2", CON, "द्द"),
    ("3", CON, "घ"),
    ("4", CON, "द्ध"),
    ("5", CON, "छ"),
    ("6", CON, "ट"),
    ("7", CON, "ठ"),
    ("8", CON, "ड"),
    ("9", CON, "ढ"),
    ("¢", CON, "द्घ"),
    ("§", CON, "ट्ट"),
    ("°", CON, "ड्ढ"),
    ("¶", CON, "ठ्ठ"),
    ("¿", CON, "रू"),
    ("Å", CON, "हृ"),
    ("Ë", CON, "ङ्ग"),
    ("Ì", CON, "त्र"),
    ("Í", CON, "ङ्क"),
    ("Î", CON, "ङ्ख"),
    ("Ý", CON, "ट्ठ"),
    ("å", CON, "द्व"),
    ("ß", CON, "द्म"),
    ("ª", CON, "ङ"),
    ("´", CON, "झ"),
    ("•", CON, "ड्ड"),
    ("›", CON, "द्र"),
    ("„", CON, "ध्र"),
    ("‹", CON, "ङ्घ"),
    // half forms
    ("i", HALF, "ष्"),
    ("A", HALF, "ब्"),
    ("D", HALF, "म्"),
    ("E", HALF, "भ्"),
    ("G", HALF, "न्"),
    ("H", HALF, "ज्"),
    ("I", HALF, "क्ष्"),
    ("J", HALF, "व्"),
    ("K", HALF, "प्"),
    ("N", HALF, "ल्"),
    ("R", HALF, "च्"),
    ("S", HALF, "क्"),
    ("T", HALF, "त्"),
    ("U", HALF, "ग्"),
    ("V", HALF, "ख्"),
    ("W", HALF, "ध्"),
    ("X", HALF, "ह्"),
    ("Y", HALF, "थ्"),
    ("Z", HALF, "श्"),
    (":", HALF, "स्"),
    ("~", HALF, "ञ्"),
    ("0", HALF, "ण्"),
    ("¡", HALF, "ज्ञ्"),
    ("£", HALF, "घ्"),
    ("‰", HALF, "झ्"),
    // independent vowels
    ("c", IND, "अ"),
    ("O", IND, "इ"),
    ("p", IND, "उ"),
    ("C", IND, "ऋ"),
    ("P", IND, "ए"),
    // vowel signs
    ("l", PRE, "ि"),
    ("f", POST, "ा"),
    ("L", POST, "ी"),
    ("'", POST, "ु"),
    ("\"", POST, "ू"),
    ("[", POST, "ृ"),
    ("]", POST, "े"),
    ("}", POST, "ै"),
    ("‘", POST, "ॅ"),
    // joiners
    ("\\", JOIN, "्"),
    ("|", JOIN, "्र"),
    ("«", JOIN, "्र"),
    ("Ø", JOIN, "्य"),
    ("Þ", JOIN, "़"),
    ("+", MOD, "ं"),
    ("F", MOD, "ँ"),
    ("M", MOD, "ः"),
    ("{", REPH, "र्"),
    // numerals sit on the shifted digit row
    (")", NUM, "०"),
    ("!", NUM, "१"),
    ("@", NUM, "२"),
    ("#", NUM, "३"),
    ("$", NUM, "४"),
    ("%", NUM, "५"),
    ("^", NUM, "६"),
    ("&", NUM, "७"),
    ("*", NUM, "८"),
    ("(", NUM, "९"),
    (".", PUNCT, "।"),
    ("=", PUNCT, "."),
    ("-", PUNCT, "("),
    ("_", PUNCT, ")"),
    (",", PUNCT, ","),
    ("<", PUNCT, "?"),
    ("ç", PUNCT, "ॐ"),
    ("˜", PUNCT, "ऽ"),
    (" ", WS, " "),
    ("\t", WS, "\t"),
    ("\n", WS, "\n"),
    ("\r", WS, "\r"),
    // multi-key glyphs
    ("cf", IND, "आ"),
    ("cf]", IND, "ओ"),
    ("cf}", IND, "औ"),
    ("cf‘", IND, "ऑ"),
    ("O{", IND, "ई"),
    ("pm", IND, "ऊ"),
    ("P]", IND, "ऐ"),
    ("f]", POST, "ो"),
    ("f}", POST, "ौ"),
    ("f‘", POST, "ॉ"),
    ("if", CON, "ष"),
    ("If", CON, "क्ष"),
    ("0f", CON, "ण"),
    ("km", CON, "फ"),
    ("em", CON, "झ"),
    ("Qm", CON, "क्त"),
    ("qm", CON, "क्र"),
    ("k|m", CON, "फ्र"),
    ("8Þ", CON, "ड़"),
    ("9Þ", CON, "ढ़"),
    ("Km", HALF, "फ्"),
];

static PREETI: Lazy<GlyphTable> = Lazy::new(|| GlyphTable::build(LegacyFont::Preeti));
static HISAB: Lazy<GlyphTable> = Lazy::new(|| GlyphTable::build(LegacyFont::Hisab));

/// Read-only key-to-glyph mapping for one legacy font.
pub struct GlyphTable {
    font: LegacyFont,
    singles: FxHashMap<char, Glyph>,
    sequences: FxHashMap<String, Glyph>,
}

impl GlyphTable {
    pub fn preeti() -> &'static GlyphTable {
        &PREETI
    }

    pub fn hisab() -> &'static GlyphTable {
        &HISAB
    }

    pub fn for_font(font: LegacyFont) -> &'static GlyphTable {
        match font {
            LegacyFont::Preeti => Self::preeti(),
            LegacyFont::Hisab => Self::hisab(),
        }
    }

    fn build(font: LegacyFont) -> Self {
        let mut singles = FxHashMap::default();
        let mut sequences = FxHashMap::default();

        for &(key, role, fragment) in PREETI_ENTRIES {
            let key: String = match font {
                LegacyFont::Preeti => key.to_string(),
                LegacyFont::Hisab => key.chars().map(swap::swap_char).collect(),
            };
            let glyph = Glyph { role, fragment };
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    singles.insert(c, glyph);
                }
                (Some(_), Some(_)) => {
                    debug_assert!(key.chars().count() <= MAX_SEQUENCE_CHARS);
                    sequences.insert(key, glyph);
                }
                _ => {}
            }
        }

        log::debug!(
            "built {} glyph table: {} keys, {} sequences",
            font.name(),
            singles.len(),
            sequences.len()
        );

        GlyphTable { font, singles, sequences }
    }

    pub fn font(&self) -> LegacyFont {
        self.font
    }

    pub fn get(&self, c: char) -> Option<&Glyph> {
        self.singles.get(&c)
    }

    pub fn get_sequence(&self, keys: &str) -> Option<&Glyph> {
        self.sequences.get(keys)
    }

    /// Total lookup: unknown code points come back as `Unrecognized` with the
    /// code point itself as fragment.
    pub fn lookup(&self, c: char) -> (GlyphRole, Cow<'static, str>) {
        match self.singles.get(&c) {
            Some(glyph) => (glyph.role, Cow::Borrowed(glyph.fragment)),
            None => (GlyphRole::Unrecognized, Cow::Owned(c.to_string())),
        }
    }

    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::with_capacity(text.len());
        let mut i = 0;
        while i < text.len() {
            let token = self.token_at(&text[i..]);
            i += token.raw.len();
            tokens.push(token);
        }
        tokens
    }

    // Longest match over the sequence table, then the single key.
    fn token_at<'a>(&self, rest: &'a str) -> Token<'a> {
        let mut ends = [0usize; MAX_SEQUENCE_CHARS];
        let mut count = 0;
        for (offset, c) in rest.char_indices().take(MAX_SEQUENCE_CHARS) {
            ends[count] = offset + c.len_utf8();
            count += 1;
        }

        for n in (2..=count).rev() {
            let raw = &rest[..ends[n - 1]];
            if let Some(glyph) = self.sequences.get(raw) {
                return Token { raw, role: glyph.role, fragment: glyph.fragment };
            }
        }

        // rest is non-empty, so count >= 1
        let raw = &rest[..ends[0]];
        let c = raw.chars().next().unwrap_or_default();
        match self.singles.get(&c) {
            Some(glyph) => Token { raw, role: glyph.role, fragment: glyph.fragment },
            None => Token { raw, role: GlyphRole::Unrecognized, fragment: raw },
        }
    }

    pub fn entries(&self) -> Vec<TableEntry> {
        let mut entries: Vec<TableEntry> = self
            .singles
            .iter()
            .map(|(c, g)| TableEntry { key: c.to_string(), role: g.role, fragment: g.fragment.to_string() })
            .chain(self.sequences.iter().map(|(k, g)| TableEntry {
                key: k.clone(),
                role: g.role,
                fragment: g.fragment.to_string(),
            }))
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries
    }
}
