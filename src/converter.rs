use std::borrow::Cow;

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::emitter::UnicodeEmitter;
use crate::error::ConvertError;
use crate::glyph_table::{GlyphTable, LegacyFont};
use crate::normalization::legacy_normalize;
use crate::reorder::ClusterReorderer;
use crate::segmenter::ClusterSegmenter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub enable_normalization: bool,
    pub enable_reph_reordering: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            enable_normalization: true,
            enable_reph_reordering: true,
        }
    }
}

impl ConverterConfig {
    pub fn from_json(json: &str) -> Result<Self, ConvertError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Legacy keystrokes to Unicode for one font.
pub struct LegacyFontConverter {
    table: &'static GlyphTable,
    segmenter: ClusterSegmenter,
    reorderer: ClusterReorderer,
    emitter: UnicodeEmitter,
    config: ConverterConfig,
}

impl LegacyFontConverter {
    pub fn new(font: LegacyFont, config: ConverterConfig) -> Self {
        Self {
            table: GlyphTable::for_font(font),
            segmenter: ClusterSegmenter::new(config.enable_reph_reordering),
            reorderer: ClusterReorderer::new(),
            emitter: UnicodeEmitter::new(),
            config,
        }
    }

    pub fn font(&self) -> LegacyFont {
        self.table.font()
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Never fails: keys outside the font's table pass through unchanged.
    pub fn convert(&self, raw_text: &str) -> String {
        if raw_text.is_empty() {
            return String::new();
        }

        let text = if self.config.enable_normalization {
            legacy_normalize(raw_text, self.table)
        } else {
            Cow::Borrowed(raw_text)
        };

        let tokens = self.table.tokenize(&text);
        let units = self.segmenter.segment(&tokens);
        debug!(
            "{}: {} chars -> {} tokens -> {} units",
            self.font().name(),
            raw_text.chars().count(),
            tokens.len(),
            units.len()
        );

        let ordered = self.reorderer.reorder_units(units);
        self.emitter.emit(&ordered)
    }
}

static PREETI_CONVERTER: Lazy<LegacyFontConverter> =
    Lazy::new(|| LegacyFontConverter::new(LegacyFont::Preeti, ConverterConfig::default()));
static HISAB_CONVERTER: Lazy<LegacyFontConverter> =
    Lazy::new(|| LegacyFontConverter::new(LegacyFont::Hisab, ConverterConfig::default()));

pub struct PreetiConverter;

impl PreetiConverter {
    pub fn convert(text: &str) -> String {
        PREETI_CONVERTER.convert(text)
    }
}

pub struct HisabConverter;

impl HisabConverter {
    pub fn convert(text: &str) -> String {
        HISAB_CONVERTER.convert(text)
    }
}
