//! Source/target selection over the two legacy fonts and Unicode.
//!
//! | source | target  | conversion                          |
//! |--------|---------|-------------------------------------|
//! | preeti | unicode | [`PreetiConverter`]                 |
//! | hisab  | unicode | [`HisabConverter`]                  |
//! | preeti | hisab   | [`LegacySwapConverter::preeti_to_hisab`] |
//! | hisab  | preeti  | [`LegacySwapConverter::hisab_to_preeti`] |
//! | x      | x       | identity                            |

use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::converter::{ConverterConfig, HisabConverter, LegacyFontConverter, PreetiConverter};
use crate::error::ConvertError;
use crate::glyph_table::LegacyFont;
use crate::swap::LegacySwapConverter;
use crate::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFont {
    Preeti,
    Hisab,
    Unicode,
}

impl From<LegacyFont> for TargetFont {
    fn from(font: LegacyFont) -> Self {
        match font {
            LegacyFont::Preeti => TargetFont::Preeti,
            LegacyFont::Hisab => TargetFont::Hisab,
        }
    }
}

impl FromStr for LegacyFont {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preeti" => Ok(LegacyFont::Preeti),
            "hisab" => Ok(LegacyFont::Hisab),
            _ => Err(ConvertError::UnknownSourceFont(s.to_string())),
        }
    }
}

impl FromStr for TargetFont {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preeti" => Ok(TargetFont::Preeti),
            "hisab" => Ok(TargetFont::Hisab),
            "unicode" => Ok(TargetFont::Unicode),
            _ => Err(ConvertError::UnknownTargetFont(s.to_string())),
        }
    }
}

impl fmt::Display for LegacyFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for TargetFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TargetFont::Preeti => "preeti",
            TargetFont::Hisab => "hisab",
            TargetFont::Unicode => "unicode",
        })
    }
}

enum Route {
    Identity,
    Swap(fn(&str) -> String),
    Unicode(LegacyFontConverter),
}

/// A resolved (source, target) pair plus the options it runs with.
pub struct Conversion {
    source: LegacyFont,
    target: TargetFont,
    route: Route,
    strip_tags: bool,
}

impl Conversion {
    pub fn new(source: LegacyFont, target: TargetFont) -> Self {
        Self::with_config(source, target, ConverterConfig::default())
    }

    pub fn with_config(source: LegacyFont, target: TargetFont, config: ConverterConfig) -> Self {
        let route = match (source, target) {
            (LegacyFont::Preeti, TargetFont::Preeti) | (LegacyFont::Hisab, TargetFont::Hisab) => Route::Identity,
            (LegacyFont::Preeti, TargetFont::Hisab) => Route::Swap(LegacySwapConverter::preeti_to_hisab),
            (LegacyFont::Hisab, TargetFont::Preeti) => Route::Swap(LegacySwapConverter::hisab_to_preeti),
            (_, TargetFont::Unicode) => Route::Unicode(LegacyFontConverter::new(source, config)),
        };
        Conversion { source, target, route, strip_tags: false }
    }

    /// Remove HTML tags from the input before converting, as a web form
    /// handler would.
    pub fn strip_tags(mut self, strip: bool) -> Self {
        self.strip_tags = strip;
        self
    }

    pub fn source(&self) -> LegacyFont {
        self.source
    }

    pub fn target(&self) -> TargetFont {
        self.target
    }

    pub fn convert(&self, text: &str) -> String {
        let text = if self.strip_tags { utils::strip_tags(text) } else { text.into() };

        match &self.route {
            Route::Identity => text.into_owned(),
            Route::Swap(swap) => swap(&text),
            Route::Unicode(converter) => {
                if utils::devanagari_ratio(&text) > 0.5 {
                    warn!("input to {} converter already looks like Unicode", self.source);
                }
                converter.convert(&text)
            }
        }
    }
}

/// Converts with default settings.
pub fn convert(text: &str, source: LegacyFont, target: TargetFont) -> String {
    match (source, target) {
        (LegacyFont::Preeti, TargetFont::Unicode) => PreetiConverter::convert(text),
        (LegacyFont::Hisab, TargetFont::Unicode) => HisabConverter::convert(text),
        _ => Conversion::new(source, target).convert(text),
    }
}
