pub mod converter;
pub mod dispatch;
pub mod emitter;
pub mod error;
pub mod glyph_table;
pub mod normalization;
pub mod reorder;
pub mod segmenter;
pub mod swap;
pub mod utils;

pub use converter::{ConverterConfig, HisabConverter, LegacyFontConverter, PreetiConverter};
pub use dispatch::{convert, Conversion, TargetFont};
pub use error::ConvertError;
pub use glyph_table::{GlyphRole, GlyphTable, LegacyFont};
pub use swap::LegacySwapConverter;
