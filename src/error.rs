//! Errors raised at the conversion boundary.
//!
//! Conversion itself never fails; these cover selecting fonts by name and
//! loading a converter configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// Only the two legacy fonts can be converted from.
    #[error("unknown source font '{0}': expected preeti or hisab")]
    UnknownSourceFont(String),

    #[error("unknown target font '{0}': expected unicode, preeti or hisab")]
    UnknownTargetFont(String),

    #[error("invalid converter config: {0}")]
    Config(#[from] serde_json::Error),
}
