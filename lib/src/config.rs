use serde::Deserialize;

use crate::error::{Error, ErrorKind, Result};

/// Default upper bound for any length-prefixed sequence.
pub const DEFAULT_MAX_SEQUENCE_LEN: usize = 1 << 20;

/// Decoder settings for one chain release.
///
/// All fields are optional in the JSON form and fall back to the defaults
/// below.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CodecConfig {
    /// Largest element count accepted from a compact length prefix.
    pub max_sequence_len: usize,

    /// Fail whole-value decodes that leave input unconsumed.
    pub reject_trailing_bytes: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            max_sequence_len: DEFAULT_MAX_SEQUENCE_LEN,
            reject_trailing_bytes: false,
        }
    }
}

impl CodecConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::new(ErrorKind::Json(e.to_string())))
    }

    pub fn strict() -> Self {
        CodecConfig {
            reject_trailing_bytes: true,
            ..CodecConfig::default()
        }
    }
}
