//! # Text Encoding
//!
//! Decoding of schema bytes read from disk and encoding of the patched text.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Supported text encodings for source and destination files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encoding {
    /// Plain UTF-8. A leading BOM is kept as part of the text.
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    /// UTF-8 with signature: a BOM is stripped on decode and written on encode.
    #[serde(rename = "utf-8-sig")]
    Utf8Sig,
}

impl Encoding {
    /// Decodes raw file bytes into text.
    pub fn decode(self, bytes: Vec<u8>) -> AppResult<String> {
        let bytes = match self {
            Encoding::Utf8 => bytes,
            Encoding::Utf8Sig => match bytes.strip_prefix(UTF8_BOM) {
                Some(rest) => rest.to_vec(),
                None => bytes,
            },
        };
        String::from_utf8(bytes).map_err(|e| {
            AppError::Encoding(format!(
                "invalid {} sequence at byte {}",
                self,
                e.utf8_error().valid_up_to()
            ))
        })
    }

    /// Encodes text for writing.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Encoding::Utf8 => text.as_bytes().to_vec(),
            Encoding::Utf8Sig => {
                let mut out = Vec::with_capacity(UTF8_BOM.len() + text.len());
                out.extend_from_slice(UTF8_BOM);
                out.extend_from_slice(text.as_bytes());
                out
            }
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Utf8 => write!(f, "utf-8"),
            Encoding::Utf8Sig => write!(f, "utf-8-sig"),
        }
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "utf-8-sig" | "utf8-sig" => Ok(Encoding::Utf8Sig),
            other => Err(format!(
                "unsupported encoding `{}` (expected utf-8 or utf-8-sig)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_invalid_utf8() {
        let res = Encoding::Utf8.decode(vec![b'a', 0xFF, b'b']);
        match res {
            Err(AppError::Encoding(msg)) => assert!(msg.contains("byte 1")),
            other => panic!("expected encoding error, got {:?}", other),
        }
    }

    #[test]
    fn test_sig_strips_and_restores_bom() {
        let raw = b"\xEF\xBB\xBFmodel A {}".to_vec();
        let text = Encoding::Utf8Sig.decode(raw.clone()).unwrap();
        assert_eq!(text, "model A {}");
        assert_eq!(Encoding::Utf8Sig.encode(&text), raw);
    }

    #[test]
    fn test_plain_utf8_keeps_bom() {
        let text = Encoding::Utf8.decode(b"\xEF\xBB\xBFx".to_vec()).unwrap();
        assert!(text.starts_with('\u{feff}'));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("UTF-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("utf_8_sig".parse::<Encoding>().unwrap(), Encoding::Utf8Sig);
        assert!("latin-1".parse::<Encoding>().is_err());
    }
}
