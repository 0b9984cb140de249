//! # Line Endings
//!
//! Normalisation of `\r\n`, `\r` and `\n` terminators to a single style.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target line-ending style for written files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

/// Line-ending style observed in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detected {
    /// No terminators at all.
    None,
    /// Every terminator uses this style.
    Uniform(LineEnding),
    /// Several styles (including bare `\r`) are present.
    Mixed,
}

impl LineEnding {
    /// The terminator string.
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Rewrites every terminator in `text` to this style.
    pub fn normalize(self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for (idx, line) in split_lines(text).into_iter().enumerate() {
            if idx > 0 {
                out.push_str(self.as_str());
            }
            out.push_str(line);
        }
        out
    }

    /// Reports which style(s) `text` uses.
    pub fn detect(text: &str) -> Detected {
        let (mut lf, mut crlf, mut cr) = (0usize, 0usize, 0usize);
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    crlf += 1;
                    i += 1;
                }
                b'\r' => cr += 1,
                b'\n' => lf += 1,
                _ => {}
            }
            i += 1;
        }
        match (lf, crlf, cr) {
            (0, 0, 0) => Detected::None,
            (_, 0, 0) => Detected::Uniform(LineEnding::Lf),
            (0, _, 0) => Detected::Uniform(LineEnding::CrLf),
            _ => Detected::Mixed,
        }
    }
}

/// Splits on any terminator. A trailing terminator yields a final empty
/// segment, so joining the segments with one style round-trips the text.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    lines.push(&text[start..]);
    lines
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineEnding::Lf => write!(f, "lf"),
            LineEnding::CrLf => write!(f, "crlf"),
        }
    }
}

impl FromStr for LineEnding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lf" | "unix" => Ok(LineEnding::Lf),
            "crlf" | "windows" => Ok(LineEnding::CrLf),
            other => Err(format!(
                "unknown line ending `{}` (expected lf or crlf)",
                other
            )),
        }
    }
}
