/*! Encoding validity check

Re-encodes text into a target encoding, dropping characters that cannot be represented.
This never fails: unrepresentable characters are silently ignored.
 !*/
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::transform::{Transform, TransformError};
use crate::error::Error;

/// Target encodings supported by [EncodingCheck].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    Utf8,
    Ascii,
    Latin1,
    Utf16,
    Utf32,
}

impl TextEncoding {
    /// `true` if `c` survives an encode/decode round trip.
    #[inline]
    pub fn represents(&self, c: char) -> bool {
        match self {
            // a rust char is a scalar value, which every UTF form can hold
            TextEncoding::Utf8 | TextEncoding::Utf16 | TextEncoding::Utf32 => true,
            TextEncoding::Ascii => c.is_ascii(),
            TextEncoding::Latin1 => (c as u32) < 0x100,
        }
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        TextEncoding::Utf8
    }
}

impl FromStr for TextEncoding {
    type Err = Error;

    /// Lookup is case insensitive and ignores `-`, `_` and spaces, so `UTF-8`, `utf_8` and `utf8` are equal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "utf8" | "u8" | "utf" => Ok(TextEncoding::Utf8),
            "ascii" | "usascii" | "646" => Ok(TextEncoding::Ascii),
            "latin1" | "latin" | "l1" | "iso88591" | "8859" | "cp819" => Ok(TextEncoding::Latin1),
            "utf16" | "u16" => Ok(TextEncoding::Utf16),
            "utf32" | "u32" => Ok(TextEncoding::Utf32),
            _ => Err(Error::Config(format!("unknown encoding: {}", s))),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextEncoding::Utf8 => "utf8",
            TextEncoding::Ascii => "ascii",
            TextEncoding::Latin1 => "latin1",
            TextEncoding::Utf16 => "utf16",
            TextEncoding::Utf32 => "utf32",
        };
        f.write_str(name)
    }
}

pub struct EncodingCheck {
    encoding: TextEncoding,
}

impl EncodingCheck {
    pub fn new(encoding: TextEncoding) -> Self {
        Self { encoding }
    }
}

impl Default for EncodingCheck {
    fn default() -> Self {
        Self::new(TextEncoding::default())
    }
}

impl Transform for EncodingCheck {
    fn name(&self) -> &'static str {
        "check_text_by_encoder"
    }

    fn transform(&self, text: &str) -> Result<String, TransformError> {
        let kept: String = text.chars().filter(|c| self.encoding.represents(*c)).collect();
        Ok(kept.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_lenient() {
        assert_eq!("UTF-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert_eq!("iso-8859-1".parse::<TextEncoding>().unwrap(), TextEncoding::Latin1);
        assert_eq!("Latin_1".parse::<TextEncoding>().unwrap(), TextEncoding::Latin1);
        assert!(matches!("klingon".parse::<TextEncoding>(), Err(Error::Config(_))));
    }

    #[test]
    fn utf8_keeps_everything() {
        let e = EncodingCheck::default();
        assert_eq!(e.transform("  Bahasa Việt ภาษาไทย ").unwrap(), "Bahasa Việt ภาษาไทย");
    }

    #[test]
    fn ascii_drops() {
        let e = EncodingCheck::new(TextEncoding::Ascii);
        assert_eq!(e.transform("Việt Nam").unwrap(), "Vit Nam");
    }

    #[test]
    fn latin1_drops() {
        let e = EncodingCheck::new(TextEncoding::Latin1);
        assert_eq!(e.transform("café ภา").unwrap(), "café");
    }
}
