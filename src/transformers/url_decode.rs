//! Percent-decoding of URL-escaped sequences.
//!
//! Invalid escapes are kept verbatim and invalid UTF-8 is replaced, so this never fails.
use percent_encoding::percent_decode_str;

use super::transform::{Transform, TransformError};

#[derive(Default)]
pub struct DecodeUrl;

impl Transform for DecodeUrl {
    fn name(&self) -> &'static str {
        "decode_url"
    }

    fn transform(&self, text: &str) -> Result<String, TransformError> {
        Ok(percent_decode_str(text).decode_utf8_lossy().trim().to_string())
    }
}
