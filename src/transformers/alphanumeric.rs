//! Removes everything that is not an ASCII letter, an ASCII digit or whitespace.
use lazy_static::lazy_static;
use regex::Regex;

use super::transform::{Transform, TransformError};

lazy_static! {
    static ref NON_ALPHANUMERIC: Regex = Regex::new(r"(?i)[^a-z0-9\s]").unwrap();
}

#[derive(Default)]
pub struct RemoveNonAlphanumeric;

impl Transform for RemoveNonAlphanumeric {
    fn name(&self) -> &'static str {
        "remove_non_alphanumeric"
    }

    fn transform(&self, text: &str) -> Result<String, TransformError> {
        Ok(NON_ALPHANUMERIC.replace_all(text, "").trim().to_string())
    }
}
