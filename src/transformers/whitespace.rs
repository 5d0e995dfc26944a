//! Collapses runs of whitespace.
//!
//! A run of two or more whitespace characters is replaced by its first character,
//! so `"a \n\n b"` becomes `"a b"` and `"a\n  b"` becomes `"a\nb"`.
use lazy_static::lazy_static;
use regex::Regex;

use super::transform::{Transform, TransformError};

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"(\s)\s+").unwrap();
}

#[derive(Default)]
pub struct CollapseWhitespace;

impl Transform for CollapseWhitespace {
    fn name(&self) -> &'static str {
        "remove_excessive_whitespace"
    }

    fn transform(&self, text: &str) -> Result<String, TransformError> {
        Ok(WHITESPACE_RUN.replace_all(text, "$1").trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_of_run() {
        let w = CollapseWhitespace;
        assert_eq!(w.transform("a \n\n b").unwrap(), "a b");
        assert_eq!(w.transform("a\n  b").unwrap(), "a\nb");
    }

    #[test]
    fn trims() {
        let w = CollapseWhitespace;
        assert_eq!(w.transform("  hello  world \t").unwrap(), "hello world");
    }

    #[test]
    fn idempotent() {
        let w = CollapseWhitespace;
        let once = w.transform(" lorem \t\t ipsum\n\n\ndolor  ").unwrap();
        let twice = w.transform(&once).unwrap();
        assert_eq!(once, twice);
    }
}
