/*! Normalization pipelines

A [Normalizer] is an ordered list of [Guarded] steps, applied left to right.
Steps are always added in the same order (disabled ones are simply absent):

1. encoding validity check ([EncodingCheck])
1. non-alphanumeric removal ([RemoveNonAlphanumeric])
1. excessive whitespace collapsing ([CollapseWhitespace])
1. markup stripping ([StripHtmlTags])
1. URL decoding ([DecodeUrl])

Title normalizers lowercase their input before the first step.
!*/
use std::fmt;
use std::str::FromStr;

use log::info;
use serde::Serialize;

use super::{
    CollapseWhitespace, DecodeUrl, EncodingCheck, FailureKind, Guarded, RemoveNonAlphanumeric,
    StripHtmlTags, TextEncoding, Transform,
};
use crate::error::Error;

/// Which field group(s) a normalization step applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldTarget {
    All,
    Text,
    Title,
    Neither,
}

impl FieldTarget {
    /// Decode into `(text, title)` booleans.
    pub fn decode(&self) -> (bool, bool) {
        match self {
            FieldTarget::All => (true, true),
            FieldTarget::Text => (true, false),
            FieldTarget::Title => (false, true),
            FieldTarget::Neither => (false, false),
        }
    }
}

impl FromStr for FieldTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(FieldTarget::All),
            "text" => Ok(FieldTarget::Text),
            "title" => Ok(FieldTarget::Title),
            "neither" => Ok(FieldTarget::Neither),
            _ => Err(Error::Config(format!(
                "invalid field target {:?}, expected one of all, text, title, neither",
                s
            ))),
        }
    }
}

impl fmt::Display for FieldTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldTarget::All => "all",
            FieldTarget::Text => "text",
            FieldTarget::Title => "title",
            FieldTarget::Neither => "neither",
        };
        f.write_str(s)
    }
}

/// Field processing policy, as provided by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizationOptions {
    pub remove_non_alphanumeric: FieldTarget,
    pub remove_excessive_whitespace: FieldTarget,
    pub remove_html_tags: FieldTarget,
    pub decode_url: FieldTarget,
    pub encoder_check: FieldTarget,
    pub title_encoding: String,
    pub text_encoding: String,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            remove_non_alphanumeric: FieldTarget::Neither,
            remove_excessive_whitespace: FieldTarget::All,
            remove_html_tags: FieldTarget::All,
            decode_url: FieldTarget::All,
            encoder_check: FieldTarget::All,
            title_encoding: "utf8".to_string(),
            text_encoding: "utf8".to_string(),
        }
    }
}

impl NormalizationOptions {
    /// Options with every step disabled.
    pub fn disabled() -> Self {
        Self {
            remove_non_alphanumeric: FieldTarget::Neither,
            remove_excessive_whitespace: FieldTarget::Neither,
            remove_html_tags: FieldTarget::Neither,
            decode_url: FieldTarget::Neither,
            encoder_check: FieldTarget::Neither,
            ..Default::default()
        }
    }

    /// Resolve into per-field toggles, `(text, title)`.
    pub fn split(&self) -> Result<(StepToggles, StepToggles), Error> {
        let (text_alnum, title_alnum) = self.remove_non_alphanumeric.decode();
        let (text_ws, title_ws) = self.remove_excessive_whitespace.decode();
        let (text_html, title_html) = self.remove_html_tags.decode();
        let (text_url, title_url) = self.decode_url.decode();
        let (text_enc, title_enc) = self.encoder_check.decode();

        let text = StepToggles {
            encoder_check: text_enc,
            remove_non_alphanumeric: text_alnum,
            remove_excessive_whitespace: text_ws,
            remove_html_tags: text_html,
            decode_url: text_url,
            encoding: self.text_encoding.parse()?,
        };
        let title = StepToggles {
            encoder_check: title_enc,
            remove_non_alphanumeric: title_alnum,
            remove_excessive_whitespace: title_ws,
            remove_html_tags: title_html,
            decode_url: title_url,
            encoding: self.title_encoding.parse()?,
        };
        Ok((text, title))
    }
}

/// Resolved toggles for a single field group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepToggles {
    pub encoder_check: bool,
    pub remove_non_alphanumeric: bool,
    pub remove_excessive_whitespace: bool,
    pub remove_html_tags: bool,
    pub decode_url: bool,
    pub encoding: TextEncoding,
}

/// Composed normalization function for one field group.
pub struct Normalizer {
    steps: Vec<Guarded>,
    lowercase: bool,
}

impl Normalizer {
    /// A normalizer without any step.
    pub fn identity(lowercase: bool) -> Self {
        Self {
            steps: Vec::new(),
            lowercase,
        }
    }

    /// Build from resolved toggles, adding enabled steps in the fixed order.
    pub fn from_toggles(toggles: &StepToggles, lowercase: bool) -> Self {
        let mut n = Self::identity(lowercase);
        if toggles.encoder_check {
            n.add(Guarded::lenient(Box::new(EncodingCheck::new(
                toggles.encoding,
            ))));
        }
        if toggles.remove_non_alphanumeric {
            n.add(Guarded::lenient(Box::new(RemoveNonAlphanumeric)));
        }
        if toggles.remove_excessive_whitespace {
            n.add(Guarded::lenient(Box::new(CollapseWhitespace)));
        }
        if toggles.remove_html_tags {
            n.add(Guarded::new(
                Box::new(StripHtmlTags),
                vec![FailureKind::Parse],
            ));
        }
        if toggles.decode_url {
            n.add(Guarded::lenient(Box::new(DecodeUrl)));
        }
        n
    }

    /// Append a step. It will run after every step already present.
    pub fn add(&mut self, step: Guarded) -> &mut Normalizer {
        self.steps.push(step);
        self
    }

    /// Append any transform with its allow-list.
    pub fn add_transform(
        &mut self,
        step: Box<dyn Transform + Send + Sync>,
        recoverable: Vec<FailureKind>,
    ) -> &mut Normalizer {
        self.add(Guarded::new(step, recoverable))
    }

    /// Names of the steps, in application order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(Guarded::name).collect()
    }

    pub fn lowercases(&self) -> bool {
        self.lowercase
    }

    /// Recovered failures per step, in application order.
    pub fn fallbacks(&self) -> Vec<(&'static str, usize)> {
        self.steps.iter().map(|s| (s.name(), s.fallbacks())).collect()
    }

    pub fn normalize(&self, text: &str) -> Result<String, Error> {
        let mut out = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        for step in &self.steps {
            out = step.apply(&out)?;
        }
        Ok(out)
    }

    /// Log how many times each step fell back to its input.
    pub fn log_fallbacks(&self, field: &str) {
        for (step, count) in self.fallbacks() {
            if count > 0 {
                info!(
                    "[{}] {} kept its input on {} record(s) after a recovered failure",
                    field, step, count
                );
            }
        }
    }
}

/// Build `(text, title)` normalizers from the field processing policy.
pub fn build_normalizers(options: &NormalizationOptions) -> Result<(Normalizer, Normalizer), Error> {
    let (text, title) = options.split()?;
    Ok((
        Normalizer::from_toggles(&text, false),
        Normalizer::from_toggles(&title, true),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_target_parse() {
        assert_eq!("title".parse::<FieldTarget>().unwrap(), FieldTarget::Title);
        assert!(matches!(
            "both".parse::<FieldTarget>(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn field_target_decode() {
        assert_eq!(FieldTarget::All.decode(), (true, true));
        assert_eq!(FieldTarget::Text.decode(), (true, false));
        assert_eq!(FieldTarget::Title.decode(), (false, true));
        assert_eq!(FieldTarget::Neither.decode(), (false, false));
    }

    #[test]
    fn fixed_order() {
        let (text, title) = build_normalizers(&NormalizationOptions {
            remove_non_alphanumeric: FieldTarget::Title,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            text.step_names(),
            vec![
                "check_text_by_encoder",
                "remove_excessive_whitespace",
                "remove_html_tags",
                "decode_url"
            ]
        );
        assert_eq!(
            title.step_names(),
            vec![
                "check_text_by_encoder",
                "remove_non_alphanumeric",
                "remove_excessive_whitespace",
                "remove_html_tags",
                "decode_url"
            ]
        );
        assert!(title.lowercases());
        assert!(!text.lowercases());
    }

    #[test]
    fn unknown_encoding_is_config_error() {
        let opts = NormalizationOptions {
            text_encoding: "ebcdic-martian".to_string(),
            ..Default::default()
        };
        assert!(matches!(build_normalizers(&opts), Err(Error::Config(_))));
    }

    #[test]
    fn disabled_is_identity() {
        let (text, title) = build_normalizers(&NormalizationOptions::disabled()).unwrap();
        for x in ["  Foo  <b>bar</b>%20 ", "", "ÀÉÎ\n\n", "<b>hello"] {
            assert_eq!(text.normalize(x).unwrap(), x);
            assert_eq!(title.normalize(x).unwrap(), x.to_lowercase());
        }
    }

    #[test_log::test]
    fn malformed_markup_kept() {
        let (text, _) = build_normalizers(&NormalizationOptions {
            remove_html_tags: FieldTarget::Text,
            ..NormalizationOptions::disabled()
        })
        .unwrap();
        assert_eq!(text.normalize("<b>hello").unwrap(), "<b>hello");
        assert_eq!(text.fallbacks(), vec![("remove_html_tags", 1)]);
    }

    #[test]
    fn html_after_whitespace() {
        let (text, _) = build_normalizers(&NormalizationOptions::default()).unwrap();
        assert_eq!(
            text.normalize("<p>\n  Kota   <b>Bandung</b>%2C Jawa</p>").unwrap(),
            "Kota Bandung, Jawa"
        );
    }

    #[test]
    fn idempotent_html_and_whitespace() {
        let (text, _) = build_normalizers(&NormalizationOptions {
            remove_excessive_whitespace: FieldTarget::All,
            remove_html_tags: FieldTarget::All,
            ..NormalizationOptions::disabled()
        })
        .unwrap();
        for x in [
            "<p>Hello   <i>there</i>\n\n</p>",
            "plain   text\t\there",
            "<b>unclosed   bold",
        ] {
            let once = text.normalize(x).unwrap();
            let twice = text.normalize(&once).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn title_lowercased_before_steps() {
        let (_, title) = build_normalizers(&NormalizationOptions {
            remove_excessive_whitespace: FieldTarget::Title,
            ..NormalizationOptions::disabled()
        })
        .unwrap();
        assert_eq!(title.normalize("hello  World").unwrap(), "hello world");
        assert_eq!(title.normalize("Hello World").unwrap(), "hello world");
    }
}
