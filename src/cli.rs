//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

use seawiki::error::Error;
use seawiki::loader::Mode;
use seawiki::processing::dedup::DedupConfig;
use seawiki::transformers::{FieldTarget, NormalizationOptions};

#[derive(Debug, StructOpt)]
#[structopt(name = "seawiki", about = "Southeast Asia Wikipedia corpus tool.")]
/// Holds every command that is callable by the `seawiki` command.
pub enum SeaWiki {
    #[structopt(about = "Drop hard and soft duplicates of a raw split")]
    Dedup(Dedup),
    #[structopt(about = "Concatenate extraction batches into a single split")]
    Concat(Concat),
    #[structopt(about = "Token statistics of splits")]
    Stats(Stats),
    #[structopt(about = "Locate dataset files by language or country")]
    Locate(Locate),
}

/// Parse boolean flags the permissive way: `yes/true/t/y/1`, `no/false/f/n/0`,
/// case insensitive. Integral floats (`1.0`) are accepted too.
pub fn parse_bool(value: &str) -> Result<bool, Error> {
    let lowered = value.trim().to_lowercase();
    let normalized = match lowered.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 => format!("{}", f as i64),
        _ => lowered,
    };

    match normalized.as_str() {
        "yes" | "true" | "t" | "y" | "1" => Ok(true),
        "no" | "false" | "f" | "n" | "0" => Ok(false),
        _ => Err(Error::Config(format!(
            "invalid boolean value {:?}, expected one of yes/true/t/y/1 or no/false/f/n/0",
            value
        ))),
    }
}

#[derive(Debug, StructOpt)]
/// Dedup command and parameters.
///
/// Normalization options only alter the values used to detect soft duplicates,
/// unless `--overwrite-initial-title-data`/`--overwrite-initial-text-data` are set.
pub struct Dedup {
    #[structopt(parse(from_os_str), help = "raw split location (.csv or .csv.gz)")]
    pub raw_csv_path: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "save-dir-path",
        help = "destination folder",
        default_value = "."
    )]
    pub save_dir_path: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "audit-path",
        help = "write dropped records and reasons as json lines"
    )]
    pub audit_path: Option<PathBuf>,

    #[structopt(
        long = "drop-hard-dupl",
        help = "drop every record sharing an exact url, title or text",
        default_value = "true",
        parse(try_from_str = parse_bool)
    )]
    pub drop_hard_dupl: bool,
    #[structopt(
        long = "drop-soft-dupl",
        help = "drop records sharing a normalized title or text, keeping the longest",
        default_value = "true",
        parse(try_from_str = parse_bool)
    )]
    pub drop_soft_dupl: bool,
    #[structopt(
        long = "overwrite-initial-title-data",
        help = "replace titles with their normalized value",
        default_value = "false",
        parse(try_from_str = parse_bool)
    )]
    pub overwrite_initial_title_data: bool,
    #[structopt(
        long = "overwrite-initial-text-data",
        help = "replace texts with their normalized value",
        default_value = "false",
        parse(try_from_str = parse_bool)
    )]
    pub overwrite_initial_text_data: bool,

    #[structopt(
        long = "remove-non-alphanumeric-option",
        help = "fields to strip of non-alphanumeric characters (all, text, title, neither)",
        default_value = "neither"
    )]
    pub remove_non_alphanumeric_option: FieldTarget,
    #[structopt(
        long = "remove-excessive-whitespace-option",
        help = "fields to collapse whitespace of (all, text, title, neither)",
        default_value = "all"
    )]
    pub remove_excessive_whitespace_option: FieldTarget,
    #[structopt(
        long = "remove-html-tags-option",
        help = "fields to strip markup from (all, text, title, neither)",
        default_value = "all"
    )]
    pub remove_html_tags_option: FieldTarget,
    #[structopt(
        long = "decode-url-option",
        help = "fields to percent-decode (all, text, title, neither)",
        default_value = "all"
    )]
    pub decode_url_option: FieldTarget,
    #[structopt(
        long = "encoder-check-option",
        help = "fields to check against their encoding (all, text, title, neither)",
        default_value = "all"
    )]
    pub encoder_check_option: FieldTarget,
    #[structopt(
        long = "text-encoder-choice-title",
        help = "encoding titles are checked against",
        default_value = "utf8"
    )]
    pub text_encoder_choice_title: String,
    #[structopt(
        long = "text-encoder-choice-text",
        help = "encoding texts are checked against",
        default_value = "utf8"
    )]
    pub text_encoder_choice_text: String,
}

impl Dedup {
    pub fn config(&self) -> DedupConfig {
        DedupConfig {
            drop_hard_dupl: self.drop_hard_dupl,
            drop_soft_dupl: self.drop_soft_dupl,
            overwrite_initial_title_data: self.overwrite_initial_title_data,
            overwrite_initial_text_data: self.overwrite_initial_text_data,
            normalization: NormalizationOptions {
                remove_non_alphanumeric: self.remove_non_alphanumeric_option,
                remove_excessive_whitespace: self.remove_excessive_whitespace_option,
                remove_html_tags: self.remove_html_tags_option,
                decode_url: self.decode_url_option,
                encoder_check: self.encoder_check_option,
                title_encoding: self.text_encoder_choice_title.clone(),
                text_encoding: self.text_encoder_choice_text.clone(),
            },
        }
    }
}

#[derive(Debug, StructOpt)]
pub struct Concat {
    #[structopt(parse(from_os_str), help = "folder holding batch csv files")]
    pub load_dir_path: PathBuf,
    #[structopt(parse(from_os_str), help = "destination file")]
    pub dst: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct Stats {
    #[structopt(parse(from_os_str), required = true, help = "split files")]
    pub src: Vec<PathBuf>,
    #[structopt(parse(from_os_str), long = "csv", help = "also write statistics as csv")]
    pub csv: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
/// Locate command and parameters.
///
/// `--lang` takes precedence over `--country`.
pub struct Locate {
    #[structopt(long = "lang", help = "language code (e.g. id, map-bms)")]
    pub lang: Option<String>,
    #[structopt(long = "country", help = "alpha-3 country code (e.g. idn)")]
    pub country: Option<String>,
    #[structopt(long = "date", help = "dump date (YYYYMMDD). Default is the latest.")]
    pub date: Option<String>,
    #[structopt(long = "mode", default_value = "dedup", help = "dedup or raw")]
    pub mode: Mode,
    #[structopt(long = "all", help = "every language of the latest dump")]
    pub all: bool,
    #[structopt(long = "with-countries", help = "with --all, list languages per country")]
    pub with_countries: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bools() {
        for v in ["yes", "True", "t", "Y", "1", "1.0"] {
            assert!(parse_bool(v).unwrap(), "{}", v);
        }
        for v in ["no", "FALSE", "f", "n", "0", "0.0"] {
            assert!(!parse_bool(v).unwrap(), "{}", v);
        }
        for v in ["maybe", "2", "1.5", ""] {
            assert!(parse_bool(v).is_err(), "{}", v);
        }
    }

    #[test]
    fn dedup_defaults() {
        let opt = SeaWiki::from_iter(["seawiki", "dedup", "wiki_su_20231101_raw_dataset.csv"]);
        match opt {
            SeaWiki::Dedup(d) => assert_eq!(d.config(), DedupConfig::default()),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn dedup_flags() {
        let opt = SeaWiki::from_iter([
            "seawiki",
            "dedup",
            "raw.csv",
            "--drop-hard-dupl",
            "no",
            "--remove-non-alphanumeric-option",
            "title",
            "--text-encoder-choice-text",
            "ascii",
        ]);
        match opt {
            SeaWiki::Dedup(d) => {
                let c = d.config();
                assert!(!c.drop_hard_dupl);
                assert_eq!(c.normalization.remove_non_alphanumeric, FieldTarget::Title);
                assert_eq!(c.normalization.text_encoding, "ascii");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn invalid_field_target() {
        let res = SeaWiki::from_iter_safe([
            "seawiki",
            "dedup",
            "raw.csv",
            "--decode-url-option",
            "sometimes",
        ]);
        assert!(res.is_err());
    }
}
