//! Languages and countries covered by the corpus.
//!
//! Countries are identified by ISO 3166 alpha-3 codes,
//! languages by their Wikipedia subdomain (mostly ISO 639 codes).
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {

    /// Spoken languages with a Wikipedia, per Southeast Asian country.
    pub static ref COUNTRY_TO_LANG: BTreeMap<&'static str, Vec<&'static str>> = {
        let mut m = BTreeMap::new();
        m.insert("brn", vec!["ms"]);
        m.insert(
            "idn",
            vec![
                "ace", "ban", "bjn", "bug", "gor", "id", "jv", "mad", "map-bms", "min", "ms",
                "nia", "su", "tet",
            ],
        );
        m.insert("khm", vec!["km"]);
        m.insert("lao", vec!["lo"]);
        m.insert("mmr", vec!["my", "shn", "mnw"]);
        m.insert("mys", vec!["ms", "ta"]);
        m.insert(
            "phl",
            vec!["war", "tl", "ilo", "bcl", "pam", "cbk-zam", "pag", "ceb"],
        );
        m.insert("sgp", vec!["ms", "ta"]);
        m.insert("tha", vec!["th", "mnw", "shn"]);
        m.insert("tls", vec!["tet"]);
        m.insert("vnm", vec!["vi"]);
        m
    };

    /// Every language of [COUNTRY_TO_LANG], deduplicated and sorted.
    pub static ref LANG: BTreeSet<&'static str> = COUNTRY_TO_LANG
        .values()
        .flat_map(|langs| langs.iter().copied())
        .collect();

    static ref DATE_SEGMENT: Regex = Regex::new(r"\d{8}").unwrap();
    static ref NON_SPLIT_CHAR: Regex = Regex::new(r"[^\w\.]").unwrap();
}

/// Wikipedia dump dates available in the dataset repository.
pub const AVAILABLE_DUMP_DATES: [&str; 1] = ["20231101"];

pub fn latest_dump_date() -> &'static str {
    AVAILABLE_DUMP_DATES
        .iter()
        .copied()
        .max()
        .unwrap_or(AVAILABLE_DUMP_DATES[0])
}

pub fn available_languages() -> Vec<&'static str> {
    LANG.iter().copied().collect()
}

pub fn is_available_language(lang: &str) -> bool {
    LANG.contains(lang)
}

/// Make a language code usable as a split name (`map-bms` -> `map_bms`).
pub fn split_name(lang: &str) -> String {
    NON_SPLIT_CHAR.replace_all(lang, "_").into_owned()
}

/// Extract the split name from a data file name such as `wiki_map-bms_20231101_raw_dataset.csv`.
///
/// The language is what lies between `wiki_` and the first segment holding an 8-digit date.
pub fn lang_from_path(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_string_lossy();
    let segments: Vec<&str> = file_name.split('_').collect();
    let date_pos = segments.iter().position(|s| DATE_SEGMENT.is_match(s))?;
    if date_pos < 2 {
        return None;
    }
    Some(split_name(&segments[1..date_pos].join("_")))
}
