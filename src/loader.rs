/*! Dataset file locations

Resolves which data files make up a dataset selection (a language, a country or everything),
for a dump date and a processing [Mode].

Locations are relative to the dataset repository, and also given as absolute URLs.
!*/
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use url::Url;

use crate::error::Error;
use crate::lang::{self, COUNTRY_TO_LANG};

pub const REPO_URL: &str = "https://huggingface.co/datasets/sabilmakbar/sea_wiki/resolve/main/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Dedup,
    Raw,
}

impl Mode {
    fn folder(&self) -> &'static str {
        match self {
            Mode::Dedup => "sea_wiki_dedup_data",
            Mode::Raw => "sea_wiki_raw_data",
        }
    }

    fn file_suffix(&self) -> &'static str {
        match self {
            Mode::Dedup => "dataset_dedup_cleansed.csv",
            Mode::Raw => "raw_dataset.csv",
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dedup" => Ok(Mode::Dedup),
            "raw" => Ok(Mode::Raw),
            _ => Err(Error::Config(format!(
                "expected 'dedup' or 'raw' for mode, received {}",
                s
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Dedup => f.write_str("dedup"),
            Mode::Raw => f.write_str("raw"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Lang(String),
    Country(String),
}

/// A single data file of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub split: String,
    pub lang: String,
    pub path: String,
    pub url: String,
}

impl Location {
    fn new(split: String, lang: &str, date: &str, mode: Mode) -> Result<Self, Error> {
        let path = relative_path(lang, date, mode);
        let url = Url::parse(REPO_URL)?.join(&path)?.to_string();
        Ok(Self {
            split,
            lang: lang.to_string(),
            path,
            url,
        })
    }
}

/// `sea_wiki_dedup_data/wiki_id_20231101_dataset_dedup_cleansed.csv`
pub fn relative_path(lang: &str, date: &str, mode: Mode) -> String {
    format!(
        "{}/wiki_{}_{}_{}",
        mode.folder(),
        lang,
        date,
        mode.file_suffix()
    )
}

fn check_date(date: &str) -> Result<(), Error> {
    if !lang::AVAILABLE_DUMP_DATES.contains(&date) {
        return Err(Error::Config(format!(
            "dump date {} is not available (available: {})",
            date,
            lang::AVAILABLE_DUMP_DATES.join(", ")
        )));
    }
    Ok(())
}

/// Locate the files of a language or of every language spoken in a country.
pub fn locate(selection: &Selection, date: &str, mode: Mode) -> Result<Vec<Location>, Error> {
    check_date(date)?;
    match selection {
        Selection::Lang(code) => {
            if !lang::is_available_language(code) {
                return Err(Error::Config(format!("language {} is not available", code)));
            }
            Ok(vec![Location::new(lang::split_name(code), code, date, mode)?])
        }
        Selection::Country(code) => {
            let langs = COUNTRY_TO_LANG
                .get(code.as_str())
                .ok_or_else(|| Error::Config(format!("country {} is not available", code)))?;
            langs
                .iter()
                .map(|l| Location::new(lang::split_name(l), l, date, mode))
                .collect()
        }
    }
}

/// Locate every file of the latest dump.
///
/// With `with_countries`, languages are listed once per country speaking them,
/// and split names are prefixed by the country code.
pub fn all(mode: Mode, with_countries: bool) -> Result<Vec<Location>, Error> {
    let date = lang::latest_dump_date();
    if with_countries {
        let mut locations = Vec::new();
        for (country, langs) in COUNTRY_TO_LANG.iter() {
            for l in langs {
                let split = format!("{}_{}", country, lang::split_name(l));
                locations.push(Location::new(split, l, date, mode)?);
            }
        }
        Ok(locations)
    } else {
        lang::available_languages()
            .into_iter()
            .map(|l| Location::new(lang::split_name(l), l, date, mode))
            .collect()
    }
}
