//! Wikipedia article records.
//!
//! A [Record] is a flattened article as extracted from a Wikipedia dump split.
//! The tabular schema is fixed: `id`, `url`, `title`, `text`.
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Expected columns, in the order they are written out.
pub const EXPECTED_COLUMNS: [&str; 4] = ["id", "url", "title", "text"];

/// A single article.
///
/// `id` is unique inside an extraction batch but not across batches,
/// so deduplication never relies on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub text: String,
}

impl Record {
    pub fn new(id: i64, url: &str, title: &str, text: &str) -> Self {
        Self {
            id,
            url: url.to_string(),
            title: title.to_string(),
            text: text.to_string(),
        }
    }

    /// Get the textual value of a column.
    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::Url => &self.url,
            Column::Title => &self.title,
            Column::Text => &self.text,
        }
    }

    /// Replace the textual value of a column.
    pub fn set(&mut self, column: Column, value: String) {
        match column {
            Column::Url => self.url = value,
            Column::Title => self.title = value,
            Column::Text => self.text = value,
        }
    }
}

/// Textual columns that deduplication can key on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Url,
    Title,
    Text,
}

impl Column {
    pub fn name(&self) -> &'static str {
        match self {
            Column::Url => "url",
            Column::Title => "title",
            Column::Text => "text",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check that `columns` is exactly the expected column set (order does not matter).
pub fn validate_schema<S: AsRef<str>>(columns: &[S]) -> Result<(), Error> {
    let found: BTreeSet<&str> = columns.iter().map(AsRef::as_ref).collect();
    let expected: BTreeSet<&str> = EXPECTED_COLUMNS.iter().copied().collect();

    // a repeated column would collapse in the set, so compare lengths too
    if found != expected || columns.len() != EXPECTED_COLUMNS.len() {
        return Err(Error::Schema {
            expected: EXPECTED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            found: columns.iter().map(|c| c.as_ref().to_string()).collect(),
        });
    }
    Ok(())
}
