/*! Soft duplicates: identical values after normalization.

Records are grouped by normalized value and ranked by the character length of their raw value,
longest first. Ties share the best rank (`min` ranking), so every record whose raw length equals
the longest of its group survives.
!*/
use std::collections::HashMap;

use rayon::prelude::*;

use crate::error::Error;
use crate::record::{Column, Record};
use crate::transformers::Normalizer;

/// Result of checking one column over a set of rows.
///
/// Every vector is indexed by position in the checked rows, not by record index.
#[derive(Debug)]
pub struct ColumnCheck {
    pub survives: Vec<bool>,
    pub raw_len: Vec<usize>,
    /// longest raw length of the group each row belongs to.
    pub kept_len: Vec<usize>,
    pub cleansed: Vec<String>,
}

impl ColumnCheck {
    pub fn nb_survivors(&self) -> usize {
        self.survives.iter().filter(|s| **s).count()
    }

    /// Records strictly shorter than the longest of their group.
    pub fn nb_dropped(&self) -> usize {
        self.raw_len
            .iter()
            .zip(self.kept_len.iter())
            .filter(|(len, kept)| len < kept)
            .count()
    }
}

/// Normalize `column` for `rows` and rank records inside each normalized group.
pub fn check_column(
    records: &[Record],
    rows: &[usize],
    column: Column,
    normalizer: &Normalizer,
) -> Result<ColumnCheck, Error> {
    // per-record work is independent, collecting keeps row order
    let normalized: Vec<(usize, String)> = rows
        .par_iter()
        .map(|&idx| {
            let value = records[idx].get(column);
            normalizer
                .normalize(value)
                .map(|cleansed| (value.chars().count(), cleansed))
        })
        .collect::<Result<_, Error>>()?;

    let (raw_len, cleansed): (Vec<usize>, Vec<String>) = normalized.into_iter().unzip();

    let mut longest: HashMap<&str, usize> = HashMap::with_capacity(cleansed.len());
    for (key, len) in cleansed.iter().zip(raw_len.iter()) {
        let entry = longest.entry(key.as_str()).or_insert(0);
        if *len > *entry {
            *entry = *len;
        }
    }

    let kept_len: Vec<usize> = cleansed.iter().map(|key| longest[key.as_str()]).collect();
    let survives: Vec<bool> = raw_len
        .iter()
        .zip(kept_len.iter())
        .map(|(len, kept)| len == kept)
        .collect();

    let check = ColumnCheck {
        survives,
        raw_len,
        kept_len,
        cleansed,
    };

    if check.nb_survivors() + check.nb_dropped() != rows.len() {
        return Err(Error::Consistency(format!(
            "[{}] {} survivors and {} duplicates for {} records",
            column,
            check.nb_survivors(),
            check.nb_dropped(),
            rows.len()
        )));
    }

    Ok(check)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformers::{build_normalizers, FieldTarget, NormalizationOptions};

    fn title_normalizer() -> Normalizer {
        let (_, title) = build_normalizers(&NormalizationOptions {
            remove_excessive_whitespace: FieldTarget::All,
            ..NormalizationOptions::disabled()
        })
        .unwrap();
        title
    }

    #[test]
    fn longest_survives() {
        let records = vec![
            Record::new(0, "a", "Hello World", ""),
            Record::new(1, "b", "hello  world", ""),
        ];
        let check = check_column(&records, &[0, 1], Column::Title, &title_normalizer()).unwrap();
        assert_eq!(check.survives, vec![false, true]);
        assert_eq!(check.raw_len, vec![11, 12]);
        assert_eq!(check.kept_len, vec![12, 12]);
        assert_eq!(check.cleansed, vec!["hello world", "hello world"]);
    }

    #[test]
    fn ties_all_survive() {
        let records = vec![
            Record::new(0, "a", "Foo Bar", ""),
            Record::new(1, "b", "foo bar", ""),
            Record::new(2, "c", "FOO", ""),
            Record::new(3, "d", "foo  bar", ""),
        ];
        let check =
            check_column(&records, &[0, 1, 2, 3], Column::Title, &title_normalizer()).unwrap();
        assert_eq!(check.survives, vec![false, false, true, true]);
        assert_eq!(check.nb_dropped(), 2);
    }

    #[test]
    fn equal_length_tie() {
        let records = vec![
            Record::new(0, "a", "Foo", ""),
            Record::new(1, "b", "fOO", ""),
        ];
        let check = check_column(&records, &[0, 1], Column::Title, &title_normalizer()).unwrap();
        assert_eq!(check.survives, vec![true, true]);
    }

    #[test]
    fn length_counts_chars() {
        // both raw values are 4 bytes long, but the first one only has 3 chars
        let records = vec![Record::new(0, "a", "", "é-a"), Record::new(1, "b", "", "a!!!")];
        let (text, _) = build_normalizers(&NormalizationOptions {
            remove_non_alphanumeric: FieldTarget::Text,
            ..NormalizationOptions::disabled()
        })
        .unwrap();
        let check = check_column(&records, &[0, 1], Column::Text, &text).unwrap();
        assert_eq!(check.cleansed, vec!["a", "a"]);
        assert_eq!(check.raw_len, vec![3, 4]);
        assert_eq!(check.survives, vec![false, true]);
    }
}
