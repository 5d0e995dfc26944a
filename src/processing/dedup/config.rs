//! Deduplication configuration.
use serde::Serialize;

use crate::error::Error;
use crate::record::Column;
use crate::transformers::NormalizationOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DedupConfig {
    /// drop every record whose raw url, title or text is shared with another record.
    pub drop_hard_dupl: bool,
    /// keep only the longest raw value among records sharing a normalized title/text.
    pub drop_soft_dupl: bool,
    pub overwrite_initial_title_data: bool,
    pub overwrite_initial_text_data: bool,
    pub normalization: NormalizationOptions,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            drop_hard_dupl: true,
            drop_soft_dupl: true,
            overwrite_initial_title_data: false,
            overwrite_initial_text_data: false,
            normalization: NormalizationOptions::default(),
        }
    }
}

impl DedupConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !self.drop_hard_dupl && !self.drop_soft_dupl {
            return Err(Error::Config(
                "won't run with both hard and soft duplicate removal turned off".to_string(),
            ));
        }
        Ok(())
    }

    /// `true` if the normalized value should replace the stored one for `column`.
    pub fn overwrites(&self, column: Column) -> bool {
        match column {
            Column::Title => self.overwrite_initial_title_data,
            Column::Text => self.overwrite_initial_text_data,
            Column::Url => false,
        }
    }
}
