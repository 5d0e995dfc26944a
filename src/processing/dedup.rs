/*! Deduplication

Removes duplicated articles from a flattened Wikipedia split.

Two passes are available, at least one of them has to be enabled:

1. **hard** duplicates: records sharing the exact same `url`, `title` or `text` are considered
   template or copied content, and every one of them is dropped.
1. **soft** duplicates: records sharing the same *normalized* `title` (resp. `text`) are grouped,
   and only the ones with the longest raw value are kept.

The soft pass runs on what the hard pass kept. Each soft column is checked against the same row set
and a record is retained only if it survives both checks.
!*/
mod config;
mod hard;
mod report;
mod soft;

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

pub use config::DedupConfig;
pub use report::{ColumnSummary, DedupReport, DropReason, DroppedRecord, Pass};

use crate::error::Error;
use crate::io;
use crate::record::{Column, Record};
use crate::transformers::{build_normalizers, Normalizer};

/// Columns checked by the hard pass, in order.
pub const HARD_COLUMNS: [Column; 3] = [Column::Url, Column::Title, Column::Text];
/// Columns checked by the soft pass, in order. Urls carry no normalizable signal.
pub const SOFT_COLUMNS: [Column; 2] = [Column::Title, Column::Text];

/// Outcome of a deduplication run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// positions of retained records in the input, ascending.
    pub kept: Vec<usize>,
    /// retained records in input order, possibly with overwritten fields.
    pub records: Vec<Record>,
    pub report: DedupReport,
}

pub struct Resolver {
    config: DedupConfig,
    text: Normalizer,
    title: Normalizer,
}

impl Resolver {
    pub fn new(config: DedupConfig) -> Result<Self, Error> {
        config.validate()?;
        let (text, title) = build_normalizers(&config.normalization)?;
        Self::with_normalizers(config, text, title)
    }

    /// Use custom normalizers instead of the ones described by `config.normalization`.
    pub fn with_normalizers(
        config: DedupConfig,
        text: Normalizer,
        title: Normalizer,
    ) -> Result<Self, Error> {
        config.validate()?;
        if !config.drop_hard_dupl {
            warn!("hard duplicate removal is off: template articles without contribution text may remain");
        }
        debug!("dedup config: {}", serde_json::to_string(&config)?);
        debug!("text steps: {:?}", text.step_names());
        debug!("title steps: {:?}", title.step_names());
        Ok(Self {
            config,
            text,
            title,
        })
    }

    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    fn normalizer(&self, column: Column) -> &Normalizer {
        match column {
            Column::Title => &self.title,
            _ => &self.text,
        }
    }

    pub fn resolve(&self, mut records: Vec<Record>) -> Result<Resolution, Error> {
        let mut report = DedupReport::new(records.len());
        let mut rows: Vec<usize> = (0..records.len()).collect();

        if self.config.drop_hard_dupl {
            for column in HARD_COLUMNS {
                hard::drop_shared_values(&records, &mut rows, column, &mut report);
            }

            // ids come from extraction and should already be unique
            if hard::has_duplicate_ids(&records, &rows) {
                hard::reassign_ids(&mut records, &rows);
                report.ids_reassigned = true;
            }
        }

        if self.config.drop_soft_dupl {
            rows = self.drop_soft_duplicates(&mut records, rows, &mut report)?;
        }

        info!("keeping {} records out of {}", rows.len(), records.len());
        if rows.is_empty() {
            warn!("no record left after deduplication");
        }
        report.kept = rows.len();

        let mut retained = vec![false; records.len()];
        for &idx in &rows {
            retained[idx] = true;
        }
        let records = records
            .into_iter()
            .zip(retained)
            .filter_map(|(record, keep)| keep.then_some(record))
            .collect();

        Ok(Resolution {
            kept: rows,
            records,
            report,
        })
    }

    fn drop_soft_duplicates(
        &self,
        records: &mut [Record],
        rows: Vec<usize>,
        report: &mut DedupReport,
    ) -> Result<Vec<usize>, Error> {
        let mut keep = vec![true; rows.len()];

        for column in SOFT_COLUMNS {
            info!("[{}] checking soft duplicates", column);
            let normalizer = self.normalizer(column);
            let check = soft::check_column(records, &rows, column, normalizer)?;
            normalizer.log_fallbacks(column.name());

            let dropped = check.nb_dropped();
            if dropped > 0 {
                info!("[{}] found {} soft duplicates, dropped", column, dropped);
            } else {
                info!("[{}] no soft duplicate found", column);
            }

            for (pos, &idx) in rows.iter().enumerate() {
                if !check.survives[pos] {
                    report.dropped.push(DroppedRecord {
                        index: idx,
                        id: records[idx].id,
                        pass: Pass::Soft,
                        column,
                        reason: DropReason::ShorterThanKept {
                            raw_len: check.raw_len[pos],
                            kept_len: check.kept_len[pos],
                        },
                    });
                }
                keep[pos] &= check.survives[pos];
            }
            report.columns.push(ColumnSummary {
                pass: Pass::Soft,
                column,
                checked: rows.len(),
                dropped,
            });

            if self.config.overwrites(column) {
                info!("[{}] overwriting initial data with normalized values", column);
                for (&idx, cleansed) in rows.iter().zip(check.cleansed) {
                    records[idx].set(column, cleansed);
                }
            }
        }

        Ok(rows
            .into_iter()
            .zip(keep)
            .filter_map(|(idx, k)| k.then_some(idx))
            .collect())
    }
}

/// Builds the deduplicated file name from the raw one.
///
/// `wiki_id_20231101_raw_dataset.csv` becomes `wiki_id_20231101_dataset_dedup_cleansed.csv`.
pub fn output_file_name(input: &Path, overwrite_title: bool, overwrite_text: bool) -> String {
    let file_name = input
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name
        .strip_suffix(".gz")
        .unwrap_or(&file_name)
        .to_string();
    let stem = stem.strip_suffix(".csv").unwrap_or(&stem);

    let mut suffix = String::new();
    if overwrite_title || overwrite_text {
        if overwrite_title {
            suffix.push_str("_title");
        }
        if overwrite_text {
            suffix.push_str("_text");
        }
        suffix.push_str("_overwritten");
    }

    format!("{}_dedup_cleansed{}.csv", stem, suffix).replace("_raw", "")
}

/// Deduplicate the raw split at `src`, writing the result in `save_dir`.
///
/// Returns the path of the written file.
pub fn dedup(
    src: &Path,
    save_dir: &Path,
    audit: Option<&Path>,
    config: DedupConfig,
) -> Result<PathBuf, Error> {
    let resolver = Resolver::new(config)?;

    info!("loading {:?}", src);
    let records = io::read_records(src)?;
    info!("loaded {} records", records.len());

    let resolution = resolver.resolve(records)?;

    let dst = save_dir.join(output_file_name(
        src,
        resolver.config().overwrite_initial_title_data,
        resolver.config().overwrite_initial_text_data,
    ));
    info!("saving deduplicated data to {:?}", dst);
    io::write_records(&dst, &resolution.records)?;

    if let Some(audit) = audit {
        info!("writing audit of {} drops to {:?}", resolution.report.dropped.len(), audit);
        io::write_audit(audit, &resolution.report)?;
    }

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformers::{FieldTarget, NormalizationOptions};

    fn soft_only(normalization: NormalizationOptions) -> DedupConfig {
        DedupConfig {
            drop_hard_dupl: false,
            normalization,
            ..Default::default()
        }
    }

    #[test]
    fn file_names() {
        let p = Path::new("data/wiki_id_20231101_raw_dataset.csv");
        assert_eq!(
            output_file_name(p, false, false),
            "wiki_id_20231101_dataset_dedup_cleansed.csv"
        );
        assert_eq!(
            output_file_name(p, true, true),
            "wiki_id_20231101_dataset_dedup_cleansed_title_text_overwritten.csv"
        );
        assert_eq!(
            output_file_name(Path::new("x.csv.gz"), false, true),
            "x_dedup_cleansed_text_overwritten.csv"
        );
    }

    #[test]
    fn config_is_validated() {
        let c = DedupConfig {
            drop_hard_dupl: false,
            drop_soft_dupl: false,
            ..Default::default()
        };
        assert!(matches!(Resolver::new(c), Err(Error::Config(_))));
    }

    #[test]
    fn hard_then_soft() {
        let records = vec![
            Record::new(0, "u0", "Jakarta", "Ibu kota"),
            Record::new(1, "u1", "jakarta ", "Ibu  kota Indonesia"),
            Record::new(2, "u2", "Bandung", "Kota"),
            Record::new(3, "u3", "Surabaya", "Kota"),
        ];
        let r = Resolver::new(DedupConfig::default()).unwrap();
        let res = r.resolve(records).unwrap();

        // 2 and 3 share "Kota" (hard), 0 loses on title length (soft)
        assert_eq!(res.kept, vec![1]);
        assert_eq!(res.records[0].title, "jakarta ");
        assert_eq!(res.report.kept, 1);
        assert_eq!(res.report.dropped_for(Pass::Hard, Column::Text).count(), 2);
        assert_eq!(res.report.dropped_for(Pass::Soft, Column::Title).count(), 1);
    }

    #[test]
    fn overwrite_touches_every_row() {
        let records = vec![
            Record::new(0, "u0", "Hello   World", "a"),
            Record::new(1, "u1", "hello world", "b"),
        ];
        let config = DedupConfig {
            overwrite_initial_title_data: true,
            ..soft_only(NormalizationOptions {
                remove_excessive_whitespace: FieldTarget::All,
                ..NormalizationOptions::disabled()
            })
        };
        let res = Resolver::new(config).unwrap().resolve(records).unwrap();
        assert_eq!(res.kept, vec![0]);
        assert_eq!(res.records[0].title, "hello world");
        // text untouched without its own flag
        assert_eq!(res.records[0].text, "a");
    }

    #[test]
    fn ids_reassigned() {
        let records = vec![
            Record::new(5, "u0", "A", "a"),
            Record::new(5, "u1", "B", "b"),
            Record::new(6, "u2", "C", "c"),
        ];
        let res = Resolver::new(DedupConfig::default())
            .unwrap()
            .resolve(records)
            .unwrap();
        assert!(res.report.ids_reassigned);
        assert_eq!(
            res.records.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn empty_input() {
        let res = Resolver::new(DedupConfig::default())
            .unwrap()
            .resolve(Vec::new())
            .unwrap();
        assert!(res.kept.is_empty());
        assert!(res.records.is_empty());
    }
}
