//! Token statistics of deduplicated splits.
//!
//! Counts unicode words per article `text` and summarizes them per split
//! (total, average, extrema and deciles), as a markdown table or a csv file.
use std::path::Path;

use itertools::Itertools;
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::Error;
use crate::io;
use crate::lang::lang_from_path;

/// Number of tokens (unicode words) of a text.
#[inline]
pub fn token_count(text: &str) -> usize {
    text.unicode_words().count()
}

/// Percentile of already sorted values, linearly interpolated between closest ranks.
pub fn percentile(sorted: &[usize], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let pos = (q / 100.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let (a, b) = (sorted[lo] as f64, sorted[hi] as f64);
    a + (b - a) * (pos - lo as f64)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenStats {
    pub split: String,
    pub total: usize,
    pub avg: f64,
    pub min: usize,
    pub max: usize,
    /// 10th to 90th percentiles.
    pub deciles: Vec<f64>,
}

impl TokenStats {
    pub fn from_counts(split: &str, counts: &[usize]) -> Self {
        if counts.is_empty() {
            warn!("[{}] no article, statistics are zeroed", split);
            return Self {
                split: split.to_string(),
                total: 0,
                avg: 0.0,
                min: 0,
                max: 0,
                deciles: vec![0.0; 9],
            };
        }

        let sorted: Vec<usize> = counts.iter().copied().sorted().collect();
        let total: usize = sorted.iter().sum();
        Self {
            split: split.to_string(),
            total,
            avg: total as f64 / sorted.len() as f64,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            deciles: (1..10).map(|d| percentile(&sorted, d as f64 * 10.0)).collect(),
        }
    }

    fn markdown_row(&self) -> String {
        format!(
            "| {} | {} | {:.2} | {} | {} | [{}] |",
            self.split,
            group_thousands(self.total),
            self.avg,
            group_thousands(self.min),
            group_thousands(self.max),
            self.deciles.iter().map(|d| format!("{:.2}", d)).join(", ")
        )
    }
}

/// flat version of [TokenStats] for csv output.
#[derive(Serialize)]
struct TokenStatsRow<'a> {
    split: &'a str,
    total: usize,
    avg: f64,
    min: usize,
    max: usize,
    deciles: String,
}

impl<'a> From<&'a TokenStats> for TokenStatsRow<'a> {
    fn from(s: &'a TokenStats) -> Self {
        Self {
            split: &s.split,
            total: s.total,
            avg: s.avg,
            min: s.min,
            max: s.max,
            deciles: s.deciles.iter().map(|d| format!("{:.2}", d)).join(" "),
        }
    }
}

/// `1234567` -> `1,234,567`
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn markdown_table(stats: &[TokenStats]) -> String {
    let mut lines = vec![
        "| Lang Code | Total Token | Avg Token per Article | Min Token | Max Token | Token Deciles List |".to_string(),
        "| :---: | ---: | ---: | ---: | ---: | :--- |".to_string(),
    ];
    lines.extend(stats.iter().map(TokenStats::markdown_row));
    lines.join("\n")
}

/// Compute statistics of a single split file.
pub fn split_stats(path: &Path) -> Result<TokenStats, Error> {
    let split = lang_from_path(path).unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    info!("counting tokens of split {}", split);

    let records = io::read_records(path)?;
    let counts: Vec<usize> = records.par_iter().map(|r| token_count(&r.text)).collect();
    Ok(TokenStats::from_counts(&split, &counts))
}

/// Compute statistics of every split, optionally writing them in a csv at `dst`.
pub fn stats(srcs: &[impl AsRef<Path>], dst: Option<&Path>) -> Result<Vec<TokenStats>, Error> {
    let stats = srcs
        .iter()
        .map(|src| split_stats(src.as_ref()))
        .collect::<Result<Vec<_>, Error>>()?;

    if let Some(dst) = dst {
        let mut out = csv::WriterBuilder::new().from_path(dst)?;
        for s in &stats {
            out.serialize(TokenStatsRow::from(s))?;
        }
        out.flush()?;
    }

    Ok(stats)
}
