//! Audit trail writer.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Error;
use crate::processing::dedup::DedupReport;

/// Write one JSON object per dropped record.
pub fn write_audit(path: &Path, report: &DedupReport) -> Result<(), Error> {
    let mut out = BufWriter::new(File::create(path)?);
    write_lines(&mut out, report)?;
    out.flush()?;
    Ok(())
}

fn write_lines<W: Write>(out: &mut W, report: &DedupReport) -> Result<(), Error> {
    for dropped in &report.dropped {
        serde_json::to_writer(&mut *out, dropped)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::dedup::{DropReason, DroppedRecord, Pass};
    use crate::record::Column;

    #[test]
    fn one_line_per_drop() {
        let mut report = DedupReport::new(3);
        report.dropped.push(DroppedRecord {
            index: 0,
            id: 10,
            pass: Pass::Hard,
            column: Column::Text,
            reason: DropReason::SharedValue { occurrences: 2 },
        });
        report.dropped.push(DroppedRecord {
            index: 2,
            id: 12,
            pass: Pass::Soft,
            column: Column::Title,
            reason: DropReason::ShorterThanKept {
                raw_len: 3,
                kept_len: 5,
            },
        });

        let mut buf = Vec::new();
        write_lines(&mut buf, &report).unwrap();
        let lines: Vec<serde_json::Value> = String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["pass"], "hard");
        assert_eq!(lines[0]["column"], "text");
        assert_eq!(lines[0]["reason"], "shared_value");
        assert_eq!(lines[0]["occurrences"], 2);
        assert_eq!(lines[1]["kept_len"], 5);
        assert_eq!(lines[1]["index"], 2);
    }
}
