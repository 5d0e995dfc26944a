//! Hard duplicates: identical raw values.
use std::collections::{HashMap, HashSet};

use log::{info, warn};

use super::report::{ColumnSummary, DedupReport, DropReason, DroppedRecord, Pass};
use crate::record::{Column, Record};

/// Removes from `rows` every record whose `column` value is shared by at least one other row.
///
/// No representative is kept: a value occurring twice or more loses all of its records.
pub fn drop_shared_values(
    records: &[Record],
    rows: &mut Vec<usize>,
    column: Column,
    report: &mut DedupReport,
) -> usize {
    info!("[{}] checking hard duplicates", column);

    let mut occurrences: HashMap<&str, usize> = HashMap::with_capacity(rows.len());
    for &idx in rows.iter() {
        *occurrences.entry(records[idx].get(column)).or_insert(0) += 1;
    }

    let checked = rows.len();
    let mut dropped = 0;
    rows.retain(|&idx| {
        let count = occurrences[records[idx].get(column)];
        if count > 1 {
            report.dropped.push(DroppedRecord {
                index: idx,
                id: records[idx].id,
                pass: Pass::Hard,
                column,
                reason: DropReason::SharedValue { occurrences: count },
            });
            dropped += 1;
            false
        } else {
            true
        }
    });

    if dropped > 0 {
        info!("[{}] found {} hard duplicates, dropped", column, dropped);
    }
    report.columns.push(ColumnSummary {
        pass: Pass::Hard,
        column,
        checked,
        dropped,
    });
    dropped
}

/// `true` if two remaining rows share an `id`.
pub fn has_duplicate_ids(records: &[Record], rows: &[usize]) -> bool {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.iter().any(|&idx| !seen.insert(records[idx].id))
}

/// Gives remaining rows a dense, 0-based id sequence following row order.
pub fn reassign_ids(records: &mut [Record], rows: &[usize]) {
    warn!(
        "duplicated ids found after hard duplicate removal, reassigning ids of {} records (upstream extraction issue)",
        rows.len()
    );
    for (new_id, &idx) in rows.iter().enumerate() {
        records[idx].id = new_id as i64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![
            Record::new(1, "u1", "A", "x"),
            Record::new(2, "u2", "B", "x"),
            Record::new(3, "u3", "C", "y"),
            Record::new(4, "u4", "D", "x"),
            Record::new(5, "u5", "E", "z"),
        ]
    }

    #[test]
    fn all_members_dropped() {
        let r = records();
        let mut rows: Vec<usize> = (0..r.len()).collect();
        let mut report = DedupReport::new(r.len());

        let dropped = drop_shared_values(&r, &mut rows, Column::Text, &mut report);

        assert_eq!(dropped, 3);
        assert_eq!(rows, vec![2, 4]);
        assert!(report
            .dropped
            .iter()
            .all(|d| d.reason == DropReason::SharedValue { occurrences: 3 }));
        assert_eq!(report.columns[0].checked, 5);
    }

    #[test]
    fn unique_untouched() {
        let r = records();
        let mut rows: Vec<usize> = (0..r.len()).collect();
        let mut report = DedupReport::new(r.len());

        assert_eq!(drop_shared_values(&r, &mut rows, Column::Url, &mut report), 0);
        assert_eq!(rows.len(), 5);
        assert!(report.dropped.is_empty());
    }

    #[test]
    fn only_considers_remaining_rows() {
        let r = records();
        // row 1 already gone: "x" is still shared by rows 0 and 3
        let mut rows = vec![0, 2, 3];
        let mut report = DedupReport::new(r.len());
        drop_shared_values(&r, &mut rows, Column::Text, &mut report);
        assert_eq!(rows, vec![2]);
    }

    #[test]
    fn ids() {
        let mut r = vec![
            Record::new(7, "a", "a", "a"),
            Record::new(7, "b", "b", "b"),
            Record::new(9, "c", "c", "c"),
        ];
        let rows = vec![0, 2];
        assert!(!has_duplicate_ids(&r, &rows));
        let rows = vec![0, 1, 2];
        assert!(has_duplicate_ids(&r, &rows));

        reassign_ids(&mut r, &rows);
        assert_eq!(r.iter().map(|x| x.id).collect::<Vec<_>>(), vec![0, 1, 2]);
    }
}
