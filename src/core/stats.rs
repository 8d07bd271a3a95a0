use crate::models::EmployeeRecord;
use std::collections::BTreeSet;

/// Headline figures shown above the employee list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotStats {
    pub total: usize,
    pub last_update: Option<String>,
    pub distinct_titles: usize,
}

impl SnapshotStats {
    pub fn from_records(rows: &[EmployeeRecord]) -> Self {
        let titles: BTreeSet<&str> = rows
            .iter()
            .map(|r| r.title.trim())
            .filter(|t| !t.is_empty())
            .collect();

        Self {
            total: rows.len(),
            // the reconciler stamps every row with the same time
            last_update: rows
                .first()
                .and_then(|r| r.updated_on())
                .map(str::to_string),
            distinct_titles: titles.len(),
        }
    }
}
