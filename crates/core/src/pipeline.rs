//! Filtering and diagnosis aggregation over loaded record sets.
//!
//! Pure, synchronous functions: the store loads, this module narrows and
//! counts, and the chart layer consumes the result. Nothing here touches the
//! filesystem.

use crate::constants::ALL_SENTINEL;
use crate::record::VisitRecord;
use serde::Serialize;

/// Optional exact-match constraints on `age_group` and `gender`.
///
/// `None` or the sentinel value `"all"` leaves a field unconstrained; any
/// other value requires exact string equality. Both constraints must hold
/// for a record to pass.
#[derive(Debug, Clone, Default)]
pub struct VisitFilter {
    pub age_group: Option<String>,
    pub gender: Option<String>,
}

impl VisitFilter {
    pub fn matches(&self, record: &VisitRecord) -> bool {
        field_matches(self.age_group.as_deref(), &record.age_group)
            && field_matches(self.gender.as_deref(), &record.gender)
    }
}

fn field_matches(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        None => true,
        Some(v) if v == ALL_SENTINEL => true,
        Some(v) => v == actual,
    }
}

/// One (diagnosis, count) pair of the aggregated series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosisCount {
    pub diagnosis: String,
    pub count: u64,
}

/// Returns the records passing `filter`, preserving input order.
///
/// An empty input, or a filter value matching no record, yields an empty set
/// rather than an error.
pub fn filter(records: Vec<VisitRecord>, filter: &VisitFilter) -> Vec<VisitRecord> {
    records.into_iter().filter(|r| filter.matches(r)).collect()
}

/// Groups records by exact `diagnosis` equality and counts each group.
///
/// Pairs are emitted in first-seen order. That order is an implementation
/// detail, not a contract; consumers must treat the series as unordered.
pub fn aggregate(records: &[VisitRecord]) -> Vec<DiagnosisCount> {
    let mut series: Vec<DiagnosisCount> = Vec::new();
    for record in records {
        match series.iter_mut().find(|d| d.diagnosis == record.diagnosis) {
            Some(entry) => entry.count += 1,
            None => series.push(DiagnosisCount {
                diagnosis: record.diagnosis.clone(),
                count: 1,
            }),
        }
    }
    series
}
