//! The visit record type stored in the backing CSV file.

use serde::{Deserialize, Serialize};

/// One patient-visit entry.
///
/// All five fields are opaque strings: `appointment_date` is free-form date
/// text and `age_group`/`gender` are whatever categories the submitting form
/// uses. Nothing is validated for type or range here, and `patient_id` is not
/// unique — the same patient can appear in any number of records.
///
/// Field order matches the CSV column order, so serde derives both the header
/// row and row (de)serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub appointment_date: String,
    pub patient_id: String,
    pub age_group: String,
    pub gender: String,
    pub diagnosis: String,
}
