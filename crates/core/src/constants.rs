//! Shared constants for the visit record store and pipeline.

/// Fixed column set of the backing CSV file, in storage order.
pub const COLUMN_HEADERS: [&str; 5] = [
    "appointment_date",
    "patient_id",
    "age_group",
    "gender",
    "diagnosis",
];

/// Default backing file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "patient_data.csv";

/// Filter value meaning "no constraint on this field".
pub const ALL_SENTINEL: &str = "all";
