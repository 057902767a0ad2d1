//! CSV-backed visit record store.
//!
//! The store keeps the full record set in a single flat CSV file with a fixed
//! header row. Every read reconstructs the set from disk and every append
//! rewrites the file in full, so the file is the only source of truth and no
//! in-memory state survives between calls.
//!
//! # Concurrency
//!
//! `append` is a read-modify-write of the whole file. The store serializes
//! writers behind a single mutex and writes to a sibling temporary path that
//! is renamed into place, so concurrent appends cannot lose records and a
//! crash mid-write cannot corrupt the previous file. `load` takes no lock: a
//! concurrent rename yields either the complete old file or the complete new
//! one, never a torn read.

use crate::constants::COLUMN_HEADERS;
use crate::record::VisitRecord;
use crate::{CoreConfig, StoreError, StoreResult};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

/// File-backed store for the full visit record set.
#[derive(Debug)]
pub struct VisitStore {
    cfg: Arc<CoreConfig>,
    write_lock: Mutex<()>,
}

impl VisitStore {
    /// Creates a store over the backing file named by `cfg`.
    ///
    /// No I/O happens here; an absent backing file is a valid empty store.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            cfg,
            write_lock: Mutex::new(()),
        }
    }

    /// Loads the full record set from the backing file.
    ///
    /// Returns an empty set if the file does not exist (without creating it).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if:
    /// - the file exists but cannot be opened or read,
    /// - the header row does not match the fixed column set, or
    /// - a data row cannot be deserialized.
    pub fn load(&self) -> StoreResult<Vec<VisitRecord>> {
        let path = self.cfg.data_file();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(path)?;

        let found: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
        let expected: Vec<String> = COLUMN_HEADERS.iter().map(|c| (*c).to_owned()).collect();
        if found != expected {
            return Err(StoreError::SchemaMismatch { expected, found });
        }

        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }

        Ok(records)
    }

    /// Appends one record and rewrites the backing file in full.
    ///
    /// Holds the writer lock across the whole load-push-write cycle so two
    /// concurrent appends cannot drop each other's record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on read, parse, or write failure. On failure the
    /// previous file contents are untouched and the record is not saved.
    pub fn append(&self, record: VisitRecord) -> StoreResult<()> {
        let _guard = self.lock_writer();

        let mut records = self.load()?;
        records.push(record);
        self.write_unlocked(&records)?;

        tracing::debug!(
            total = records.len(),
            path = %self.cfg.data_file().display(),
            "appended visit record"
        );
        Ok(())
    }

    /// Replaces the backing file with exactly `records`, header row first.
    pub fn write_all(&self, records: &[VisitRecord]) -> StoreResult<()> {
        let _guard = self.lock_writer();
        self.write_unlocked(records)
    }

    fn write_unlocked(&self, records: &[VisitRecord]) -> StoreResult<()> {
        let path = self.cfg.data_file();
        let tmp_path = self.tmp_path();

        // Header is written explicitly so an empty set still produces a
        // well-formed file.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp_path)?;
        writer.write_record(COLUMN_HEADERS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush().map_err(StoreError::FileWrite)?;
        drop(writer);

        fs::rename(&tmp_path, path).map_err(StoreError::FileWrite)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.cfg.data_file().as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        // A poisoned lock only means another writer panicked mid-append; the
        // rename-based write discipline keeps the file itself consistent.
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store(temp: &TempDir) -> VisitStore {
        let cfg = CoreConfig::new(temp.path().join("patient_data.csv"));
        VisitStore::new(Arc::new(cfg))
    }

    fn record(date: &str, id: &str, age_group: &str, gender: &str, diagnosis: &str) -> VisitRecord {
        VisitRecord {
            appointment_date: date.into(),
            patient_id: id.into(),
            age_group: age_group.into(),
            gender: gender.into(),
            diagnosis: diagnosis.into(),
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);

        assert_eq!(store.load().unwrap(), Vec::new());
        // Loading must not create the file.
        assert!(!temp.path().join("patient_data.csv").exists());
    }

    #[test]
    fn test_append_then_load_preserves_order() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);

        let first = record("2024-01-01", "P1", "30-40", "F", "flu");
        let second = record("2024-01-02", "P2", "30-40", "M", "flu");
        store.append(first.clone()).unwrap();
        store.append(second.clone()).unwrap();

        assert_eq!(store.load().unwrap(), vec![first, second]);
    }

    #[test]
    fn test_append_writes_header_row_first() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);

        store
            .append(record("2024-01-01", "P1", "30-40", "F", "flu"))
            .unwrap();

        let text = fs::read_to_string(temp.path().join("patient_data.csv")).unwrap();
        assert_eq!(
            text.lines().next().unwrap(),
            "appointment_date,patient_id,age_group,gender,diagnosis"
        );
    }

    #[test]
    fn test_many_appends_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);

        let mut expected = Vec::new();
        for i in 0..25 {
            let r = record(
                &format!("2024-01-{:02}", i + 1),
                &format!("P{i}"),
                "20-30",
                if i % 2 == 0 { "F" } else { "M" },
                &format!("dx-{}", i % 4),
            );
            store.append(r.clone()).unwrap();
            expected.push(r);
        }

        assert_eq!(store.load().unwrap(), expected);
    }

    #[test]
    fn test_write_all_then_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);

        let records = vec![
            record("2024-01-01", "P1", "30-40", "F", "flu"),
            record("2024-01-02", "P2", "50-60", "M", "asthma"),
        ];
        store.write_all(&records).unwrap();

        assert_eq!(store.load().unwrap(), records);
    }

    #[test]
    fn test_write_all_empty_set_keeps_header() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);

        store.write_all(&[]).unwrap();

        let text = fs::read_to_string(temp.path().join("patient_data.csv")).unwrap();
        assert_eq!(
            text.trim_end(),
            "appointment_date,patient_id,age_group,gender,diagnosis"
        );
        assert_eq!(store.load().unwrap(), Vec::new());
    }

    #[test]
    fn test_fields_with_commas_and_quotes_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);

        let awkward = record(
            "2024-01-01",
            "P1",
            "30-40",
            "F",
            "cough, fever and \"chills\"",
        );
        store.append(awkward.clone()).unwrap();

        assert_eq!(store.load().unwrap(), vec![awkward]);
    }

    #[test]
    fn test_load_rejects_unexpected_columns() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);

        fs::write(
            temp.path().join("patient_data.csv"),
            "date,name,age\n2024-01-01,Jo,44\n",
        )
        .unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_failed_append_leaves_previous_contents() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);

        let first = record("2024-01-01", "P1", "30-40", "F", "flu");
        store.append(first.clone()).unwrap();

        // Corrupt the header so the next append fails at the load step.
        let path = temp.path().join("patient_data.csv");
        let original = fs::read_to_string(&path).unwrap();
        fs::write(&path, "bad,header\nx,y\n").unwrap();
        assert!(store
            .append(record("2024-01-02", "P2", "30-40", "M", "flu"))
            .is_err());

        // The file on disk was not rewritten by the failed append.
        assert_eq!(fs::read_to_string(&path).unwrap(), "bad,header\nx,y\n");

        fs::write(&path, original).unwrap();
        assert_eq!(store.load().unwrap(), vec![first]);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);

        store
            .append(record("2024-01-01", "P1", "30-40", "F", "flu"))
            .unwrap();

        assert!(!temp.path().join("patient_data.csv.tmp").exists());
    }

    #[test]
    fn test_concurrent_appends_lose_nothing() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(test_store(&temp));

        let mut handles = Vec::new();
        for t in 0..4 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for i in 0..10 {
                    store
                        .append(VisitRecord {
                            appointment_date: "2024-01-01".into(),
                            patient_id: format!("T{t}-{i}"),
                            age_group: "20-30".into(),
                            gender: "F".into(),
                            diagnosis: "flu".into(),
                        })
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.load().unwrap().len(), 40);
    }
}
