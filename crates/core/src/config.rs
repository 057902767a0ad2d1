//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core
//! services. The intent is to avoid reading process-wide environment variables
//! during request handling, which can lead to inconsistent behaviour in
//! multi-threaded runtimes and test harnesses.

use crate::constants::DEFAULT_DATA_FILE;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_file: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig` pointing at the backing CSV file.
    ///
    /// The file does not have to exist yet; the store treats an absent file
    /// as an empty record set.
    pub fn new(data_file: PathBuf) -> Self {
        Self { data_file }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

/// Resolve the backing data file from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, the default `patient_data.csv`
/// in the working directory is used.
pub fn data_file_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_file_default_when_unset() {
        assert_eq!(
            data_file_from_env_value(None),
            PathBuf::from(DEFAULT_DATA_FILE)
        );
    }

    #[test]
    fn test_data_file_default_when_blank() {
        assert_eq!(
            data_file_from_env_value(Some("   ".into())),
            PathBuf::from(DEFAULT_DATA_FILE)
        );
    }

    #[test]
    fn test_data_file_override() {
        assert_eq!(
            data_file_from_env_value(Some("/tmp/visits.csv".into())),
            PathBuf::from("/tmp/visits.csv")
        );
    }
}
