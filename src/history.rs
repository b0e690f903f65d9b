use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::api::VerificationJob;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Failed to access history file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize/deserialize history: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Failed to find home directory")]
    NoHomeDir,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerificationRecord {
    pub guid: String,
    pub network: String,
    pub address: Option<String>,
    pub contract_name: String,
    pub timestamp: DateTime<Utc>,
    pub status: Option<String>,
    pub source_path: Option<String>,
}

impl VerificationRecord {
    pub fn new(job: &VerificationJob, contract_name: String, source_path: Option<String>) -> Self {
        Self {
            guid: job.guid.clone(),
            network: job.network.to_string(),
            address: job.address.as_ref().map(ToString::to_string),
            contract_name,
            timestamp: Utc::now(),
            status: None,
            source_path,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VerificationHistory {
    pub records: HashMap<String, VerificationRecord>,
}

impl VerificationHistory {
    pub fn add_record(&mut self, record: VerificationRecord) {
        self.records.insert(record.guid.clone(), record);
    }

    pub fn update_status(&mut self, guid: &str, status: String) {
        if let Some(record) = self.records.get_mut(guid) {
            record.status = Some(status);
        }
    }

    pub fn get_recent_records(&self, limit: usize) -> Vec<&VerificationRecord> {
        let mut records: Vec<&VerificationRecord> = self.records.values().collect();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records.into_iter().take(limit).collect()
    }
}

/// Keeps submitted jobs in `~/.evm-verifier/history.json`.
pub struct HistoryManager {
    history_file: PathBuf,
}

impl HistoryManager {
    /// # Errors
    ///
    /// Fails without a home directory or if it can't be created.
    pub fn new() -> Result<Self, HistoryError> {
        let home_dir = dirs::home_dir().ok_or(HistoryError::NoHomeDir)?;
        Self::at(home_dir.join(".evm-verifier").join("history.json"))
    }

    /// # Errors
    ///
    /// Fails if the parent directory of `history_file` can't be created.
    pub fn at(history_file: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let history_file = history_file.into();
        if let Some(dir) = history_file.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        Ok(Self { history_file })
    }

    pub fn path(&self) -> &Path {
        &self.history_file
    }

    /// # Errors
    ///
    /// I/O or JSON errors reading the history file.
    pub fn load_history(&self) -> Result<VerificationHistory, HistoryError> {
        if !self.history_file.exists() {
            return Ok(VerificationHistory::default());
        }

        let content = fs::read_to_string(&self.history_file)?;
        let history: VerificationHistory = serde_json::from_str(&content)?;
        Ok(history)
    }

    /// # Errors
    ///
    /// I/O or JSON errors writing the history file.
    pub fn save_history(&self, history: &VerificationHistory) -> Result<(), HistoryError> {
        let content = serde_json::to_string_pretty(history)?;
        fs::write(&self.history_file, content)?;
        Ok(())
    }

    /// # Errors
    ///
    /// See [`Self::load_history`] and [`Self::save_history`].
    pub fn add_verification(&self, record: VerificationRecord) -> Result<(), HistoryError> {
        let mut history = self.load_history()?;
        history.add_record(record);
        self.save_history(&history)
    }

    /// # Errors
    ///
    /// See [`Self::load_history`] and [`Self::save_history`].
    pub fn update_verification_status(
        &self,
        guid: &str,
        status: String,
    ) -> Result<(), HistoryError> {
        let mut history = self.load_history()?;
        history.update_status(guid, status);
        self.save_history(&history)
    }

    /// # Errors
    ///
    /// See [`Self::load_history`].
    pub fn list_recent_jobs(&self, limit: usize) -> Result<Vec<VerificationRecord>, HistoryError> {
        let history = self.load_history()?;
        Ok(history
            .get_recent_records(limit)
            .into_iter()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{address::Address, network::NetworkId};
    use chrono::Duration;
    use tempfile::TempDir;

    fn job(guid: &str) -> VerificationJob {
        VerificationJob::new(guid, NetworkId::Polygon).with_address(
            Address::new("0x5FbDB2315678afecb367f032d93F642f64180aa3").unwrap(),
        )
    }

    #[test]
    fn test_missing_file_is_empty_history() {
        let dir = TempDir::new().unwrap();
        let manager = HistoryManager::at(dir.path().join("nested").join("history.json")).unwrap();
        assert!(manager.list_recent_jobs(10).unwrap().is_empty());
        assert!(dir.path().join("nested").exists());
    }

    #[test]
    fn test_add_and_update_record() {
        let dir = TempDir::new().unwrap();
        let manager = HistoryManager::at(dir.path().join("history.json")).unwrap();

        let record = VerificationRecord::new(&job("guid-1"), "Token".to_string(), None);
        manager.add_verification(record).unwrap();
        manager
            .update_verification_status("guid-1", "verified".to_string())
            .unwrap();

        let records = manager.list_recent_jobs(10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].guid, "guid-1");
        assert_eq!(records[0].network, "polygon");
        assert_eq!(
            records[0].address.as_deref(),
            Some("0x5fbdb2315678afecb367f032d93f642f64180aa3")
        );
        assert_eq!(records[0].status.as_deref(), Some("verified"));
    }

    #[test]
    fn test_recent_records_are_newest_first() {
        let mut history = VerificationHistory::default();
        let mut older = VerificationRecord::new(&job("old"), "A".to_string(), None);
        older.timestamp = Utc::now() - Duration::hours(1);
        let newer = VerificationRecord::new(&job("new"), "B".to_string(), None);
        history.add_record(older);
        history.add_record(newer);

        let recent = history.get_recent_records(1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].guid, "new");
    }

    #[test]
    fn test_unknown_guid_update_is_ignored() {
        let mut history = VerificationHistory::default();
        history.update_status("missing", "failed".to_string());
        assert!(history.records.is_empty());
    }
}
