use std::collections::HashSet;

use thiserror::Error;
use tracing::warn;

use crate::domain::DoctorRecord;

/// Where the one fetch per page load currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    Failed { message: String, attempts: u32 },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record store is already populated")]
    AlreadyLoaded,
}

/// All doctor records fetched for this page load, in listing order.
///
/// Populated once; read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<DoctorRecord>,
    state: LoadState,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the store from a fetched batch.
    ///
    /// Record ids must be unique: later records repeating an earlier id are
    /// dropped. Returns how many were dropped.
    pub fn populate(&mut self, batch: Vec<DoctorRecord>) -> Result<usize, StoreError> {
        if self.state == LoadState::Loaded {
            return Err(StoreError::AlreadyLoaded);
        }

        let total = batch.len();
        let mut seen = HashSet::with_capacity(total);
        let records: Vec<DoctorRecord> = batch
            .into_iter()
            .filter(|doctor| {
                let first = seen.insert(doctor.id.clone());
                if !first {
                    warn!(id = %doctor.id, name = %doctor.name, "dropping doctor with duplicate id");
                }
                first
            })
            .collect();

        let dropped = total - records.len();
        self.records = records;
        self.state = LoadState::Loaded;
        Ok(dropped)
    }

    pub fn mark_failed(&mut self, message: impl Into<String>, attempts: u32) {
        if self.state == LoadState::Loaded {
            return;
        }
        self.state = LoadState::Failed {
            message: message.into(),
            attempts,
        };
    }

    /// Move a failed store back to loading for a retry.
    /// Returns false when the store is not in the failed state.
    pub fn mark_loading(&mut self) -> bool {
        if matches!(self.state, LoadState::Failed { .. }) {
            self.state = LoadState::Loading;
            true
        } else {
            false
        }
    }

    pub fn records(&self) -> &[DoctorRecord] {
        &self.records
    }

    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every specialty name present in the store, in first-seen order.
    pub fn speciality_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .flat_map(DoctorRecord::speciality_names)
            .filter(|name| seen.insert(*name))
            .collect()
    }
}
