//! Store: the in-memory list of [`MedicalRecord`] values.
//!
//! The store is the single source of truth; the UI and the CLI read filtered
//! views of it through [`RecordStore::query`] and never keep their own copy of
//! a record beyond one render.

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::filter::RecordFilter;
use crate::types::{Category, MedicalRecord, RecordId};

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<MedicalRecord>,
}

impl RecordStore {
    /// Build a store, ordering `records` newest first. Records with equal
    /// dates keep their given order.
    pub fn new(mut records: Vec<MedicalRecord>) -> Self {
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MedicalRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: &RecordId) -> Option<&MedicalRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Replace the record with the same id in place, or insert a new record
    /// at the front.
    pub fn upsert(&mut self, record: MedicalRecord) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                tracing::debug!(id = %record.id, "store: record updated");
                *slot = record;
            }
            None => {
                tracing::debug!(id = %record.id, "store: record added");
                self.records.insert(0, record);
            }
        }
    }

    /// Remove and return the record with `id`.
    pub fn remove(&mut self, id: &RecordId) -> Result<MedicalRecord> {
        let idx = self
            .records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| Error::RecordNotFound(id.to_string()))?;
        tracing::debug!(id = %id, "store: record removed");
        Ok(self.records.remove(idx))
    }

    /// Next free id of the form `rec{N}`: one past the highest existing
    /// suffix, or the lowest unused suffix once that would overflow.
    pub fn next_id(&self) -> RecordId {
        let last = self.records.iter().filter_map(|r| r.id.sequence()).max().unwrap_or(0);
        if let Some(next) = last.checked_add(1) {
            return RecordId(format!("rec{next}"));
        }

        tracing::warn!("record id sequence exhausted, reusing a free suffix");
        (1..=u64::MAX)
            .map(|n| RecordId(format!("rec{n}")))
            .find(|id| self.get(id).is_none())
            .unwrap_or_else(|| RecordId(format!("rec{}", self.records.len() + 1)))
    }

    /// Distinct doctor names, sorted.
    pub fn doctors(&self) -> Vec<String> {
        self.distinct(|r| Some(r.doctor_name.as_str()))
    }

    /// Distinct non-empty hospital names, sorted.
    pub fn hospitals(&self) -> Vec<String> {
        self.distinct(|r| Some(r.hospital.as_str()).filter(|h| !h.is_empty()))
    }

    /// Distinct categories present in the store, in [`Category`] order.
    pub fn categories(&self) -> Vec<Category> {
        self.records
            .iter()
            .map(|r| r.category)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Filtered, date-sorted view of the store.
    pub fn query(&self, filter: &RecordFilter) -> Vec<&MedicalRecord> {
        filter.apply(&self.records)
    }

    fn distinct<'a>(&'a self, key: impl Fn(&'a MedicalRecord) -> Option<&'a str>) -> Vec<String> {
        self.records
            .iter()
            .filter_map(key)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl From<Vec<MedicalRecord>> for RecordStore {
    fn from(records: Vec<MedicalRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a MedicalRecord;
    type IntoIter = std::slice::Iter<'a, MedicalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
