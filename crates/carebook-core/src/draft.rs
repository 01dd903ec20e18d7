//! Editable record drafts backing the add and edit forms.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::types::{Category, MedicalRecord, RecordId};

/// Form contents before they become a [`MedicalRecord`]. Symptoms are kept as
/// the comma-separated text the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub doctor_name: String,
    pub hospital: String,
    pub diagnosis: String,
    pub symptoms: String,
    pub treatment: String,
    pub notes: String,
    pub category: Category,
}

impl RecordDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fill a draft for editing `record`.
    pub fn from_record(record: &MedicalRecord) -> Self {
        Self {
            doctor_name: record.doctor_name.clone(),
            hospital: record.hospital.clone(),
            diagnosis: record.diagnosis.clone(),
            symptoms: record.symptoms.join(", "),
            treatment: record.treatment.clone(),
            notes: record.notes.clone(),
            category: record.category,
        }
    }

    /// Doctor name, diagnosis, and treatment must not be blank.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("doctor name", &self.doctor_name),
            ("diagnosis", &self.diagnosis),
            ("treatment", &self.treatment),
        ];
        match required.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(Error::MissingField(field)),
            None => Ok(()),
        }
    }

    /// Split the symptom text on commas, dropping blank entries.
    pub fn symptom_list(&self) -> Vec<String> {
        self.symptoms
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Build a new record with a fresh `id` and `date`.
    pub fn into_new_record(self, id: RecordId, date: NaiveDate) -> Result<MedicalRecord> {
        self.validate()?;
        let symptoms = self.symptom_list();
        Ok(MedicalRecord {
            id,
            date,
            doctor_name: self.doctor_name.trim().to_string(),
            hospital: self.hospital.trim().to_string(),
            diagnosis: self.diagnosis.trim().to_string(),
            symptoms,
            treatment: self.treatment.trim().to_string(),
            notes: self.notes.trim().to_string(),
            category: self.category,
        })
    }

    /// Apply the draft to an existing record, keeping its id and date.
    pub fn apply_to(self, record: &MedicalRecord) -> Result<MedicalRecord> {
        self.into_new_record(record.id.clone(), record.date)
    }
}
