//! Test builders: ergonomic constructors for `MedicalRecord` and stores.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use carebook_core::{Category, MedicalRecord, RecordId, RecordStore};
use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`MedicalRecord`] test fixtures.
///
/// # Example
///
/// ```rust
/// let record = RecordBuilder::new("rec9")
///     .date(2024, 2, 1)
///     .doctor("Ada Park")
///     .diagnosis("Migraine")
///     .category(Category::FollowUp)
///     .build();
/// ```
pub struct RecordBuilder {
    record: MedicalRecord,
}

impl RecordBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            record: MedicalRecord {
                id: RecordId::new(id),
                date: ymd(2024, 1, 1),
                doctor_name: "Test Doctor".to_string(),
                hospital: String::new(),
                diagnosis: "Test Diagnosis".to_string(),
                symptoms: Vec::new(),
                treatment: "Rest".to_string(),
                notes: String::new(),
                category: Category::Consultation,
            },
        }
    }

    pub fn date(mut self, y: i32, m: u32, d: u32) -> Self {
        self.record.date = ymd(y, m, d);
        self
    }

    pub fn doctor(mut self, doctor: &str) -> Self {
        self.record.doctor_name = doctor.to_string();
        self
    }

    pub fn hospital(mut self, hospital: &str) -> Self {
        self.record.hospital = hospital.to_string();
        self
    }

    pub fn diagnosis(mut self, diagnosis: &str) -> Self {
        self.record.diagnosis = diagnosis.to_string();
        self
    }

    pub fn symptoms(mut self, symptoms: &[&str]) -> Self {
        self.record.symptoms = symptoms.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.record.category = category;
        self
    }

    pub fn build(self) -> MedicalRecord {
        self.record
    }
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// A store holding the given records.
pub fn store_of(records: impl IntoIterator<Item = MedicalRecord>) -> RecordStore {
    RecordStore::new(records.into_iter().collect())
}

/// Diagnoses of `records`, in order.
pub fn diagnoses(records: &[&MedicalRecord]) -> Vec<String> {
    records.iter().map(|r| r.diagnosis.clone()).collect()
}

/// Ids of `records`, in order.
pub fn ids(records: &[&MedicalRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.to_string()).collect()
}
