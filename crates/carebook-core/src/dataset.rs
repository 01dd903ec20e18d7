//! Record sources: the built-in demo dataset and JSON dataset files.
//!
//! A dataset file is a JSON array of records in the same shape carebook
//! exports, so an export can be loaded back with `--data`.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::types::{Category, MedicalRecord, RecordId};

/// The three demo records shown when no dataset is configured.
pub fn demo_records() -> Vec<MedicalRecord> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    let strings = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };

    vec![
        MedicalRecord {
            id: RecordId::new("rec1"),
            date: date(2024, 3, 15),
            doctor_name: "Emily Carter".into(),
            hospital: "City General Hospital".into(),
            diagnosis: "Acute Bronchitis".into(),
            symptoms: strings(&["Persistent Cough", "Chest Congestion", "Fatigue"]),
            treatment: "Prescribed Amoxicillin 500mg, 2 times a day for 7 days. \
                        Recommended rest and hydration."
                .into(),
            notes: "Patient advised to follow up if symptoms do not improve in one week. \
                    Smoking cessation strongly encouraged."
                .into(),
            category: Category::Consultation,
        },
        MedicalRecord {
            id: RecordId::new("rec2"),
            date: date(2024, 1, 5),
            doctor_name: "Benjamin Lee".into(),
            hospital: "Downtown Medical Clinic".into(),
            diagnosis: "Annual Check-up".into(),
            symptoms: strings(&["None"]),
            treatment: "Standard blood panel ordered. All results are within normal ranges. \
                        Flu vaccine administered."
                .into(),
            notes: "Patient is in good health. Advised to continue regular exercise and \
                    balanced diet. Next check-up scheduled for January 2025."
                .into(),
            category: Category::CheckUp,
        },
        MedicalRecord {
            id: RecordId::new("rec3"),
            date: date(2023, 10, 22),
            doctor_name: "Sophia Rodriguez".into(),
            hospital: "OrthoCare Specialists".into(),
            diagnosis: "Minor Ankle Sprain".into(),
            symptoms: strings(&["Ankle pain", "Swelling", "Limited mobility"]),
            treatment: "R.I.C.E. (Rest, Ice, Compression, Elevation) protocol. \
                        Prescribed Ibuprofen for pain management."
                .into(),
            notes: "X-ray confirmed no fracture. Patient to wear an ankle brace for 2-3 weeks."
                .into(),
            category: Category::Consultation,
        },
    ]
}

/// Parse a JSON array of records. Record ids must be unique.
pub fn parse_records(json: &str, context: &str) -> Result<Vec<MedicalRecord>> {
    let records: Vec<MedicalRecord> =
        serde_json::from_str(json).map_err(|e| Error::json(context, e))?;

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(&record.id) {
            return Err(Error::DuplicateId(record.id.to_string()));
        }
    }
    Ok(records)
}

/// Read a dataset file from disk.
pub fn load_records(path: &Path) -> Result<Vec<MedicalRecord>> {
    let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let records = parse_records(&json, &path.display().to_string())?;
    tracing::info!(path = %path.display(), count = records.len(), "dataset loaded");
    Ok(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
