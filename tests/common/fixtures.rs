//! Static datasets and generated corpora used across harnesses.

use carebook_core::{Category, MedicalRecord, RecordId};
use chrono::{Duration, NaiveDate};
use fake::{
    faker::{company::en::CompanyName, lorem::en::Words, name::en::Name},
    Fake,
};
use std::path::PathBuf;

/// A two-record dataset in the on-disk JSON shape: camelCase keys, one long
/// date and one ISO date, a record without a hospital.
pub const DATASET_JSON: &str = r#"[
  {
    "id": "rec1",
    "date": "February 2, 2024",
    "doctorName": "Ada Park",
    "hospital": "Northside Clinic",
    "diagnosis": "Migraine",
    "symptoms": ["Headache", "Nausea"],
    "treatment": "Rest and hydration.",
    "notes": "",
    "category": "Consultation"
  },
  {
    "id": "rec2",
    "date": "2023-11-20",
    "doctorName": "Omar Haddad",
    "diagnosis": "Chest X-ray",
    "symptoms": [],
    "treatment": "No action needed.",
    "category": "imaging"
  }
]"#;

/// Same ids twice.
pub const DUPLICATE_ID_JSON: &str = r#"[
  {"id":"rec1","date":"2024-01-01","doctorName":"A","diagnosis":"B","treatment":"C","category":"Consultation"},
  {"id":"rec1","date":"2024-01-02","doctorName":"A","diagnosis":"B","treatment":"C","category":"Consultation"}
]"#;

/// Write `json` to a dataset file inside `dir`.
pub fn write_dataset(dir: &tempfile::TempDir, json: &str) -> PathBuf {
    let path = dir.path().join("records.json");
    std::fs::write(&path, json).expect("write dataset fixture");
    path
}

/// `n` records with generated names and diagnoses, one day apart, ids
/// `rec1..=recN`.
pub fn generated_corpus(n: usize) -> Vec<MedicalRecord> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date");
    (0..n)
        .map(|i| {
            let words: Vec<String> = Words(1..4).fake();
            MedicalRecord {
                id: RecordId::new(format!("rec{}", i + 1)),
                date: start + Duration::days(i as i64),
                doctor_name: Name().fake(),
                hospital: CompanyName().fake(),
                diagnosis: words.join(" "),
                symptoms: Words(0..3).fake(),
                treatment: "Observation".to_string(),
                notes: String::new(),
                category: Category::ALL[i % Category::ALL.len()],
            }
        })
        .collect()
}
