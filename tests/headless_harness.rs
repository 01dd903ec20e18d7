#![allow(unused)]
//! Headless harness: the `search` and `export` subcommands end to end, from
//! dataset file and config file to stdout or an exported file.
//!
//! # What this covers
//!
//! - **Dataset selection**: `--data` beats `[data].path`, which beats the
//!   demo records.
//! - **Config errors**: a config file that fails validation stops startup
//!   instead of silently falling back to defaults.
//! - **Dataset errors**: duplicate ids and missing files surface as errors.
//! - **Search output**: one line per record in the configured date format, or
//!   a JSON array.
//! - **Export**: filtered records written to the given or configured path.
//!
//! # Running
//!
//! ```sh
//! cargo test --test headless_harness
//! ```

mod common;
use common::*;

use carebook::{
    config::Config,
    headless::{self, FilterArgs},
    MedicalRecord,
};
use pretty_assertions::assert_eq;

fn config_with(dir: &tempfile::TempDir, body: &str) -> Config {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, body).unwrap();
    Config::load_from(&path).unwrap()
}

fn run_search(args: &FilterArgs, json: bool, data: &std::path::Path) -> String {
    let config = Config::defaults();
    let store = headless::load_store(Some(data), &config).unwrap();
    let mut out = Vec::new();
    headless::search(&store, args, json, "%Y-%m-%d", &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// ---------------------------------------------------------------------------
// Dataset selection
// ---------------------------------------------------------------------------

#[test]
fn demo_records_without_any_dataset() {
    let store = headless::load_store(None, &Config::defaults()).unwrap();
    assert_eq!(store.len(), 3);
}

#[test]
fn configured_path_is_used_and_flag_overrides_it() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(&dir, DATASET_JSON);
    let config = config_with(&dir, &format!("[data]\npath = {:?}\n", data.display().to_string()));

    let store = headless::load_store(None, &config).unwrap();
    assert_eq!(store.len(), 2);

    let other = dir.path().join("missing.json");
    let err = headless::load_store(Some(&other), &config).unwrap_err();
    assert!(format!("{err:#}").contains("missing.json"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    std::fs::write(&path, "[keybindings]\nexport = \"xx\"\n").unwrap();
    let err = headless::load_config(Some(&path)).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("config.toml"), "{msg}");
    assert!(msg.contains("export"), "{msg}");

    std::fs::write(&path, "[ui]\ndate_format = \"%Q\"\n").unwrap();
    assert!(headless::load_config(Some(&path)).is_err());

    std::fs::write(&path, "[ui]\ndate_format = \"%d.%m.%Y\"\n").unwrap();
    let config = headless::load_config(Some(&path)).unwrap();
    assert_eq!(config.ui.date_format, "%d.%m.%Y");
}

#[test]
fn duplicate_ids_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(&dir, DUPLICATE_ID_JSON);
    let err = headless::load_store(Some(&data), &Config::defaults()).unwrap_err();
    assert!(format!("{err:#}").contains("rec1"));
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

#[test]
fn search_prints_one_line_per_record() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(&dir, DATASET_JSON);

    let out = run_search(&FilterArgs::default(), false, &data);
    assert_eq!(
        out,
        "2024-02-02  Migraine  Ada Park (Consultation) @ Northside Clinic\n\
         2023-11-20  Chest X-ray  Omar Haddad (Imaging)\n"
    );

    let args = FilterArgs { oldest_first: true, ..Default::default() };
    let out = run_search(&args, false, &data);
    assert!(out.starts_with("2023-11-20"));
}

#[test]
fn search_flags_combine() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(&dir, DATASET_JSON);

    let args = FilterArgs {
        query: Some("migrane".into()),
        category: Some("consultation".into()),
        from: Some("February 1, 2024".into()),
        to: Some("2024-02-02".into()),
        ..Default::default()
    };
    let out = run_search(&args, true, &data);
    let records: Vec<MedicalRecord> = serde_json::from_str(&out).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].doctor_name, "Ada Park");
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

#[test]
fn export_writes_filtered_view() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(&dir, DATASET_JSON);
    let out_path = dir.path().join("imaging.json");
    let config = Config::defaults();
    let store = headless::load_store(Some(&data), &config).unwrap();

    let args = FilterArgs { category: Some("Imaging".into()), ..Default::default() };
    let (count, path) = headless::export(&store, &args, Some(out_path.clone()), &config).unwrap();
    assert_eq!((count, path), (1, out_path.clone()));

    let exported = carebook::dataset::load_records(&out_path).unwrap();
    assert_eq!(exported[0].diagnosis, "Chest X-ray");
    assert!(exported[0].hospital.is_empty());
}

#[test]
fn export_with_no_matches_fails() {
    let config = Config::defaults();
    let store = headless::load_store(None, &config).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("none.json");

    let args = FilterArgs { doctor: Some("Nobody".into()), ..Default::default() };
    assert!(headless::export(&store, &args, Some(out.clone()), &config).is_err());
    assert!(!out.exists());
}
