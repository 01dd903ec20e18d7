//! Headless mode: the `search` and `export` subcommands.
//!
//! Both share [`FilterArgs`], which maps command-line flags onto a
//! [`RecordFilter`] so the terminal output matches what the TUI would show
//! for the same filters.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Context;
use carebook_core::{
    config::Config,
    dataset::{demo_records, load_records},
    export::{export_to_path, write_json},
    types::{check_date_format, parse_date},
    Category, MedicalRecord, RecordFilter, RecordStore, SortOrder,
};

/// Filter flags shared by `search` and `export`.
#[derive(Debug, Default, Clone, clap::Args)]
pub struct FilterArgs {
    /// Fuzzy query matched against diagnosis, doctor and hospital.
    pub query: Option<String>,
    /// Only records from this doctor (exact name).
    #[arg(long)]
    pub doctor: Option<String>,
    /// Only records from this hospital (exact name).
    #[arg(long)]
    pub hospital: Option<String>,
    /// Only records of this category (e.g. `check-up`).
    #[arg(long)]
    pub category: Option<String>,
    /// Earliest date, inclusive (`YYYY-MM-DD` or `March 15, 2024`).
    #[arg(long)]
    pub from: Option<String>,
    /// Latest date, inclusive.
    #[arg(long)]
    pub to: Option<String>,
    /// List oldest records first.
    #[arg(long)]
    pub oldest_first: bool,
}

impl FilterArgs {
    pub fn to_filter(&self) -> anyhow::Result<RecordFilter> {
        let mut filter = RecordFilter::new();
        if let Some(ref q) = self.query {
            filter = filter.text(q.as_str());
        }
        if let Some(ref doctor) = self.doctor {
            filter = filter.doctor(doctor.as_str());
        }
        if let Some(ref hospital) = self.hospital {
            filter = filter.hospital(hospital.as_str());
        }
        if let Some(ref category) = self.category {
            filter = filter.category(category.parse::<Category>()?);
        }
        if let Some(ref from) = self.from {
            filter = filter.from_date(parse_date(from).context("--from")?);
        }
        if let Some(ref to) = self.to {
            filter = filter.to_date(parse_date(to).context("--to")?);
        }
        if self.oldest_first {
            filter = filter.order(SortOrder::OldestFirst);
        }
        Ok(filter)
    }
}

/// Load `path`, or the default config file (written on first run) when no
/// path is given. A config that fails to parse or validate is an error.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            Config::load_from(path).with_context(|| format!("loading config {}", path.display()))
        }
        None => Config::load().context("loading config"),
    }
}

/// Load the dataset: `data` if given, else the configured path, else the
/// built-in demo records.
pub fn load_store(data: Option<&Path>, config: &Config) -> anyhow::Result<RecordStore> {
    let path = data.map(Path::to_path_buf).or_else(|| config.data.dataset_path());
    let records = match path {
        Some(path) => load_records(&path)
            .with_context(|| format!("loading dataset {}", path.display()))?,
        None => {
            tracing::debug!("no dataset configured, using demo records");
            demo_records()
        }
    };
    Ok(RecordStore::new(records))
}

/// One-line summary of a record for terminal output.
pub fn format_line(record: &MedicalRecord, date_format: &str) -> String {
    let mut line = format!(
        "{}  {}  {} ({})",
        record.date.format(date_format),
        record.diagnosis,
        record.doctor_name,
        record.category,
    );
    if !record.hospital.is_empty() {
        line.push_str(" @ ");
        line.push_str(&record.hospital);
    }
    line
}

/// Print the records matching `args`, as lines or as a JSON array.
pub fn search<W: Write>(
    store: &RecordStore,
    args: &FilterArgs,
    json: bool,
    date_format: &str,
    mut out: W,
) -> anyhow::Result<usize> {
    check_date_format(date_format)?;
    let filter = args.to_filter()?;
    let records = store.query(&filter);
    tracing::debug!(?filter, matched = records.len(), "headless search");

    if json {
        // An empty result is still a valid (empty) array on stdout.
        if records.is_empty() {
            writeln!(out, "[]")?;
        } else {
            write_json(&records, &mut out)?;
        }
    } else {
        for record in &records {
            writeln!(out, "{}", format_line(record, date_format))?;
        }
    }
    Ok(records.len())
}

/// Write the records matching `args` to `output`, or to the configured file
/// name when no output is given.
pub fn export(
    store: &RecordStore,
    args: &FilterArgs,
    output: Option<PathBuf>,
    config: &Config,
) -> anyhow::Result<(usize, PathBuf)> {
    let filter = args.to_filter()?;
    let records = store.query(&filter);
    let path = output.unwrap_or_else(|| PathBuf::from(&config.export.file_name));
    let count = export_to_path(&records, &path)?;
    Ok((count, path))
}
