//! Record filter: facet equality, date range, and fuzzy text search.
//!
//! A [`RecordFilter`] is the full description of what the record list shows.
//! Facets (doctor, hospital, category) are exact matches, the date range is
//! inclusive on both ends, and the text query is tested with the fuzzy
//! matcher against diagnosis, doctor name, and hospital (any one is enough).

use chrono::NaiveDate;

use crate::matcher::FuzzyQuery;
use crate::types::{Category, MedicalRecord};

// ---------------------------------------------------------------------------
// SortOrder
// ---------------------------------------------------------------------------

/// Date ordering of filtered results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::NewestFirst => SortOrder::OldestFirst,
            SortOrder::OldestFirst => SortOrder::NewestFirst,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::NewestFirst => "Newest First",
            SortOrder::OldestFirst => "Oldest First",
        }
    }
}

// ---------------------------------------------------------------------------
// RecordFilter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Free-text query; empty matches everything.
    pub text: String,
    pub doctor: Option<String>,
    pub hospital: Option<String>,
    pub category: Option<Category>,
    /// Inclusive lower bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub to: Option<NaiveDate>,
    pub order: SortOrder,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn doctor(mut self, doctor: impl Into<String>) -> Self {
        self.doctor = Some(doctor.into());
        self
    }

    pub fn hospital(mut self, hospital: impl Into<String>) -> Self {
        self.hospital = Some(hospital.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn from_date(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to_date(mut self, to: NaiveDate) -> Self {
        self.to = Some(to);
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// True when any facet or date bound is set. The text query does not count.
    pub fn has_facets(&self) -> bool {
        self.doctor.is_some()
            || self.hospital.is_some()
            || self.category.is_some()
            || self.from.is_some()
            || self.to.is_some()
    }

    /// Reset facets and date bounds, keeping the text query and sort order.
    pub fn clear_facets(&mut self) {
        self.doctor = None;
        self.hospital = None;
        self.category = None;
        self.from = None;
        self.to = None;
    }

    /// Does `record` pass every facet, the date range, and the text query?
    pub fn matches(&self, record: &MedicalRecord) -> bool {
        self.matches_with(&FuzzyQuery::new(&self.text), record)
    }

    /// Text-only check: the query fuzzy-matches any searchable field.
    pub fn matches_text(query: &FuzzyQuery, record: &MedicalRecord) -> bool {
        query.matches(&record.diagnosis)
            || query.matches(&record.doctor_name)
            || query.matches(&record.hospital)
    }

    fn matches_with(&self, query: &FuzzyQuery, record: &MedicalRecord) -> bool {
        let doctor_ok = self.doctor.as_deref().map_or(true, |d| record.doctor_name == d);
        let hospital_ok = self.hospital.as_deref().map_or(true, |h| record.hospital == h);
        let category_ok = self.category.map_or(true, |c| record.category == c);
        let from_ok = self.from.map_or(true, |from| record.date >= from);
        let to_ok = self.to.map_or(true, |to| record.date <= to);

        doctor_ok
            && hospital_ok
            && category_ok
            && from_ok
            && to_ok
            && Self::matches_text(query, record)
    }

    /// Filter `records` and sort the survivors by date. Records with equal
    /// dates keep their input order.
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a MedicalRecord>
    where
        I: IntoIterator<Item = &'a MedicalRecord>,
    {
        let query = FuzzyQuery::new(&self.text);
        let mut out: Vec<&MedicalRecord> = records
            .into_iter()
            .filter(|r| self.matches_with(&query, r))
            .collect();

        match self.order {
            SortOrder::NewestFirst => out.sort_by(|a, b| b.date.cmp(&a.date)),
            SortOrder::OldestFirst => out.sort_by(|a, b| a.date.cmp(&b.date)),
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
