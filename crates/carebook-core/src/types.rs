//! Core types for carebook-core.
//!
//! This module defines the record model shared across every layer: the
//! [`MedicalRecord`] itself, its [`RecordId`], and the [`Category`]
//! discriminant. The JSON shape (camelCase keys, long-form dates) matches the
//! dataset files carebook reads and the files it exports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Long date form used for display and for the JSON dataset format.
pub const LONG_DATE_FORMAT: &str = "%B %d, %Y";

/// ISO form accepted wherever a date is typed by a user.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// RecordId
// ---------------------------------------------------------------------------

/// Opaque record identifier (`rec1`, `rec2`, … for records created here).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix of a `rec{N}` id, if the id has that shape.
    pub(crate) fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix("rec")?.parse().ok()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Kind of medical visit a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Category {
    #[default]
    Consultation,
    Procedure,
    Prescription,
    CheckUp,
    Imaging,
    FollowUp,
}

/// Lowercased spellings accepted by [`Category::from_str`].
static CATEGORY_NAMES: phf::Map<&'static str, Category> = phf::phf_map! {
    "consultation" => Category::Consultation,
    "procedure" => Category::Procedure,
    "prescription" => Category::Prescription,
    "check-up" => Category::CheckUp,
    "checkup" => Category::CheckUp,
    "imaging" => Category::Imaging,
    "follow-up" => Category::FollowUp,
    "followup" => Category::FollowUp,
};

impl Category {
    /// Every category, in the order the add-record form cycles through them.
    pub const ALL: [Category; 6] = [
        Category::Consultation,
        Category::Procedure,
        Category::Prescription,
        Category::CheckUp,
        Category::Imaging,
        Category::FollowUp,
    ];

    /// Canonical display name, also used in the JSON format.
    pub fn name(self) -> &'static str {
        match self {
            Category::Consultation => "Consultation",
            Category::Procedure => "Procedure",
            Category::Prescription => "Prescription",
            Category::CheckUp => "Check-up",
            Category::Imaging => "Imaging",
            Category::FollowUp => "Follow-up",
        }
    }

    /// The next category in [`Category::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// The previous category in [`Category::ALL`], wrapping around.
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CATEGORY_NAMES
            .get(s.trim().to_lowercase().as_str())
            .copied()
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// MedicalRecord
// ---------------------------------------------------------------------------

/// One visit in the patient's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: RecordId,
    /// Visit date. Serialised as `"March 15, 2024"`; ISO dates are accepted
    /// on input.
    #[serde(with = "long_date")]
    pub date: NaiveDate,
    pub doctor_name: String,
    /// May be empty.
    #[serde(default)]
    pub hospital: String,
    pub diagnosis: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    pub treatment: String,
    #[serde(default)]
    pub notes: String,
    pub category: Category,
}

impl MedicalRecord {
    /// False when no symptoms were recorded, including the `["None"]`
    /// placeholder used by check-ups.
    pub fn has_symptoms(&self) -> bool {
        match self.symptoms.as_slice() {
            [] => false,
            [only] => !only.trim().eq_ignore_ascii_case("none"),
            _ => true,
        }
    }
}

/// Parse a user- or file-supplied date: ISO (`2024-03-15`) or long form
/// (`March 15, 2024`, `Mar 5, 2024`).
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, ISO_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, LONG_DATE_FORMAT))
        .map_err(|_| Error::InvalidDate(s.to_string()))
}

/// Reject strftime strings chrono cannot render, such as `%Q`.
pub fn check_date_format(fmt: &str) -> Result<()> {
    use chrono::format::{Item, StrftimeItems};

    if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        return Err(Error::DateFormat(fmt.to_string()));
    }
    Ok(())
}

mod long_date {
    use super::{parse_date, LONG_DATE_FORMAT};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(LONG_DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
