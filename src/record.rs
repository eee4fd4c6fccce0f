//! Record Module
//!
//! A single lead: an ordered list of named string fields.
//!
//! ## Responsibilities
//! - Preserve column order (CSV round trips depend on it)
//! - Typed access to the well-known lead fields via [`Field`]
//! - Keep unrecognized columns verbatim
//! - (De)serialize as a JSON object with keys in field order

use std::fmt;

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::query::date::parse_date;

/// Well-known fields referenced by the query pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    LeadName,
    FirstName,
    Stage,
    Source,
    Responsible,
    Created,
    FollowUp,
}

impl Field {
    /// Column name as it appears in CSV headers and stored blobs
    pub fn name(self) -> &'static str {
        match self {
            Field::Id => "ID",
            Field::LeadName => "Lead Name",
            Field::FirstName => "First Name",
            Field::Stage => "Stage",
            Field::Source => "Source",
            Field::Responsible => "Responsible",
            Field::Created => "Created",
            Field::FollowUp => "Follow Up",
        }
    }

    /// Resolve a column name to a well-known field
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ID" => Some(Field::Id),
            "Lead Name" => Some(Field::LeadName),
            "First Name" => Some(Field::FirstName),
            "Stage" => Some(Field::Stage),
            "Source" => Some(Field::Source),
            "Responsible" => Some(Field::Responsible),
            "Created" => Some(Field::Created),
            "Follow Up" => Some(Field::FollowUp),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single lead entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// (field name, value) pairs in column order; names are unique
    fields: Vec<(String, String)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from (name, value) pairs; later duplicates overwrite earlier ones
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (name, value) in pairs {
            record.set(name, value);
        }
        record
    }

    /// Builder-style setter
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Value of a named field, if present
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a field; an existing field keeps its position
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Remove a field, returning its value
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(pos).1)
    }

    /// Value of a well-known field ("" when missing)
    pub fn field(&self, field: Field) -> &str {
        self.get(field.name()).unwrap_or("")
    }

    /// Field names in column order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// (name, value) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Well-known field accessors
    // =========================================================================

    pub fn id(&self) -> &str {
        self.field(Field::Id)
    }

    pub fn lead_name(&self) -> &str {
        self.field(Field::LeadName)
    }

    pub fn first_name(&self) -> &str {
        self.field(Field::FirstName)
    }

    pub fn stage(&self) -> &str {
        self.field(Field::Stage)
    }

    pub fn source(&self) -> &str {
        self.field(Field::Source)
    }

    pub fn responsible(&self) -> &str {
        self.field(Field::Responsible)
    }

    /// `Created` parsed from `DD/MM/YYYY`
    pub fn created_date(&self) -> Option<NaiveDate> {
        parse_date(self.field(Field::Created))
    }

    /// `Follow Up` parsed from `DD/MM/YYYY`
    pub fn follow_up_date(&self) -> Option<NaiveDate> {
        parse_date(self.field(Field::FollowUp))
    }

    /// Numeric ID: leading integer after trimming, 0 when there is none
    pub fn numeric_id(&self) -> i64 {
        leading_integer(self.id())
    }
}

/// Parse the leading (optionally signed) integer of a string
///
/// 0 when there are no leading digits; values beyond `i64` saturate.
pub(crate) fn leading_integer(raw: &str) -> i64 {
    let s = raw.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return 0;
    }
    match (digits.parse::<i64>(), negative) {
        (Ok(n), true) => -n,
        (Ok(n), false) => n,
        (Err(_), true) => i64::MIN,
        (Err(_), false) => i64::MAX,
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of lead fields")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
        let mut record = Record::new();
        while let Some((name, value)) = access.next_entry::<String, serde_json::Value>()? {
            record.set(name, stringify(value));
        }
        Ok(record)
    }
}

/// Scalars are kept in their textual form so stored numeric IDs compare as strings
fn stringify(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
