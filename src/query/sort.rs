//! Sorting
//!
//! Type-aware comparison per column: integers for `ID`, dates for
//! `Created`/`Follow Up`, plain string order for everything else.

use std::cmp::Ordering;
use std::fmt;

use crate::record::{leading_integer, Field, Record};

use super::date::date_or_epoch;

/// Sortable columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Id,
    Name,
    Stage,
    Source,
    Responsible,
    Created,
    FollowUp,
}

impl SortColumn {
    /// Resolve a sort key (`id`, `name`, `stage`, `source`, `responsible`,
    /// `created`, `followup`); unknown keys yield `None`
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "id" => Some(SortColumn::Id),
            "name" => Some(SortColumn::Name),
            "stage" => Some(SortColumn::Stage),
            "source" => Some(SortColumn::Source),
            "responsible" => Some(SortColumn::Responsible),
            "created" => Some(SortColumn::Created),
            "followup" => Some(SortColumn::FollowUp),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Name => "name",
            SortColumn::Stage => "stage",
            SortColumn::Source => "source",
            SortColumn::Responsible => "responsible",
            SortColumn::Created => "created",
            SortColumn::FollowUp => "followup",
        }
    }

    /// Record field this column sorts on
    pub fn field(self) -> Field {
        match self {
            SortColumn::Id => Field::Id,
            SortColumn::Name => Field::LeadName,
            SortColumn::Stage => Field::Stage,
            SortColumn::Source => Field::Source,
            SortColumn::Responsible => Field::Responsible,
            SortColumn::Created => Field::Created,
            SortColumn::FollowUp => Field::FollowUp,
        }
    }

    /// Ascending comparison of two records on this column
    pub fn compare(self, a: &Record, b: &Record) -> Ordering {
        let field = self.field();
        let (x, y) = (a.field(field), b.field(field));
        match self {
            SortColumn::Id => leading_integer(x).cmp(&leading_integer(y)),
            SortColumn::Created | SortColumn::FollowUp => date_or_epoch(x).cmp(&date_or_epoch(y)),
            _ => x.cmp(y),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    column: Option<SortColumn>,
    direction: SortDirection,
}

impl SortState {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction,
        }
    }

    /// Select a column: the active column flips direction, a new one starts ascending
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == Some(column) {
            self.direction = self.direction.flipped();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn column(&self) -> Option<SortColumn> {
        self.column
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

/// Stable in-place sort; equal records keep their relative order in both directions
pub fn sort(records: &mut [Record], column: SortColumn, direction: SortDirection) {
    match direction {
        SortDirection::Ascending => records.sort_by(|a, b| column.compare(a, b)),
        SortDirection::Descending => records.sort_by(|a, b| column.compare(b, a)),
    }
}
