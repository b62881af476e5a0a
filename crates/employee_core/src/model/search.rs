//! Search inputs for employee listing.
//!
//! # Responsibility
//! - Carry caller-supplied filter, paging and sort values as received.
//! - Map dynamic sort keys onto a closed set of sortable fields.
//!
//! # Invariants
//! - `EmployeePage` is unvalidated; `query::EmployeeQuery::build` is the
//!   boundary that rejects bad paging or unknown sort keys.

use crate::model::employee::Employee;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const DEFAULT_PAGE_NUMBER: i64 = 0;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const DEFAULT_SORT_BY: &str = "lastName";

/// Optional filter values. `None` means no filter on that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSearchCriteria {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl EmployeeSearchCriteria {
    pub fn first_name(value: impl Into<String>) -> Self {
        Self {
            first_name: Some(value.into()),
            last_name: None,
        }
    }

    pub fn last_name(value: impl Into<String>) -> Self {
        Self {
            first_name: None,
            last_name: Some(value.into()),
        }
    }
}

/// Ordering direction for the single sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Asc,
    #[serde(alias = "desc")]
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Applies this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unsupported sort direction `{other}`; expected asc|desc")),
        }
    }
}

/// Paging and sort request as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeePage {
    pub page_number: i64,
    pub page_size: i64,
    pub sort_by: String,
    pub sort_direction: SortDirection,
}

impl Default for EmployeePage {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_direction: SortDirection::Asc,
        }
    }
}

impl EmployeePage {
    pub fn new(
        page_number: i64,
        page_size: i64,
        sort_by: impl Into<String>,
        sort_direction: SortDirection,
    ) -> Self {
        Self {
            page_number,
            page_size,
            sort_by: sort_by.into(),
            sort_direction,
        }
    }
}

/// Closed set of fields an employee listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    FirstName,
    LastName,
}

impl SortField {
    pub const ALL: [SortField; 3] = [Self::Id, Self::FirstName, Self::LastName];

    /// Resolves a caller-supplied sort key.
    ///
    /// Accepts wire names (`id`, `firstName`, `lastName`) and column names
    /// (`first_name`, `last_name`). Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(Self::Id),
            "firstName" | "first_name" => Some(Self::FirstName),
            "lastName" | "last_name" => Some(Self::LastName),
            _ => None,
        }
    }

    /// Wire name reported back in page metadata.
    pub fn property(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
        }
    }

    /// Storage column; safe to splice into SQL because the set is closed.
    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
        }
    }

    /// Ascending comparison of two employees on this field.
    pub fn compare(self, left: &Employee, right: &Employee) -> Ordering {
        match self {
            Self::Id => left.id.cmp(&right.id),
            Self::FirstName => left.first_name.cmp(&right.first_name),
            Self::LastName => left.last_name.cmp(&right.last_name),
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.property())
    }
}
