//! Composable filter predicates over employee rows.
//!
//! # Responsibility
//! - Turn optional search criteria into an ordered list of filter clauses.
//! - Evaluate a predicate in memory and render it as parameterized SQL.
//!
//! # Invariants
//! - Clauses are combined with AND; an empty predicate matches every row.
//! - `Contains` is a case-sensitive literal substring test. Wildcard
//!   characters in the value carry no special meaning.
//! - SQL rendering never splices values into SQL text, only bind markers.

use crate::model::employee::Employee;
use crate::model::search::EmployeeSearchCriteria;

/// Text attributes that can carry a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    FirstName,
    LastName,
}

impl FilterField {
    pub fn column(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
        }
    }

    /// Reads this attribute from an employee.
    pub fn value(self, employee: &Employee) -> &str {
        match self {
            Self::FirstName => employee.first_name.as_str(),
            Self::LastName => employee.last_name.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    /// Field contains the value as a substring.
    Contains,
}

/// One `{field, operator, value}` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub field: FilterField,
    pub operator: FilterOperator,
    pub value: String,
}

impl FilterClause {
    pub fn contains(field: FilterField, value: impl Into<String>) -> Self {
        Self {
            field,
            operator: FilterOperator::Contains,
            value: value.into(),
        }
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        let actual = self.field.value(employee);
        match self.operator {
            FilterOperator::Contains => actual.contains(self.value.as_str()),
        }
    }

    fn sql_condition(&self) -> String {
        match self.operator {
            // instr() is case-sensitive and does not interpret `%` or `_`.
            FilterOperator::Contains => format!("instr({}, ?) > 0", self.field.column()),
        }
    }
}

/// SQL rendering of a predicate: a `WHERE` body plus positional binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlFilter {
    pub clause: String,
    pub binds: Vec<String>,
}

/// Ordered AND-combination of filter clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<FilterClause>,
}

impl Predicate {
    /// Predicate with no clauses; matches every row.
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Builds the listing predicate from search criteria.
    ///
    /// Adds one `Contains` clause per non-null criterion, first name before
    /// last name.
    pub fn from_criteria(criteria: &EmployeeSearchCriteria) -> Self {
        let mut predicate = Self::match_all();
        if let Some(first_name) = criteria.first_name.as_deref() {
            predicate = predicate.and(FilterClause::contains(FilterField::FirstName, first_name));
        }
        if let Some(last_name) = criteria.last_name.as_deref() {
            predicate = predicate.and(FilterClause::contains(FilterField::LastName, last_name));
        }
        predicate
    }

    pub fn and(mut self, clause: FilterClause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn is_match_all(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        self.clauses.iter().all(|clause| clause.matches(employee))
    }

    /// Renders a `WHERE` body. The empty predicate renders as `1 = 1`.
    pub fn to_sql(&self) -> SqlFilter {
        if self.clauses.is_empty() {
            return SqlFilter {
                clause: "1 = 1".to_string(),
                binds: Vec::new(),
            };
        }

        let clause = self
            .clauses
            .iter()
            .map(FilterClause::sql_condition)
            .collect::<Vec<_>>()
            .join(" AND ");
        let binds = self
            .clauses
            .iter()
            .map(|clause| clause.value.clone())
            .collect();

        SqlFilter { clause, binds }
    }
}
