//! Dynamic employee listing queries.
//!
//! # Responsibility
//! - Validate a page request and resolve its sort key.
//! - Assemble the filter predicate from search criteria.
//! - Run the page fetch and the total count against a repository.
//!
//! # Invariants
//! - Page fetch and count use the same predicate but run as two independent
//!   repository calls; they share no snapshot.
//! - Only one sort key is applied; rows with equal keys have no defined
//!   relative order.
//! - Validation failures return before any repository call.

pub mod page;
pub mod predicate;

use crate::model::employee::Employee;
use crate::model::search::{EmployeePage, EmployeeSearchCriteria, SortDirection, SortField};
use crate::repo::employee_repo::{EmployeeRepository, RepoError};
use log::debug;
use page::{Page, Pageable};
use predicate::Predicate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejections produced while turning a page request into a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// `sort_by` does not name a sortable employee field.
    InvalidSortField(String),
    /// Page number or size out of range, or offset overflow.
    InvalidPageRequest {
        page_number: i64,
        page_size: i64,
        reason: &'static str,
    },
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSortField(field) => write!(
                f,
                "invalid sort field `{field}`; expected one of id|firstName|lastName"
            ),
            Self::InvalidPageRequest {
                page_number,
                page_size,
                reason,
            } => write!(
                f,
                "invalid page request (page_number={page_number}, page_size={page_size}): {reason}"
            ),
        }
    }
}

impl Error for QueryError {}

/// Failure of a listing run: a rejected request or a store error.
#[derive(Debug)]
pub enum ListingError {
    Query(QueryError),
    Store(RepoError),
}

impl Display for ListingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ListingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Query(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<QueryError> for ListingError {
    fn from(value: QueryError) -> Self {
        Self::Query(value)
    }
}

impl From<RepoError> for ListingError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

/// Single-key ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn sql(self) -> String {
        format!("{} {}", self.field.column(), self.direction.as_sql())
    }

    /// Comparison honouring direction, for in-memory sorting.
    pub fn compare(self, left: &Employee, right: &Employee) -> std::cmp::Ordering {
        self.direction.apply(self.field.compare(left, right))
    }
}

/// Validated, storage-independent listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeQuery {
    predicate: Predicate,
    order: SortOrder,
    page_number: u64,
    page_size: u64,
    offset: u64,
}

impl EmployeeQuery {
    /// Validates `page` and builds the query for `criteria`.
    ///
    /// # Errors
    /// - `InvalidPageRequest` when `page_size <= 0`, `page_number < 0`, or
    ///   `page_number * page_size` overflows.
    /// - `InvalidSortField` when `sort_by` is not a known field.
    pub fn build(
        page: &EmployeePage,
        criteria: &EmployeeSearchCriteria,
    ) -> Result<Self, QueryError> {
        let invalid_page = |reason: &'static str| QueryError::InvalidPageRequest {
            page_number: page.page_number,
            page_size: page.page_size,
            reason,
        };

        if page.page_size <= 0 {
            return Err(invalid_page("page size must be positive"));
        }
        if page.page_number < 0 {
            return Err(invalid_page("page number must not be negative"));
        }
        let offset = page
            .page_number
            .checked_mul(page.page_size)
            .ok_or_else(|| invalid_page("page offset overflows"))?;

        let field = SortField::parse(page.sort_by.as_str())
            .ok_or_else(|| QueryError::InvalidSortField(page.sort_by.clone()))?;

        Ok(Self {
            predicate: Predicate::from_criteria(criteria),
            order: SortOrder {
                field,
                direction: page.sort_direction,
            },
            // Non-negative i64 values always fit in u64.
            page_number: page.page_number.unsigned_abs(),
            page_size: page.page_size.unsigned_abs(),
            offset: offset.unsigned_abs(),
        })
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }

    pub fn pageable(&self) -> Pageable {
        Pageable::new(
            self.page_number,
            self.page_size,
            self.order.field,
            self.order.direction,
        )
    }
}

/// Returns the requested page of matching employees and the total count.
///
/// The page is fetched first and the count second, as two separate
/// repository calls. Request errors return before either call.
pub fn find_all_with_filters<R>(
    repo: &R,
    page: &EmployeePage,
    criteria: &EmployeeSearchCriteria,
) -> Result<Page<Employee>, ListingError>
where
    R: EmployeeRepository + ?Sized,
{
    let query = EmployeeQuery::build(page, criteria)?;
    debug!(
        "event=employee_query module=query status=built clauses={} sort={} offset={} limit={}",
        query.predicate().clauses().len(),
        query.order().sql(),
        query.offset(),
        query.limit()
    );

    let content = repo.find_page(&query)?;
    let total = repo.count(query.predicate())?;

    Ok(Page::new(content, query.pageable(), total))
}
