//! Employee use-case service.
//!
//! # Responsibility
//! - Expose the list-with-filters and create entry points.
//! - Apply the configured required-field policy before persistence.
//! - Map query, validation and store failures onto one error taxonomy.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Errors propagate unchanged in meaning; nothing is retried.
//! - Log events carry metadata only, never employee names.

use crate::model::employee::{Employee, EmployeeValidationError, NewEmployee, ValidationPolicy};
use crate::model::search::{EmployeePage, EmployeeSearchCriteria};
use crate::query::page::Page;
use crate::query::{find_all_with_filters, ListingError, QueryError};
use crate::repo::employee_repo::{EmployeeRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Errors surfaced by employee use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Requested sort key is not a sortable employee field.
    InvalidSortField(String),
    /// Page number/size out of range.
    InvalidPageRequest(QueryError),
    /// Create payload misses required fields.
    Validation(EmployeeValidationError),
    /// Underlying store could not be reached.
    StoreUnavailable(RepoError),
    /// Any other store failure (bad rows, schema mismatch, SQL error).
    Store(RepoError),
}

impl ServiceError {
    /// Stable short code for log lines and callers mapping to responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSortField(_) => "invalid_sort_field",
            Self::InvalidPageRequest(_) => "invalid_page_request",
            Self::Validation(_) => "validation_error",
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::Store(_) => "store_error",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSortField(field) => write!(f, "invalid sort field `{field}`"),
            Self::InvalidPageRequest(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::StoreUnavailable(err) => write!(f, "employee store unavailable: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidSortField(_) => None,
            Self::InvalidPageRequest(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::StoreUnavailable(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<QueryError> for ServiceError {
    fn from(value: QueryError) -> Self {
        match value {
            QueryError::InvalidSortField(field) => Self::InvalidSortField(field),
            other @ QueryError::InvalidPageRequest { .. } => Self::InvalidPageRequest(other),
        }
    }
}

impl From<ListingError> for ServiceError {
    fn from(value: ListingError) -> Self {
        match value {
            ListingError::Query(err) => Self::from(err),
            ListingError::Store(err) => Self::from(err),
        }
    }
}

impl From<EmployeeValidationError> for ServiceError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        if value.is_unavailable() {
            Self::StoreUnavailable(value)
        } else {
            Self::Store(value)
        }
    }
}

/// Use-case facade over an employee repository.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
    policy: ValidationPolicy,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service with the default policy (both names required).
    pub fn new(repo: R) -> Self {
        Self::with_policy(repo, ValidationPolicy::default())
    }

    pub fn with_policy(repo: R, policy: ValidationPolicy) -> Self {
        Self { repo, policy }
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Lists one page of employees matching `criteria`.
    ///
    /// Delegates to the query builder; `total_elements` is counted
    /// separately from the page fetch.
    pub fn list_employees(
        &self,
        page: &EmployeePage,
        criteria: &EmployeeSearchCriteria,
    ) -> Result<Page<Employee>, ServiceError> {
        let started_at = Instant::now();
        match find_all_with_filters(&self.repo, page, criteria).map_err(ServiceError::from) {
            Ok(result) => {
                info!(
                    "event=employee_list module=service status=ok duration_ms={} page_number={} page_size={} returned={} total={}",
                    started_at.elapsed().as_millis(),
                    result.page_number(),
                    result.page_size(),
                    result.items().len(),
                    result.total_count()
                );
                Ok(result)
            }
            Err(err) => {
                warn!(
                    "event=employee_list module=service status=error duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Validates and persists a new employee.
    ///
    /// # Contract
    /// - Returns the stored record with its assigned id.
    /// - Missing required fields fail with `Validation` before any write.
    pub fn add_employee(&self, employee: &NewEmployee) -> Result<Employee, ServiceError> {
        let started_at = Instant::now();
        let result = employee
            .validate(&self.policy)
            .map_err(ServiceError::from)
            .and_then(|draft| self.repo.save(&draft).map_err(ServiceError::from));

        match &result {
            Ok(saved) => info!(
                "event=employee_add module=service status=ok duration_ms={} id={}",
                started_at.elapsed().as_millis(),
                saved.id
            ),
            Err(err) => warn!(
                "event=employee_add module=service status=error duration_ms={} error_code={}",
                started_at.elapsed().as_millis(),
                err.code()
            ),
        }

        result
    }
}
