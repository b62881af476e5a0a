//! Employee records backend core.
//!
//! Filtered, sorted, paginated listing and creation of employees over a
//! pluggable repository, with a SQLite implementation.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use logging::{
    default_log_level, init_logging, init_logging_with, logging_status, LoggingConfig,
    LoggingError,
};
pub use model::employee::{
    Employee, EmployeeDraft, EmployeeId, EmployeeValidationError, NewEmployee, ValidationPolicy,
};
pub use model::search::{EmployeePage, EmployeeSearchCriteria, SortDirection, SortField};
pub use query::page::{Page, Pageable, SortMeta};
pub use query::predicate::{FilterClause, FilterField, FilterOperator, Predicate, SqlFilter};
pub use query::{find_all_with_filters, EmployeeQuery, ListingError, QueryError, SortOrder};
pub use repo::employee_repo::{
    EmployeeRepository, RepoError, RepoResult, SqliteEmployeeRepository,
};
pub use repo::memory::InMemoryEmployeeRepository;
pub use service::employee_service::{EmployeeService, ServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
