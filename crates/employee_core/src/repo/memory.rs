//! In-memory employee repository for tests and embedding.
//!
//! # Invariants
//! - Ids are assigned from a monotonic sequence starting at 1.
//! - Filtering and ordering go through `Predicate::matches` and
//!   `SortOrder::compare`, the same objects the SQL path renders.
//! - A poisoned lock surfaces as `RepoError::Unavailable`.

use crate::model::employee::{Employee, EmployeeDraft, EmployeeId};
use crate::query::predicate::Predicate;
use crate::query::EmployeeQuery;
use crate::repo::employee_repo::{EmployeeRepository, RepoError, RepoResult};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MemoryStore {
    rows: Vec<Employee>,
    last_id: EmployeeId,
}

/// Employee repository holding rows in process memory.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeRepository {
    store: Mutex<MemoryStore>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows, unfiltered.
    pub fn len(&self) -> RepoResult<usize> {
        Ok(self.lock()?.rows.len())
    }

    pub fn is_empty(&self) -> RepoResult<bool> {
        Ok(self.lock()?.rows.is_empty())
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, MemoryStore>> {
        self.store
            .lock()
            .map_err(|_| RepoError::Unavailable("in-memory store lock poisoned".to_string()))
    }
}

impl EmployeeRepository for InMemoryEmployeeRepository {
    fn save(&self, draft: &EmployeeDraft) -> RepoResult<Employee> {
        let mut store = self.lock()?;
        store.last_id += 1;
        let employee = draft.clone().into_employee(store.last_id);
        store.rows.push(employee.clone());
        Ok(employee)
    }

    fn find_page(&self, query: &EmployeeQuery) -> RepoResult<Vec<Employee>> {
        let store = self.lock()?;
        let mut matching: Vec<&Employee> = store
            .rows
            .iter()
            .filter(|employee| query.predicate().matches(employee))
            .collect();

        let order = query.order();
        matching.sort_by(|left, right| order.compare(left, right));

        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit()).unwrap_or(usize::MAX);

        Ok(matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn count(&self, predicate: &Predicate) -> RepoResult<u64> {
        let store = self.lock()?;
        let count = store
            .rows
            .iter()
            .filter(|employee| predicate.matches(employee))
            .count();
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryEmployeeRepository;
    use crate::model::employee::{NewEmployee, ValidationPolicy};
    use crate::repo::employee_repo::EmployeeRepository;

    #[test]
    fn save_assigns_increasing_ids() {
        let repo = InMemoryEmployeeRepository::new();
        let policy = ValidationPolicy::default();

        let first = repo
            .save(&NewEmployee::new("Ann", "Lee").validate(&policy).unwrap())
            .unwrap();
        let second = repo
            .save(&NewEmployee::new("Bob", "Lee").validate(&policy).unwrap())
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.len().unwrap(), 2);
        assert!(!repo.is_empty().unwrap());
    }
}
