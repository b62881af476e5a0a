use employee_core::db::open_db_in_memory;
use employee_core::{
    Employee, EmployeeDraft, EmployeePage, EmployeeQuery, EmployeeRepository,
    EmployeeSearchCriteria, EmployeeService, EmployeeValidationError, InMemoryEmployeeRepository,
    NewEmployee, Predicate, RepoError, RepoResult, ServiceError, SqliteEmployeeRepository,
    ValidationPolicy,
};

struct OfflineRepository;

impl EmployeeRepository for OfflineRepository {
    fn save(&self, _draft: &EmployeeDraft) -> RepoResult<Employee> {
        Err(RepoError::Unavailable("connection refused".to_string()))
    }

    fn find_page(&self, _query: &EmployeeQuery) -> RepoResult<Vec<Employee>> {
        Err(RepoError::Unavailable("connection refused".to_string()))
    }

    fn count(&self, _predicate: &Predicate) -> RepoResult<u64> {
        Err(RepoError::Unavailable("connection refused".to_string()))
    }
}

#[test]
fn added_employee_is_listed_with_its_values() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());

    let saved = service
        .add_employee(&NewEmployee::new("Ada", "Lovelace"))
        .unwrap();
    assert!(saved.id > 0);

    let result = service
        .list_employees(&EmployeePage::default(), &EmployeeSearchCriteria::default())
        .unwrap();
    assert_eq!(result.total_count(), 1);
    assert_eq!(result.items(), &[saved.clone()]);
    assert_eq!(saved.first_name, "Ada");
    assert_eq!(saved.last_name, "Lovelace");
}

#[test]
fn add_trims_surrounding_whitespace() {
    let service = EmployeeService::new(InMemoryEmployeeRepository::new());

    let saved = service
        .add_employee(&NewEmployee::new("  Grace ", "Hopper\t"))
        .unwrap();
    assert_eq!(saved.first_name, "Grace");
    assert_eq!(saved.last_name, "Hopper");
}

#[test]
fn missing_or_blank_names_fail_validation_without_writing() {
    let service = EmployeeService::new(InMemoryEmployeeRepository::new());

    let missing_last = NewEmployee {
        first_name: Some("Ada".to_string()),
        last_name: None,
    };
    let err = service.add_employee(&missing_last).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(EmployeeValidationError::MissingRequiredFields(ref fields))
            if fields == &["lastName"]
    ));

    let err = service
        .add_employee(&NewEmployee::new("   ", ""))
        .unwrap_err();
    assert_eq!(err.code(), "validation_error");
    assert_eq!(
        err.to_string(),
        "missing required fields: firstName, lastName"
    );

    assert!(service.repository().is_empty().unwrap());
}

#[test]
fn relaxed_policy_stores_absent_names_as_empty() {
    let policy = ValidationPolicy {
        require_first_name: false,
        require_last_name: true,
    };
    let service = EmployeeService::with_policy(InMemoryEmployeeRepository::new(), policy);

    let saved = service
        .add_employee(&NewEmployee {
            first_name: None,
            last_name: Some("Curie".to_string()),
        })
        .unwrap();
    assert_eq!(saved.first_name, "");
    assert_eq!(saved.last_name, "Curie");
    assert_eq!(service.policy(), policy);
}

#[test]
fn unreachable_store_is_reported_as_unavailable() {
    let service = EmployeeService::new(OfflineRepository);

    let err = service
        .list_employees(&EmployeePage::default(), &EmployeeSearchCriteria::default())
        .unwrap_err();
    assert!(matches!(err, ServiceError::StoreUnavailable(_)));
    assert_eq!(err.code(), "store_unavailable");

    let err = service
        .add_employee(&NewEmployee::new("Ada", "Lovelace"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::StoreUnavailable(_)));
}

#[test]
fn query_failure_on_reachable_store_is_a_store_error() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    conn.execute_batch("DROP TABLE employee;").unwrap();

    let err = service
        .list_employees(&EmployeePage::default(), &EmployeeSearchCriteria::default())
        .unwrap_err();
    assert!(matches!(err, ServiceError::Store(_)), "unexpected error: {err}");
    assert_eq!(err.code(), "store_error");
}

#[test]
fn request_errors_carry_stable_codes() {
    let service = EmployeeService::new(InMemoryEmployeeRepository::new());
    let criteria = EmployeeSearchCriteria::default();

    let mut page = EmployeePage {
        sort_by: "salary".to_string(),
        ..EmployeePage::default()
    };
    let err = service.list_employees(&page, &criteria).unwrap_err();
    assert_eq!(err.code(), "invalid_sort_field");
    assert_eq!(err.to_string(), "invalid sort field `salary`");

    page.sort_by = "id".to_string();
    page.page_size = 0;
    let err = service.list_employees(&page, &criteria).unwrap_err();
    assert_eq!(err.code(), "invalid_page_request");
}
