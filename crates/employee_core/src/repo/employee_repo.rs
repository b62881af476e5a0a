//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Define the storage-independent `save` / `find_page` / `count` contract.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Only validated `EmployeeDraft`s reach `save`.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Sort and filter columns come from closed enums, never caller text.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::employee::{Employee, EmployeeDraft};
use crate::query::predicate::Predicate;
use crate::query::EmployeeQuery;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEE_TABLE: &str = "employee";
const EMPLOYEE_REQUIRED_COLUMNS: [&str; 3] = ["id", "first_name", "last_name"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Non-SQL store could not serve the call.
    Unavailable(String),
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Whether the store itself was unreachable or unusable.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Db(err) => err.is_unavailable(),
            Self::Unavailable(_) => true,
            Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => false,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "employee store unavailable: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted employee data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for employee records.
pub trait EmployeeRepository {
    /// Persists a new employee and returns it with its assigned id.
    fn save(&self, draft: &EmployeeDraft) -> RepoResult<Employee>;
    /// Returns the filtered, ordered, offset/limit slice described by `query`.
    fn find_page(&self, query: &EmployeeQuery) -> RepoResult<Vec<Employee>>;
    /// Counts all rows matching `predicate`, ignoring paging.
    fn count(&self, predicate: &Predicate) -> RepoResult<u64>;
}

impl<R: EmployeeRepository + ?Sized> EmployeeRepository for &R {
    fn save(&self, draft: &EmployeeDraft) -> RepoResult<Employee> {
        (**self).save(draft)
    }

    fn find_page(&self, query: &EmployeeQuery) -> RepoResult<Vec<Employee>> {
        (**self).find_page(query)
    }

    fn count(&self, predicate: &Predicate) -> RepoResult<u64> {
        (**self).count(predicate)
    }
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not carry the employee table shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_employee_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn save(&self, draft: &EmployeeDraft) -> RepoResult<Employee> {
        self.conn.execute(
            "INSERT INTO employee (first_name, last_name) VALUES (?1, ?2);",
            params![draft.first_name(), draft.last_name()],
        )?;
        let id = self.conn.last_insert_rowid();

        Ok(draft.clone().into_employee(id))
    }

    fn find_page(&self, query: &EmployeeQuery) -> RepoResult<Vec<Employee>> {
        let filter = query.predicate().to_sql();
        let sql = format!(
            "SELECT id, first_name, last_name
             FROM employee
             WHERE {}
             ORDER BY {}
             LIMIT ? OFFSET ?;",
            filter.clause,
            query.order().sql()
        );

        let mut bind_values: Vec<Value> = filter.binds.into_iter().map(Value::Text).collect();
        bind_values.push(Value::Integer(to_sql_integer(query.limit())));
        bind_values.push(Value::Integer(to_sql_integer(query.offset())));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn count(&self, predicate: &Predicate) -> RepoResult<u64> {
        let filter = predicate.to_sql();
        let sql = format!("SELECT COUNT(*) FROM employee WHERE {};", filter.clause);

        let count: i64 = self.conn.query_row(
            &sql,
            params_from_iter(filter.binds.into_iter().map(Value::Text)),
            |row| row.get(0),
        )?;

        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative employee count `{count}`")))
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let id: i64 = row.get("id")?;
    if id <= 0 {
        return Err(RepoError::InvalidData(format!(
            "invalid id value `{id}` in employee.id"
        )));
    }

    Ok(Employee {
        id,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
    })
}

// SQLite integers are signed; validated queries never exceed i64::MAX.
fn to_sql_integer(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn ensure_employee_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, EMPLOYEE_TABLE)? {
        return Err(RepoError::MissingRequiredTable(EMPLOYEE_TABLE));
    }

    for column in EMPLOYEE_REQUIRED_COLUMNS {
        if !table_has_column(conn, EMPLOYEE_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: EMPLOYEE_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
