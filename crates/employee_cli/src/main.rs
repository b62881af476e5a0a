//! Command-line entry point for the employee backend.
//!
//! # Responsibility
//! - Open (and migrate) the SQLite database named by `--db`.
//! - Route `add` / `list` subcommands to `EmployeeService`.
//! - Print results as JSON on stdout and failures on stderr.

use clap::{Parser, Subcommand};
use employee_core::db::open_db;
use employee_core::model::search::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY};
use employee_core::{
    default_log_level, init_logging_with, EmployeePage, EmployeeSearchCriteria, EmployeeService,
    LoggingConfig, LoggingError, NewEmployee, RepoError, ServiceError, SortDirection,
    SqliteEmployeeRepository,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// `employees` command arguments.
#[derive(Debug, Parser)]
#[command(name = "employees", about = "Create and list employee records", version)]
struct Cli {
    /// SQLite database file; created and migrated on first use.
    #[arg(long, env = "EMPLOYEES_DB", default_value = "employees.sqlite3", global = true)]
    db: PathBuf,
    /// Log level (trace|debug|info|warn|error).
    #[arg(long, value_name = "level", global = true)]
    log_level: Option<String>,
    /// Directory for rolling log files. Logging stays off when omitted.
    #[arg(long, value_name = "dir", global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add one employee and print the stored record.
    Add {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
    /// Print one page of employees matching the optional name filters.
    List {
        /// Case-sensitive substring of the first name.
        #[arg(long)]
        first_name: Option<String>,
        /// Case-sensitive substring of the last name.
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long, default_value_t = DEFAULT_PAGE_NUMBER, allow_negative_numbers = true)]
        page_number: i64,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, allow_negative_numbers = true)]
        page_size: i64,
        /// One of id, firstName, lastName.
        #[arg(long, default_value = DEFAULT_SORT_BY)]
        sort_by: String,
        /// asc or desc.
        #[arg(long, default_value_t = SortDirection::Asc)]
        sort_direction: SortDirection,
    },
}

#[derive(Debug)]
enum CliError {
    Logging(LoggingError),
    Service(ServiceError),
    Io(io::Error),
    Output(serde_json::Error),
}

impl CliError {
    fn code(&self) -> &'static str {
        match self {
            Self::Logging(_) => "logging_error",
            Self::Service(err) => err.code(),
            Self::Io(_) => "io_error",
            Self::Output(_) => "output_error",
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "{err}"),
            Self::Service(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Output(err) => write!(f, "failed to encode output: {err}"),
        }
    }
}

impl Error for CliError {}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<ServiceError> for CliError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Service(ServiceError::from(value))
    }
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error[{}]: {err}", err.code());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        let log_dir = if log_dir.is_absolute() {
            log_dir.clone()
        } else {
            std::env::current_dir()?.join(log_dir)
        };
        init_logging_with(LoggingConfig::new(level, &log_dir.to_string_lossy())?)?;
        info!(
            "event=cli_start module=cli status=ok version={}",
            employee_core::core_version()
        );
    }

    let conn = open_db(&cli.db).map_err(RepoError::from)?;
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn)?);

    let output = match cli.command {
        Command::Add {
            first_name,
            last_name,
        } => {
            let saved = service.add_employee(&NewEmployee {
                first_name,
                last_name,
            })?;
            serde_json::to_string_pretty(&saved)?
        }
        Command::List {
            first_name,
            last_name,
            page_number,
            page_size,
            sort_by,
            sort_direction,
        } => {
            let page = EmployeePage::new(page_number, page_size, &sort_by, sort_direction);
            let criteria = EmployeeSearchCriteria {
                first_name,
                last_name,
            };
            let result = service.list_employees(&page, &criteria)?;
            serde_json::to_string_pretty(&result)?
        }
    };

    println!("{output}");
    Ok(())
}
