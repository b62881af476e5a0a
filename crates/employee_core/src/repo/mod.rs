//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the employee storage contract used by the query builder.
//! - Isolate SQLite details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`InvalidData`, schema guards)
//!   in addition to store transport errors.

pub mod employee_repo;
pub mod memory;
