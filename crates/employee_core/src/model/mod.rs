//! Domain model for employee records.
//!
//! # Responsibility
//! - Define the canonical employee record and its create payload.
//! - Define caller-facing search inputs (criteria, page request, sort).
//!
//! # Invariants
//! - Every persisted employee is identified by a store-assigned `EmployeeId`.
//! - Sort keys resolve to a closed `SortField` set, never to raw column text.

pub mod employee;
pub mod search;
