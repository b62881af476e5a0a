//! Employee domain model.
//!
//! # Responsibility
//! - Define the persisted employee record and its create payload.
//! - Apply the configurable required-field policy before persistence.
//!
//! # Invariants
//! - `id` is assigned by the store on first persist and never changes.
//! - An `EmployeeDraft` always satisfies the policy it was validated with.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned employee identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EmployeeId = i64;

/// Persisted employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Identifier generated by the store on insert.
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
}

/// Create payload as received from a caller.
///
/// Both fields are optional on the wire so that missing values surface as
/// validation errors instead of decode failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl NewEmployee {
    /// Convenience constructor for callers that already hold both names.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
        }
    }

    /// Checks required fields and returns a trimmed, persistable draft.
    ///
    /// # Contract
    /// - `None` and blank-after-trim values count as absent.
    /// - Absent optional fields become empty strings.
    /// - All missing required fields are reported at once, in declaration order.
    pub fn validate(
        &self,
        policy: &ValidationPolicy,
    ) -> Result<EmployeeDraft, EmployeeValidationError> {
        let first_name = normalize(self.first_name.as_deref());
        let last_name = normalize(self.last_name.as_deref());

        let mut missing = Vec::new();
        if policy.require_first_name && first_name.is_none() {
            missing.push("firstName");
        }
        if policy.require_last_name && last_name.is_none() {
            missing.push("lastName");
        }
        if !missing.is_empty() {
            return Err(EmployeeValidationError::MissingRequiredFields(missing));
        }

        Ok(EmployeeDraft {
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
        })
    }
}

/// Validated employee that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
}

impl EmployeeDraft {
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Attaches the store-assigned id.
    pub(crate) fn into_employee(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

/// Which create-payload fields must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationPolicy {
    pub require_first_name: bool,
    pub require_last_name: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            require_first_name: true,
            require_last_name: true,
        }
    }
}

/// Create-payload validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    /// Wire names of every required field that was absent or blank.
    MissingRequiredFields(Vec<&'static str>),
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredFields(fields) => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
        }
    }
}

impl Error for EmployeeValidationError {}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}
