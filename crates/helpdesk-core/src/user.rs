//! User data model for helpdesk
//!
//! Users carry the role that gates every ticket operation and the
//! department that new tickets inherit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Requester,
    Technician,
    Administrator,
}

impl Role {
    pub fn is_technician(&self) -> bool {
        matches!(self, Role::Technician)
    }

    pub fn is_administrator(&self) -> bool {
        matches!(self, Role::Administrator)
    }
}

impl std::str::FromStr for Role {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "requester" | "user" => Ok(Role::Requester),
            "technician" | "tech" => Ok(Role::Technician),
            "administrator" | "admin" => Ok(Role::Administrator),
            _ => Err(crate::Error::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Requester => write!(f, "requester"),
            Role::Technician => write!(f, "technician"),
            Role::Administrator => write!(f, "administrator"),
        }
    }
}

/// Company department
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    It,
    Hr,
    Finance,
    Sales,
    Production,
    #[default]
    General,
}

impl Department {
    /// All departments, in menu order.
    pub const ALL: [Department; 6] = [
        Department::It,
        Department::Hr,
        Department::Finance,
        Department::Sales,
        Department::Production,
        Department::General,
    ];
}

impl std::str::FromStr for Department {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "it" => Ok(Department::It),
            "hr" => Ok(Department::Hr),
            "finance" => Ok(Department::Finance),
            "sales" => Ok(Department::Sales),
            "production" => Ok(Department::Production),
            "general" => Ok(Department::General),
            _ => Err(crate::Error::InvalidDepartment(s.to_string())),
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Department::It => write!(f, "it"),
            Department::Hr => write!(f, "hr"),
            Department::Finance => write!(f, "finance"),
            Department::Sales => write!(f, "sales"),
            Department::Production => write!(f, "production"),
            Department::General => write!(f, "general"),
        }
    }
}

/// Core user record
///
/// Immutable after registration; the directory never deletes users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Directory-assigned identifier
    pub id: u32,

    /// Full name
    pub name: String,

    /// Login email, matched case-insensitively
    pub email: String,

    /// Role deciding which operations are permitted
    pub role: Role,

    /// Department inherited by tickets this user opens
    pub department: Department,

    /// When the user was registered
    pub registered_at: DateTime<Utc>,
}
