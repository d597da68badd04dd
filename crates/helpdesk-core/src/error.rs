//! Error types for helpdesk

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Ticket not found: {0}")]
    TicketNotFound(u32),

    #[error("User not found: {0}")]
    UserNotFound(u32),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Invalid department: {0}")]
    InvalidDepartment(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Resolution time must be a positive number of minutes")]
    InvalidDuration,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// True for the access-control failures, as opposed to lookups that
    /// found nothing. Callers message the two differently.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Error::PermissionDenied(_))
    }
}
