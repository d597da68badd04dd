//! Ticket and note data model for helpdesk
//!
//! A ticket moves through the status lifecycle; its history is an
//! append-only sequence of notes.

use crate::user::Department;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ticket status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Open,
    InProgress,
    Waiting,
    Resolved,
    Closed,
}

impl Status {
    /// All statuses, in menu order.
    pub const ALL: [Status; 5] = [
        Status::Open,
        Status::InProgress,
        Status::Waiting,
        Status::Resolved,
        Status::Closed,
    ];

    pub fn is_closed(&self) -> bool {
        matches!(self, Status::Closed)
    }

    /// Still on a technician's plate: anything not closed. Resolved
    /// tickets stay visible in the queue until closed.
    pub fn is_active(&self) -> bool {
        !self.is_closed()
    }
}

impl std::str::FromStr for Status {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Status::Open),
            "in_progress" | "in-progress" | "inprogress" => Ok(Status::InProgress),
            "waiting" => Ok(Status::Waiting),
            "resolved" => Ok(Status::Resolved),
            "closed" => Ok(Status::Closed),
            _ => Err(crate::Error::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Open => write!(f, "open"),
            Status::InProgress => write!(f, "in_progress"),
            Status::Waiting => write!(f, "waiting"),
            Status::Resolved => write!(f, "resolved"),
            Status::Closed => write!(f, "closed"),
        }
    }
}

/// Ticket priority, ordered from least to most pressing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    /// All priorities, in menu order.
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Normal,
        Priority::High,
        Priority::Urgent,
    ];
}

impl std::str::FromStr for Priority {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(crate::Error::InvalidPriority(s.to_string())),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Normal => write!(f, "normal"),
            Priority::High => write!(f, "high"),
            Priority::Urgent => write!(f, "urgent"),
        }
    }
}

/// Ticket category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Hardware,
    Software,
    Network,
    Email,
    Printer,
    System,
    #[default]
    Other,
}

impl Category {
    /// All categories, in menu order.
    pub const ALL: [Category; 7] = [
        Category::Hardware,
        Category::Software,
        Category::Network,
        Category::Email,
        Category::Printer,
        Category::System,
        Category::Other,
    ];
}

impl std::str::FromStr for Category {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hardware" => Ok(Category::Hardware),
            "software" => Ok(Category::Software),
            "network" => Ok(Category::Network),
            "email" => Ok(Category::Email),
            "printer" => Ok(Category::Printer),
            "system" => Ok(Category::System),
            "other" => Ok(Category::Other),
            _ => Err(crate::Error::InvalidCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Hardware => write!(f, "hardware"),
            Category::Software => write!(f, "software"),
            Category::Network => write!(f, "network"),
            Category::Email => write!(f, "email"),
            Category::Printer => write!(f, "printer"),
            Category::System => write!(f, "system"),
            Category::Other => write!(f, "other"),
        }
    }
}

/// A note attached to a ticket
///
/// Immutable once stored; notes are only ever appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned identifier
    pub id: u32,

    /// The ticket this note belongs to
    pub ticket_id: u32,

    /// Who wrote the note
    pub author_id: u32,

    /// The note text
    pub body: String,

    /// When the note was created
    pub created_at: DateTime<Utc>,

    /// True for technician responses, false for requester notes
    pub by_technician: bool,
}

/// Fields the caller supplies when appending a note
#[derive(Debug, Clone)]
pub struct NoteDraft {
    pub ticket_id: u32,
    pub author_id: u32,
    pub body: String,
    pub by_technician: bool,
}

/// Core ticket record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Store-assigned identifier
    pub id: u32,

    /// Short summary
    pub title: String,

    /// What the requester reported
    pub description: String,

    /// The user who opened the ticket
    pub requester_id: u32,

    /// The technician working the ticket, once one has responded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician_id: Option<u32>,

    /// Current status
    pub status: Status,

    /// Priority used for triage ordering
    pub priority: Priority,

    /// Problem category
    pub category: Category,

    /// Department, copied from the requester at creation
    pub department: Department,

    /// Flagged urgent by the requester
    pub urgent: bool,

    /// Remote assistance is possible
    pub remote: bool,

    /// When the ticket was opened
    pub opened_at: DateTime<Utc>,

    /// When the ticket was resolved; set together with the duration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,

    /// How long resolution took, in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_minutes: Option<u32>,

    /// Attached notes, creation order; populated on reads
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
}

impl Ticket {
    pub fn is_assigned_to(&self, user_id: u32) -> bool {
        self.technician_id == Some(user_id)
    }

    /// Mark as resolved. Timestamp and duration are set together, here
    /// and nowhere else.
    pub fn resolve(&mut self, minutes: u32) {
        self.status = Status::Resolved;
        self.resolved_at = Some(Utc::now());
        self.resolution_minutes = Some(minutes);
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} [{}] [{}] {} - {}",
            self.id, self.priority, self.category, self.status, self.title
        )
    }
}

/// Fields the caller supplies when creating a ticket
#[derive(Debug, Clone)]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
    pub requester_id: u32,
    pub priority: Priority,
    pub category: Category,
    pub department: Department,
    pub urgent: bool,
    pub remote: bool,
}
