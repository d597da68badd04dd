//! Aggregate reporting over the current collections
//!
//! Pure functions, recomputed on demand; nothing here is cached or
//! stored. Averages over zero resolved tickets are `None`, never `0.0`,
//! so callers can suppress the line instead of printing a fake zero.

use crate::{Category, Department, Priority, Status, Ticket, User};
use serde::Serialize;
use std::collections::BTreeMap;

/// Ticket counts keyed by status.
pub fn count_by_status(tickets: &[Ticket]) -> BTreeMap<Status, usize> {
    let mut counts = BTreeMap::new();
    for t in tickets {
        *counts.entry(t.status).or_insert(0) += 1;
    }
    counts
}

/// Ticket counts keyed by category.
pub fn count_by_category(tickets: &[Ticket]) -> BTreeMap<Category, usize> {
    let mut counts = BTreeMap::new();
    for t in tickets {
        *counts.entry(t.category).or_insert(0) += 1;
    }
    counts
}

/// Ticket counts keyed by priority.
pub fn count_by_priority(tickets: &[Ticket]) -> BTreeMap<Priority, usize> {
    let mut counts = BTreeMap::new();
    for t in tickets {
        *counts.entry(t.priority).or_insert(0) += 1;
    }
    counts
}

/// Ticket counts keyed by department.
pub fn count_by_department(tickets: &[Ticket]) -> BTreeMap<Department, usize> {
    let mut counts = BTreeMap::new();
    for t in tickets {
        *counts.entry(t.department).or_insert(0) += 1;
    }
    counts
}

/// Mean resolution duration over tickets that carry one. `None` when no
/// ticket has been finalized yet.
pub fn average_resolution_minutes(tickets: &[Ticket]) -> Option<f64> {
    let durations: Vec<u32> = tickets.iter().filter_map(|t| t.resolution_minutes).collect();
    if durations.is_empty() {
        return None;
    }
    let total: f64 = durations.iter().map(|&m| f64::from(m)).sum();
    Some(total / durations.len() as f64)
}

/// One technician's workload summary
#[derive(Debug, Clone, Serialize)]
pub struct TechnicianReport {
    pub total_assigned: usize,
    pub resolved: usize,
    pub in_progress: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_resolution_minutes: Option<f64>,
}

/// Summarize the tickets assigned to one technician.
pub fn technician_report(assigned: &[Ticket]) -> TechnicianReport {
    TechnicianReport {
        total_assigned: assigned.len(),
        resolved: assigned.iter().filter(|t| t.status == Status::Resolved).count(),
        in_progress: assigned
            .iter()
            .filter(|t| t.status == Status::InProgress)
            .count(),
        average_resolution_minutes: average_resolution_minutes(assigned),
    }
}

/// System-wide headline numbers for administrators
#[derive(Debug, Clone, Serialize)]
pub struct GeneralReport {
    pub total_users: usize,
    pub total_technicians: usize,
    pub total_tickets: usize,
    pub open_tickets: usize,
    pub resolved_tickets: usize,
    pub urgent_tickets: usize,
    pub by_department: BTreeMap<Department, usize>,
}

/// Compute the administrator's general report.
pub fn general_report(users: &[User], tickets: &[Ticket]) -> GeneralReport {
    GeneralReport {
        total_users: users.len(),
        total_technicians: users.iter().filter(|u| u.role.is_technician()).count(),
        total_tickets: tickets.len(),
        open_tickets: tickets.iter().filter(|t| t.status == Status::Open).count(),
        resolved_tickets: tickets.iter().filter(|t| t.status == Status::Resolved).count(),
        urgent_tickets: tickets.iter().filter(|t| t.urgent).count(),
        by_department: count_by_department(tickets),
    }
}

/// Distribution statistics for administrators
#[derive(Debug, Clone, Serialize)]
pub struct SystemStats {
    pub by_category: BTreeMap<Category, usize>,
    pub by_priority: BTreeMap<Priority, usize>,
    pub by_status: BTreeMap<Status, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_resolution_minutes: Option<f64>,
}

/// Compute the administrator's system statistics.
pub fn system_stats(tickets: &[Ticket]) -> SystemStats {
    SystemStats {
        by_category: count_by_category(tickets),
        by_priority: count_by_priority(tickets),
        by_status: count_by_status(tickets),
        average_resolution_minutes: average_resolution_minutes(tickets),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TicketDraft, TicketStore};

    fn ticket(priority: Priority, category: Category, department: Department) -> Ticket {
        let mut store = TicketStore::new();
        store.create(TicketDraft {
            title: "t".to_string(),
            description: "d".to_string(),
            requester_id: 1,
            priority,
            category,
            department,
            urgent: false,
            remote: false,
        })
    }

    #[test]
    fn average_is_none_without_resolved_tickets() {
        let tickets = vec![
            ticket(Priority::Normal, Category::Hardware, Department::It),
            ticket(Priority::High, Category::Email, Department::Hr),
        ];
        assert_eq!(average_resolution_minutes(&tickets), None);
        assert_eq!(average_resolution_minutes(&[]), None);
    }

    #[test]
    fn average_is_mean_of_set_durations() {
        let mut a = ticket(Priority::Normal, Category::Hardware, Department::It);
        let mut b = ticket(Priority::Normal, Category::Hardware, Department::It);
        let c = ticket(Priority::Normal, Category::Hardware, Department::It);
        a.resolve(30);
        b.resolve(60);

        let avg = average_resolution_minutes(&[a, b, c]).unwrap();
        assert!((avg - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn technician_report_counts_states() {
        let mut resolved = ticket(Priority::Normal, Category::Hardware, Department::It);
        resolved.resolve(45);
        let mut working = ticket(Priority::High, Category::Email, Department::Hr);
        working.status = Status::InProgress;
        let waiting = {
            let mut t = ticket(Priority::Low, Category::Other, Department::General);
            t.status = Status::Waiting;
            t
        };

        let report = technician_report(&[resolved, working, waiting]);
        assert_eq!(report.total_assigned, 3);
        assert_eq!(report.resolved, 1);
        assert_eq!(report.in_progress, 1);
        assert_eq!(report.average_resolution_minutes, Some(45.0));
    }

    #[test]
    fn counts_group_by_key() {
        let tickets = vec![
            ticket(Priority::Urgent, Category::Printer, Department::Sales),
            ticket(Priority::Urgent, Category::Printer, Department::It),
            ticket(Priority::Low, Category::Email, Department::It),
        ];

        let by_priority = count_by_priority(&tickets);
        assert_eq!(by_priority.get(&Priority::Urgent), Some(&2));
        assert_eq!(by_priority.get(&Priority::Low), Some(&1));
        assert_eq!(by_priority.get(&Priority::Normal), None);

        let by_department = count_by_department(&tickets);
        assert_eq!(by_department.get(&Department::It), Some(&2));
        assert_eq!(by_department.get(&Department::Sales), Some(&1));
    }
}
