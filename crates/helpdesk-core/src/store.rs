//! In-memory ticket store
//!
//! Owns all ticket and note records and is their only writer. Notes are
//! kept in their own collection and attached to tickets on every read,
//! ordered by creation.

use crate::{Error, Note, NoteDraft, Result, Status, Ticket, TicketDraft};
use chrono::Utc;

/// In-memory store for tickets and their notes
pub struct TicketStore {
    tickets: Vec<Ticket>,
    notes: Vec<Note>,
    next_ticket_id: u32,
    next_note_id: u32,
}

impl Default for TicketStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketStore {
    pub fn new() -> Self {
        Self {
            tickets: Vec::new(),
            notes: Vec::new(),
            next_ticket_id: 1,
            next_note_id: 1,
        }
    }

    /// Create a ticket from a draft. Assigns the next sequential id,
    /// status open, no technician, no notes.
    pub fn create(&mut self, draft: TicketDraft) -> Ticket {
        let ticket = Ticket {
            id: self.next_ticket_id,
            title: draft.title,
            description: draft.description,
            requester_id: draft.requester_id,
            technician_id: None,
            status: Status::Open,
            priority: draft.priority,
            category: draft.category,
            department: draft.department,
            urgent: draft.urgent,
            remote: draft.remote,
            opened_at: Utc::now(),
            resolved_at: None,
            resolution_minutes: None,
            notes: Vec::new(),
        };
        self.next_ticket_id += 1;
        self.tickets.push(ticket.clone());
        ticket
    }

    /// Get a ticket by id, notes attached in creation order.
    pub fn get(&self, id: u32) -> Option<Ticket> {
        self.tickets.iter().find(|t| t.id == id).map(|t| self.attach(t))
    }

    /// All tickets, insertion order, notes attached.
    pub fn list(&self) -> Vec<Ticket> {
        self.tickets.iter().map(|t| self.attach(t)).collect()
    }

    /// Tickets opened by the given user.
    pub fn list_by_requester(&self, user_id: u32) -> Vec<Ticket> {
        self.tickets
            .iter()
            .filter(|t| t.requester_id == user_id)
            .map(|t| self.attach(t))
            .collect()
    }

    /// Tickets assigned to the given technician.
    pub fn list_by_technician(&self, user_id: u32) -> Vec<Ticket> {
        self.tickets
            .iter()
            .filter(|t| t.technician_id == Some(user_id))
            .map(|t| self.attach(t))
            .collect()
    }

    /// Replace the mutable fields (status, technician, resolution data)
    /// of the stored ticket matched by id. Applies all four as one unit;
    /// unknown ids leave the store untouched.
    pub fn update(&mut self, ticket: &Ticket) -> Result<()> {
        let existing = self
            .tickets
            .iter_mut()
            .find(|t| t.id == ticket.id)
            .ok_or(Error::TicketNotFound(ticket.id))?;

        existing.status = ticket.status;
        existing.technician_id = ticket.technician_id;
        existing.resolved_at = ticket.resolved_at;
        existing.resolution_minutes = ticket.resolution_minutes;
        Ok(())
    }

    /// Append a note to an existing ticket. Assigns the next sequential
    /// note id and stamps it with the current time.
    pub fn add_note(&mut self, draft: NoteDraft) -> Result<Note> {
        if !self.tickets.iter().any(|t| t.id == draft.ticket_id) {
            return Err(Error::TicketNotFound(draft.ticket_id));
        }

        let note = Note {
            id: self.next_note_id,
            ticket_id: draft.ticket_id,
            author_id: draft.author_id,
            body: draft.body,
            created_at: Utc::now(),
            by_technician: draft.by_technician,
        };
        self.next_note_id += 1;
        self.notes.push(note.clone());
        Ok(note)
    }

    fn attach(&self, ticket: &Ticket) -> Ticket {
        let mut ticket = ticket.clone();
        let mut notes: Vec<Note> = self
            .notes
            .iter()
            .filter(|n| n.ticket_id == ticket.id)
            .cloned()
            .collect();
        // id order breaks ties between equal timestamps
        notes.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        ticket.notes = notes;
        ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Department, Priority};

    fn draft(requester_id: u32, priority: Priority) -> TicketDraft {
        TicketDraft {
            title: "Screen flickers".to_string(),
            description: "External monitor flickers every few seconds".to_string(),
            requester_id,
            priority,
            category: Category::Hardware,
            department: Department::Sales,
            urgent: false,
            remote: false,
        }
    }

    #[test]
    fn create_assigns_sequential_ids_and_defaults() {
        let mut store = TicketStore::new();
        let a = store.create(draft(1, Priority::Normal));
        let b = store.create(draft(2, Priority::High));

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.status, Status::Open);
        assert_eq!(a.technician_id, None);
        assert!(a.notes.is_empty());
        assert!(a.resolved_at.is_none());
    }

    #[test]
    fn update_replaces_only_mutable_fields() {
        let mut store = TicketStore::new();
        let mut t = store.create(draft(1, Priority::Normal));

        t.title = "hijacked".to_string();
        t.status = Status::Waiting;
        t.technician_id = Some(9);
        store.update(&t).unwrap();

        let stored = store.get(t.id).unwrap();
        assert_eq!(stored.status, Status::Waiting);
        assert_eq!(stored.technician_id, Some(9));
        // Title is not part of the update surface.
        assert_eq!(stored.title, "Screen flickers");
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut store = TicketStore::new();
        let t = store.create(draft(1, Priority::Normal));
        let mut ghost = t.clone();
        ghost.id = 42;

        let err = store.update(&ghost).unwrap_err();
        assert!(matches!(err, Error::TicketNotFound(42)));
    }

    #[test]
    fn notes_attach_in_creation_order() {
        let mut store = TicketStore::new();
        let t = store.create(draft(1, Priority::Normal));

        for body in ["first", "second", "third"] {
            store
                .add_note(NoteDraft {
                    ticket_id: t.id,
                    author_id: 1,
                    body: body.to_string(),
                    by_technician: false,
                })
                .unwrap();
        }

        let stored = store.get(t.id).unwrap();
        let bodies: Vec<&str> = stored.notes.iter().map(|n| n.body.as_str()).collect();
        assert_eq!(bodies, vec!["first", "second", "third"]);
        let ids: Vec<u32> = stored.notes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn note_on_unknown_ticket_is_not_found() {
        let mut store = TicketStore::new();
        let err = store
            .add_note(NoteDraft {
                ticket_id: 7,
                author_id: 1,
                body: "hello".to_string(),
                by_technician: false,
            })
            .unwrap_err();
        assert!(matches!(err, Error::TicketNotFound(7)));
    }

    #[test]
    fn filters_by_requester_and_technician() {
        let mut store = TicketStore::new();
        let a = store.create(draft(1, Priority::Normal));
        store.create(draft(2, Priority::Normal));
        let mut c = store.create(draft(1, Priority::High));

        c.technician_id = Some(5);
        store.update(&c).unwrap();

        let mine = store.list_by_requester(1);
        assert_eq!(
            mine.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![a.id, c.id]
        );

        let assigned = store.list_by_technician(5);
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].id, c.id);
        assert!(store.list_by_technician(6).is_empty());
    }
}
