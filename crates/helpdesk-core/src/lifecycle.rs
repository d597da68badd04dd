//! Ticket lifecycle and access control
//!
//! [`HelpDesk`] owns the three stores and layers policy over them: the
//! stores are mechanism, this module decides who may do what. Every
//! operation takes a trusted [`Actor`] supplied by the presentation
//! layer; no authentication happens here.

use crate::report::{self, GeneralReport, SystemStats, TechnicianReport};
use crate::{
    ArticleIndex, Category, EmailPolicy, Error, Note, NoteDraft, Priority, Result, Role, Status,
    Ticket, TicketDraft, TicketStore, User, UserDirectory,
};
use std::collections::BTreeMap;

/// Who is asking. The core trusts this identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: u32,
    pub role: Role,
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Actor {
            id: user.id,
            role: user.role,
        }
    }
}

/// What a requester supplies when opening a ticket
#[derive(Debug, Clone)]
pub struct OpenTicket {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub urgent: bool,
    pub remote: bool,
}

/// The help-desk service: user directory, ticket store and knowledge
/// base, with the lifecycle rules on top. Constructed once at process
/// start and passed to the presentation layer; no global state.
pub struct HelpDesk {
    pub users: UserDirectory,
    pub tickets: TicketStore,
    pub kb: ArticleIndex,
}

impl HelpDesk {
    pub fn new(email_policy: EmailPolicy) -> Self {
        Self {
            users: UserDirectory::new(email_policy),
            tickets: TicketStore::new(),
            kb: ArticleIndex::new(),
        }
    }

    /// Open a ticket on behalf of the actor. The requester id is always
    /// the actor's own id, the department is copied from their user
    /// record, and the priority derives from the urgent flag.
    pub fn open_ticket(&mut self, actor: Actor, req: OpenTicket) -> Result<Ticket> {
        let requester = self.users.find(actor.id).ok_or(Error::UserNotFound(actor.id))?;

        let priority = if req.urgent {
            Priority::Urgent
        } else {
            Priority::Normal
        };

        Ok(self.tickets.create(TicketDraft {
            title: req.title,
            description: req.description,
            requester_id: requester.id,
            priority,
            category: req.category,
            department: requester.department,
            urgent: req.urgent,
            remote: req.remote,
        }))
    }

    /// Fetch one ticket. Requesters see only their own tickets; that
    /// failure is permission-denied, distinct from an unknown id.
    pub fn ticket_for(&self, actor: Actor, ticket_id: u32) -> Result<Ticket> {
        let ticket = self
            .tickets
            .get(ticket_id)
            .ok_or(Error::TicketNotFound(ticket_id))?;

        if actor.role == Role::Requester && ticket.requester_id != actor.id {
            return Err(Error::PermissionDenied(format!(
                "ticket {ticket_id} belongs to another requester"
            )));
        }
        Ok(ticket)
    }

    /// Tickets opened by the actor. Always keyed by the authenticated
    /// id, so a spoofed query id at the UI layer changes nothing.
    pub fn my_tickets(&self, actor: Actor) -> Vec<Ticket> {
        self.tickets.list_by_requester(actor.id)
    }

    /// Append a requester note to the actor's own ticket.
    pub fn add_note(&mut self, actor: Actor, ticket_id: u32, body: String) -> Result<Note> {
        let ticket = self
            .tickets
            .get(ticket_id)
            .ok_or(Error::TicketNotFound(ticket_id))?;

        if ticket.requester_id != actor.id {
            return Err(Error::PermissionDenied(format!(
                "ticket {ticket_id} belongs to another requester"
            )));
        }

        self.tickets.add_note(NoteDraft {
            ticket_id,
            author_id: actor.id,
            body,
            by_technician: false,
        })
    }

    /// Technician response. An unassigned ticket is assumed by the
    /// responder: assignment and the move to in_progress are applied as
    /// one update. A ticket that already has a technician keeps it. The
    /// response is appended as a technician note either way.
    pub fn respond(&mut self, actor: Actor, ticket_id: u32, body: String) -> Result<Ticket> {
        if actor.role != Role::Technician {
            return Err(Error::PermissionDenied(
                "only technicians respond to tickets".to_string(),
            ));
        }

        let mut ticket = self
            .tickets
            .get(ticket_id)
            .ok_or(Error::TicketNotFound(ticket_id))?;

        if ticket.technician_id.is_none() {
            ticket.technician_id = Some(actor.id);
            ticket.status = Status::InProgress;
            self.tickets.update(&ticket)?;
        }

        self.tickets.add_note(NoteDraft {
            ticket_id,
            author_id: actor.id,
            body,
            by_technician: true,
        })?;

        self.ticket_for(actor, ticket_id)
    }

    /// Set any of the five statuses directly, skipping states if the
    /// technician chooses to.
    pub fn set_status(&mut self, actor: Actor, ticket_id: u32, status: Status) -> Result<Ticket> {
        if actor.role != Role::Technician {
            return Err(Error::PermissionDenied(
                "only technicians change ticket status".to_string(),
            ));
        }

        let mut ticket = self
            .tickets
            .get(ticket_id)
            .ok_or(Error::TicketNotFound(ticket_id))?;
        ticket.status = status;
        self.tickets.update(&ticket)?;
        self.ticket_for(actor, ticket_id)
    }

    /// Finalize a ticket: only its assigned technician may, the duration
    /// must be positive, and the solution is recorded as a technician
    /// note. Status, resolution timestamp and duration land together.
    pub fn finalize(
        &mut self,
        actor: Actor,
        ticket_id: u32,
        solution: &str,
        minutes: u32,
    ) -> Result<Ticket> {
        let mut ticket = self
            .tickets
            .get(ticket_id)
            .ok_or(Error::TicketNotFound(ticket_id))?;

        if actor.role != Role::Technician || !ticket.is_assigned_to(actor.id) {
            return Err(Error::PermissionDenied(format!(
                "ticket {ticket_id} is not assigned to you"
            )));
        }
        if minutes == 0 {
            return Err(Error::InvalidDuration);
        }

        self.tickets.add_note(NoteDraft {
            ticket_id,
            author_id: actor.id,
            body: format!("SOLUTION: {solution}"),
            by_technician: true,
        })?;

        ticket.resolve(minutes);
        self.tickets.update(&ticket)?;
        self.ticket_for(actor, ticket_id)
    }

    /// The triage queue: every non-closed ticket, most pressing first.
    /// Priority descending, ties broken by age (oldest first).
    pub fn triage_queue(&self, actor: Actor) -> Result<Vec<Ticket>> {
        self.require_staff(actor, "the ticket queue")?;

        let mut queue: Vec<Ticket> = self
            .tickets
            .list()
            .into_iter()
            .filter(|t| t.status.is_active())
            .collect();
        queue.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| a.opened_at.cmp(&b.opened_at))
        });
        Ok(queue)
    }

    /// Tickets grouped by category, categories in enum order.
    pub fn tickets_by_category(&self, actor: Actor) -> Result<BTreeMap<Category, Vec<Ticket>>> {
        self.require_staff(actor, "category views")?;

        let mut groups: BTreeMap<Category, Vec<Ticket>> = BTreeMap::new();
        for ticket in self.tickets.list() {
            groups.entry(ticket.category).or_default().push(ticket);
        }
        Ok(groups)
    }

    /// The calling technician's own workload report.
    pub fn technician_report(&self, actor: Actor) -> Result<TechnicianReport> {
        if actor.role != Role::Technician {
            return Err(Error::PermissionDenied(
                "workload reports are for technicians".to_string(),
            ));
        }
        Ok(report::technician_report(
            &self.tickets.list_by_technician(actor.id),
        ))
    }

    /// Administrator headline report.
    pub fn general_report(&self, actor: Actor) -> Result<GeneralReport> {
        self.require_admin(actor)?;
        Ok(report::general_report(&self.users.list(), &self.tickets.list()))
    }

    /// Administrator distribution statistics.
    pub fn system_stats(&self, actor: Actor) -> Result<SystemStats> {
        self.require_admin(actor)?;
        Ok(report::system_stats(&self.tickets.list()))
    }

    fn require_staff(&self, actor: Actor, what: &str) -> Result<()> {
        match actor.role {
            Role::Technician | Role::Administrator => Ok(()),
            Role::Requester => Err(Error::PermissionDenied(format!(
                "{what} is restricted to technicians and administrators"
            ))),
        }
    }

    fn require_admin(&self, actor: Actor) -> Result<()> {
        if actor.role.is_administrator() {
            Ok(())
        } else {
            Err(Error::PermissionDenied(
                "reports are restricted to administrators".to_string(),
            ))
        }
    }
}

impl Default for HelpDesk {
    fn default() -> Self {
        Self::new(EmailPolicy::default())
    }
}
