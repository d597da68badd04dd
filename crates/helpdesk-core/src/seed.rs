//! Demo dataset
//!
//! A small, self-consistent population so the program is usable the
//! moment it starts: one administrator, two technicians, two requesters,
//! three knowledge articles and two tickets (one untouched, one already
//! being worked).

use crate::{
    ArticleDraft, Category, Department, HelpDesk, Priority, Result, Role, Status, TicketDraft,
};

/// Accounts worth knowing when exploring the demo data.
pub const DEMO_ADMIN_EMAIL: &str = "admin@company.com";
pub const DEMO_TECHNICIAN_EMAIL: &str = "john.reeves@company.com";
pub const DEMO_REQUESTER_EMAIL: &str = "carl@company.com";

/// Populate an empty desk with the demo dataset.
pub fn demo_data(desk: &mut HelpDesk) -> Result<()> {
    let _admin = desk.users.register(
        "System Administrator",
        DEMO_ADMIN_EMAIL,
        Role::Administrator,
        Department::It,
    )?;
    let john = desk.users.register(
        "John Reeves",
        DEMO_TECHNICIAN_EMAIL,
        Role::Technician,
        Department::It,
    )?;
    let _maria = desk.users.register(
        "Maria Soto",
        "maria.soto@company.com",
        Role::Technician,
        Department::It,
    )?;
    let carl = desk.users.register(
        "Carl Stevens",
        DEMO_REQUESTER_EMAIL,
        Role::Requester,
        Department::Sales,
    )?;
    let anna = desk
        .users
        .register("Anna Reed", "anna@company.com", Role::Requester, Department::Hr)?;

    desk.kb.create(ArticleDraft {
        title: "Fixing common printing problems".to_string(),
        content: "1. Check the printer is powered on\n\
                  2. Check the connection cables\n\
                  3. Inspect the print queue\n\
                  4. Restart the print spooler"
            .to_string(),
        category: Category::Printer,
        keywords: ["printer", "print", "paper", "toner"]
            .map(String::from)
            .to_vec(),
    });
    desk.kb.create(ArticleDraft {
        title: "Internet connection problems".to_string(),
        content: "1. Check the network cable\n\
                  2. Ping the gateway\n\
                  3. Check the IP configuration\n\
                  4. Restart the network adapter"
            .to_string(),
        category: Category::Network,
        keywords: ["internet", "network", "connection", "ip"]
            .map(String::from)
            .to_vec(),
    });
    desk.kb.create(ArticleDraft {
        title: "Recovering your email password".to_string(),
        content: "1. Open the recovery portal\n\
                  2. Enter your corporate email\n\
                  3. Check the recovery inbox\n\
                  4. Set a new password"
            .to_string(),
        category: Category::Email,
        keywords: ["email", "password", "outlook", "reset"]
            .map(String::from)
            .to_vec(),
    });

    desk.tickets.create(TicketDraft {
        title: "Computer won't turn on".to_string(),
        description: "My workstation has not powered on since yesterday".to_string(),
        requester_id: carl.id,
        priority: Priority::High,
        category: Category::Hardware,
        department: carl.department,
        urgent: true,
        remote: false,
    });

    let mut in_progress = desk.tickets.create(TicketDraft {
        title: "Cannot access my email".to_string(),
        description: "I forgot my Outlook password".to_string(),
        requester_id: anna.id,
        priority: Priority::Normal,
        category: Category::Email,
        department: anna.department,
        urgent: false,
        remote: true,
    });
    in_progress.technician_id = Some(john.id);
    in_progress.status = Status::InProgress;
    desk.tickets.update(&in_progress)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Actor, EmailPolicy};

    #[test]
    fn demo_data_populates_the_desk() {
        let mut desk = HelpDesk::new(EmailPolicy::Unique);
        demo_data(&mut desk).unwrap();

        assert_eq!(desk.users.len(), 5);
        assert_eq!(desk.kb.len(), 3);
        assert_eq!(desk.tickets.list().len(), 2);

        let john = desk.users.find_by_email(DEMO_TECHNICIAN_EMAIL).unwrap();
        let assigned = desk.tickets.list_by_technician(john.id);
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].status, Status::InProgress);

        // The demo technician can pick up the open hardware ticket.
        let open = desk
            .triage_queue(Actor::from(&john))
            .unwrap()
            .into_iter()
            .find(|t| t.status == Status::Open)
            .unwrap();
        assert_eq!(open.title, "Computer won't turn on");
        assert_eq!(open.department, Department::Sales);
    }
}
