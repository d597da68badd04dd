//! Interactive menu session
//!
//! Line-oriented menus, one per role, over a single in-memory desk. The
//! signed-in user becomes the `Actor` passed to every lifecycle call;
//! permission and not-found failures print and return to the menu.

use anyhow::Result;
use colored::{ColoredString, Colorize};
use helpdesk_core::{
    Actor, Category, Config, Department, HelpDesk, OpenTicket, Role, Status, Ticket, User, seed,
};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};

enum Flow {
    Stay,
    Logout,
    Exit,
}

pub fn run(config_path: Option<&Path>, no_seed: bool) -> Result<()> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path()?,
    };
    let config = Config::load(&path)?;
    if !config.display.colors {
        colored::control::set_override(false);
    }

    let mut desk = HelpDesk::new(config.email_policy());
    if config.seed_demo_data && !no_seed {
        seed::demo_data(&mut desk)?;
        tracing::info!("demo dataset loaded");
        println!(
            "Demo data loaded. Try signing in as {}, {} or {}.",
            seed::DEMO_REQUESTER_EMAIL.cyan(),
            seed::DEMO_TECHNICIAN_EMAIL.cyan(),
            seed::DEMO_ADMIN_EMAIL.cyan()
        );
    }

    Session {
        desk,
        signed_in: None,
        config,
    }
    .run()
}

struct Session {
    desk: HelpDesk,
    signed_in: Option<User>,
    config: Config,
}

impl Session {
    fn run(&mut self) -> Result<()> {
        loop {
            let flow = match self.signed_in.clone() {
                None => self.login_menu()?,
                Some(user) => match user.role {
                    Role::Requester => self.requester_menu(&user)?,
                    Role::Technician => self.technician_menu(&user)?,
                    Role::Administrator => self.admin_menu(&user)?,
                },
            };
            match flow {
                Flow::Exit => break,
                Flow::Logout => self.signed_in = None,
                Flow::Stay => {}
            }
        }
        println!("Bye.");
        Ok(())
    }

    // --- menus ---

    fn login_menu(&mut self) -> Result<Flow> {
        println!();
        println!("{}", "HELP DESK - sign in".bold());
        println!("1 - Log in");
        println!("2 - Register");
        println!("0 - Exit");

        match prompt("Choose an option")?.as_str() {
            "1" => self.log_in()?,
            "2" => self.register()?,
            "0" => return Ok(Flow::Exit),
            _ => println!("{} Invalid option", "!".yellow()),
        }
        Ok(Flow::Stay)
    }

    fn requester_menu(&mut self, user: &User) -> Result<Flow> {
        println!();
        println!("{}", format!("REQUESTER - {}", user.name).bold());
        println!("1 - Open a ticket");
        println!("2 - My tickets");
        println!("3 - Track a ticket");
        println!("4 - Add a note");
        println!("5 - Search the knowledge base");
        println!("9 - Log out");
        println!("0 - Exit");

        let actor = Actor::from(user);
        match prompt("Choose an option")?.as_str() {
            "1" => print_outcome(self.open_ticket(actor)),
            "2" => print_outcome(self.my_tickets(actor)),
            "3" => print_outcome(self.track_ticket(actor)),
            "4" => print_outcome(self.add_note(actor)),
            "5" => print_outcome(self.search_articles()),
            "9" => return Ok(Flow::Logout),
            "0" => return Ok(Flow::Exit),
            _ => println!("{} Invalid option", "!".yellow()),
        }
        Ok(Flow::Stay)
    }

    fn technician_menu(&mut self, user: &User) -> Result<Flow> {
        println!();
        println!("{}", format!("TECHNICIAN - {}", user.name).bold());
        println!("1 - Ticket queue");
        println!("2 - Respond to a ticket");
        println!("3 - Change ticket status");
        println!("4 - Finalize a ticket");
        println!("5 - Tickets by category");
        println!("6 - My workload report");
        println!("9 - Log out");
        println!("0 - Exit");

        let actor = Actor::from(user);
        match prompt("Choose an option")?.as_str() {
            "1" => print_outcome(self.queue(actor)),
            "2" => print_outcome(self.respond(actor)),
            "3" => print_outcome(self.change_status(actor)),
            "4" => print_outcome(self.finalize(actor)),
            "5" => print_outcome(self.by_category(actor)),
            "6" => print_outcome(self.my_report(actor)),
            "9" => return Ok(Flow::Logout),
            "0" => return Ok(Flow::Exit),
            _ => println!("{} Invalid option", "!".yellow()),
        }
        Ok(Flow::Stay)
    }

    fn admin_menu(&mut self, user: &User) -> Result<Flow> {
        println!();
        println!("{}", format!("ADMINISTRATOR - {}", user.name).bold());
        println!("1 - Users");
        println!("2 - General report");
        println!("3 - Knowledge articles");
        println!("4 - System statistics");
        println!("9 - Log out");
        println!("0 - Exit");

        let actor = Actor::from(user);
        match prompt("Choose an option")?.as_str() {
            "1" => print_outcome(self.users()),
            "2" => print_outcome(self.general(actor)),
            "3" => print_outcome(self.articles()),
            "4" => print_outcome(self.stats(actor)),
            "9" => return Ok(Flow::Logout),
            "0" => return Ok(Flow::Exit),
            _ => println!("{} Invalid option", "!".yellow()),
        }
        Ok(Flow::Stay)
    }

    // --- sign in ---

    fn log_in(&mut self) -> Result<()> {
        let email = prompt("Email")?;
        match self.desk.users.find_by_email(&email) {
            Some(user) => {
                println!("{} Welcome, {}", "✓".green(), user.name);
                tracing::info!("user {} signed in", user.id);
                self.signed_in = Some(user);
            }
            None => println!("{} No account registered for {}", "!".yellow(), email),
        }
        Ok(())
    }

    fn register(&mut self) -> Result<()> {
        println!("{}", "Register".bold());
        let name = prompt("Name")?;
        let email = prompt("Email")?;
        let role = choose("Role", &[Role::Requester, Role::Technician])?;
        let department = choose("Department", &Department::ALL)?;

        match self.desk.users.register(&name, &email, role, department) {
            Ok(user) => {
                println!("{} Registered {} with id {}", "✓".green(), user.name, user.id);
                tracing::info!("user {} registered as {}", user.id, user.role);
                self.signed_in = Some(user);
            }
            Err(err) => println!("{} {err}", "✗".red()),
        }
        Ok(())
    }

    // --- requester actions ---

    fn open_ticket(&mut self, actor: Actor) -> Result<()> {
        println!("{}", "Open a ticket".bold());
        let title = prompt("Title")?;
        let description = prompt("Description")?;
        let urgent = prompt_yes_no("Urgent? (y/n)")?;
        let remote = prompt_yes_no("Can be handled remotely? (y/n)")?;
        let category = choose("Category", &Category::ALL)?;

        let ticket = self.desk.open_ticket(
            actor,
            OpenTicket {
                title,
                description,
                category,
                urgent,
                remote,
            },
        )?;
        println!("{} Ticket opened with id {}", "✓".green(), ticket.id);
        tracing::info!("ticket {} opened by user {}", ticket.id, actor.id);
        Ok(())
    }

    fn my_tickets(&self, actor: Actor) -> Result<()> {
        let tickets = self.desk.my_tickets(actor);
        if tickets.is_empty() {
            println!("No tickets found");
            return Ok(());
        }
        println!("{}", format!("My tickets ({})", tickets.len()).bold());
        self.print_ticket_table(&tickets);
        Ok(())
    }

    fn track_ticket(&self, actor: Actor) -> Result<()> {
        let id = prompt_u32("Ticket id")?;
        let ticket = self.desk.ticket_for(actor, id)?;
        self.print_ticket_details(&ticket);
        Ok(())
    }

    fn add_note(&mut self, actor: Actor) -> Result<()> {
        let id = prompt_u32("Ticket id")?;
        let body = prompt("Note")?;
        self.desk.add_note(actor, id, body)?;
        println!("{} Note added", "✓".green());
        Ok(())
    }

    fn search_articles(&self) -> Result<()> {
        let term = prompt("Keyword (blank for all)")?;
        let articles = self.desk.kb.search(&term);
        if articles.is_empty() {
            println!("No articles found");
            return Ok(());
        }
        for article in articles {
            println!();
            println!("{} {}", format!("#{}", article.id).cyan(), article.title.bold());
            println!("Category: {}", article.category);
            println!("{}", article.content);
        }
        Ok(())
    }

    // --- technician actions ---

    fn queue(&self, actor: Actor) -> Result<()> {
        let queue = self.desk.triage_queue(actor)?;
        if queue.is_empty() {
            println!("The queue is empty");
            return Ok(());
        }
        println!("{}", format!("Ticket queue ({})", queue.len()).bold());
        let fmt = &self.config.display.date_format;
        let rows: Vec<QueueRow> = queue
            .iter()
            .map(|t| QueueRow {
                id: t.id,
                title: t.title.clone(),
                requester: self.user_name(t.requester_id),
                department: t.department.to_string(),
                status: t.status.to_string(),
                priority: t.priority.to_string(),
                category: t.category.to_string(),
                remote: yes_no(t.remote).to_string(),
                opened: t.opened_at.format(fmt).to_string(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }

    fn respond(&mut self, actor: Actor) -> Result<()> {
        let id = prompt_u32("Ticket id")?;
        let before = self.desk.ticket_for(actor, id)?;
        println!("{} {}", format!("#{}", before.id).cyan().bold(), before.title.bold());
        println!("{}", before.description);

        let body = prompt("Your response")?;
        let after = self.desk.respond(actor, id, body)?;
        if before.technician_id.is_none() {
            println!(
                "{} Ticket assigned to you, status {}",
                "✓".green(),
                colorize_status(after.status)
            );
        } else {
            println!("{} Response recorded", "✓".green());
        }
        tracing::info!("technician {} responded to ticket {}", actor.id, id);
        Ok(())
    }

    fn change_status(&mut self, actor: Actor) -> Result<()> {
        let id = prompt_u32("Ticket id")?;
        let ticket = self.desk.ticket_for(actor, id)?;
        println!("Current status: {}", colorize_status(ticket.status));

        let status = choose("New status", &Status::ALL)?;
        self.desk.set_status(actor, id, status)?;
        println!("{} Status changed to {}", "✓".green(), colorize_status(status));
        tracing::info!("ticket {} status set to {} by technician {}", id, status, actor.id);
        Ok(())
    }

    fn finalize(&mut self, actor: Actor) -> Result<()> {
        let id = prompt_u32("Ticket id")?;
        let solution = prompt("What was done")?;
        let minutes = prompt_u32("Time spent (minutes)")?;

        let ticket = self.desk.finalize(actor, id, &solution, minutes)?;
        println!(
            "{} Ticket {} resolved in {} minutes",
            "✓".green(),
            ticket.id,
            minutes
        );
        tracing::info!("ticket {} finalized by technician {}", id, actor.id);
        Ok(())
    }

    fn by_category(&self, actor: Actor) -> Result<()> {
        let groups = self.desk.tickets_by_category(actor)?;
        if groups.is_empty() {
            println!("No tickets yet");
            return Ok(());
        }
        let preview = self.config.display.category_preview;
        for (category, tickets) in groups {
            println!();
            println!("{}", format!("{}: {} tickets", category, tickets.len()).bold());
            for ticket in tickets.iter().take(preview) {
                println!("  {ticket}");
            }
            if tickets.len() > preview {
                println!("  ... and {} more", tickets.len() - preview);
            }
        }
        Ok(())
    }

    fn my_report(&self, actor: Actor) -> Result<()> {
        let report = self.desk.technician_report(actor)?;
        println!("{}", "My workload".bold());
        println!("Assigned:    {}", report.total_assigned);
        println!("Resolved:    {}", report.resolved);
        println!("In progress: {}", report.in_progress);
        if let Some(avg) = report.average_resolution_minutes {
            println!("Average resolution: {avg:.1} minutes");
        }
        Ok(())
    }

    // --- administrator actions ---

    fn users(&self) -> Result<()> {
        let users = self.desk.users.list();
        println!("{}", format!("Users ({})", users.len()).bold());
        let rows: Vec<UserRow> = users
            .iter()
            .map(|u| UserRow {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
                role: u.role.to_string(),
                department: u.department.to_string(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }

    fn general(&self, actor: Actor) -> Result<()> {
        let report = self.desk.general_report(actor)?;
        println!("{}", "General report".bold());
        println!("Users:       {}", report.total_users);
        println!("Technicians: {}", report.total_technicians);
        println!("Tickets:     {}", report.total_tickets);
        println!("Open:        {}", report.open_tickets);
        println!("Resolved:    {}", report.resolved_tickets);
        println!("Urgent:      {}", report.urgent_tickets);
        println!();
        println!("{}", "Tickets per department:".bold());
        for (department, count) in &report.by_department {
            println!("  {department}: {count}");
        }
        Ok(())
    }

    fn articles(&self) -> Result<()> {
        let articles = self.desk.kb.list();
        println!("{}", format!("Knowledge articles ({})", articles.len()).bold());
        let rows: Vec<ArticleRow> = articles
            .iter()
            .map(|a| ArticleRow {
                id: a.id,
                title: a.title.clone(),
                category: a.category.to_string(),
                keywords: a.keywords.join(", "),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }

    fn stats(&self, actor: Actor) -> Result<()> {
        let stats = self.desk.system_stats(actor)?;
        println!("{}", "Tickets per category:".bold());
        print_counts(&stats.by_category);
        println!();
        println!("{}", "Tickets per priority:".bold());
        print_counts(&stats.by_priority);
        println!();
        println!("{}", "Tickets per status:".bold());
        print_counts(&stats.by_status);
        if let Some(avg) = stats.average_resolution_minutes {
            println!();
            println!("Average resolution across the desk: {avg:.1} minutes");
        }
        Ok(())
    }

    // --- rendering helpers ---

    fn print_ticket_table(&self, tickets: &[Ticket]) {
        let fmt = &self.config.display.date_format;
        let rows: Vec<TicketRow> = tickets
            .iter()
            .map(|t| TicketRow {
                id: t.id,
                title: t.title.clone(),
                status: t.status.to_string(),
                priority: t.priority.to_string(),
                category: t.category.to_string(),
                opened: t.opened_at.format(fmt).to_string(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
    }

    fn print_ticket_details(&self, ticket: &Ticket) {
        let fmt = &self.config.display.date_format;
        println!();
        println!(
            "{} {}",
            format!("#{}", ticket.id).cyan().bold(),
            ticket.title.bold()
        );
        println!();
        println!("Status:     {}", colorize_status(ticket.status));
        println!("Priority:   {}", ticket.priority);
        println!("Category:   {}", ticket.category);
        println!("Department: {}", ticket.department);
        println!("Urgent:     {}", yes_no(ticket.urgent));
        println!("Remote:     {}", yes_no(ticket.remote));
        println!("Opened:     {}", ticket.opened_at.format(fmt));
        if let Some(tech_id) = ticket.technician_id {
            println!("Technician: {}", self.user_name(tech_id));
        }
        if let (Some(at), Some(minutes)) = (ticket.resolved_at, ticket.resolution_minutes) {
            println!("Resolved:   {} after {} minutes", at.format(fmt), minutes);
        }
        if !ticket.notes.is_empty() {
            println!();
            println!("{}", "History:".bold());
            for note in &ticket.notes {
                let tag = if note.by_technician {
                    "[TECH]".cyan()
                } else {
                    "[USER]".normal()
                };
                println!(
                    "  {} {} {}: {}",
                    note.created_at.format(fmt),
                    tag,
                    self.user_name(note.author_id),
                    note.body
                );
            }
        }
    }

    fn user_name(&self, id: u32) -> String {
        self.desk
            .users
            .find(id)
            .map(|u| u.name)
            .unwrap_or_else(|| format!("user {id}"))
    }
}

#[derive(Tabled)]
struct TicketRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Opened")]
    opened: String,
}

#[derive(Tabled)]
struct QueueRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Requester")]
    requester: String,
    #[tabled(rename = "Dept")]
    department: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Remote")]
    remote: String,
    #[tabled(rename = "Opened")]
    opened: String,
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Department")]
    department: String,
}

#[derive(Tabled)]
struct ArticleRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Keywords")]
    keywords: String,
}

fn print_outcome(result: Result<()>) {
    if let Err(err) = result {
        println!("{} {err}", "✗".red());
    }
}

fn colorize_status(status: Status) -> ColoredString {
    match status {
        Status::Open => "open".white(),
        Status::InProgress => "in_progress".yellow(),
        Status::Waiting => "waiting".magenta(),
        Status::Resolved => "resolved".green(),
        Status::Closed => "closed".dimmed(),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn print_counts<K: std::fmt::Display>(counts: &BTreeMap<K, usize>) {
    let mut entries: Vec<(&K, &usize)> = counts.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));
    for (key, count) in entries {
        println!("  {key}: {count}");
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn prompt_u32(label: &str) -> Result<u32> {
    let input = prompt(label)?;
    input
        .parse()
        .map_err(|_| anyhow::anyhow!("Expected a number, got '{input}'"))
}

fn prompt_yes_no(label: &str) -> Result<bool> {
    Ok(prompt(label)?.eq_ignore_ascii_case("y"))
}

/// Numbered choice over a closed set. Accepts the number or the symbolic
/// name; anything out of range is rejected, never defaulted.
fn choose<T>(label: &str, options: &[T]) -> Result<T>
where
    T: Copy + std::fmt::Display + std::str::FromStr<Err = helpdesk_core::Error>,
{
    println!("{label}:");
    for (i, option) in options.iter().enumerate() {
        println!("{} - {}", i + 1, option);
    }
    let input = prompt("Choose")?;
    if let Ok(index) = input.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| options.get(i))
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Selection out of range: {index}"));
    }
    Ok(input.parse::<T>()?)
}
