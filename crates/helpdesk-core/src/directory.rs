//! In-memory user directory
//!
//! Registration assigns sequential ids; records are immutable afterwards
//! and never deleted.

use crate::{Department, Error, Result, Role, User};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// What to do when a registration reuses an existing email address.
///
/// The default tolerates duplicates (shared mailboxes); `Unique` rejects
/// them with [`Error::DuplicateEmail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmailPolicy {
    #[default]
    Shared,
    Unique,
}

/// In-memory user store
pub struct UserDirectory {
    users: Vec<User>,
    next_id: u32,
    email_policy: EmailPolicy,
}

impl UserDirectory {
    pub fn new(email_policy: EmailPolicy) -> Self {
        Self {
            users: Vec::new(),
            next_id: 1,
            email_policy,
        }
    }

    /// All users, insertion order.
    pub fn list(&self) -> Vec<User> {
        self.users.clone()
    }

    /// Look up a user by id.
    pub fn find(&self, id: u32) -> Option<User> {
        self.users.iter().find(|u| u.id == id).cloned()
    }

    /// Case-insensitive exact email match. Returns the first match when
    /// the shared-email policy has let duplicates in.
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    /// Register a new user. Ids are monotonically increasing and never
    /// reused, including across rejected attempts.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        role: Role,
        department: Department,
    ) -> Result<User> {
        if self.email_policy == EmailPolicy::Unique && self.find_by_email(email).is_some() {
            return Err(Error::DuplicateEmail(email.to_string()));
        }

        let user = User {
            id: self.next_id,
            name: name.to_string(),
            email: email.to_string(),
            role,
            department,
            registered_at: Utc::now(),
        };
        self.next_id += 1;
        self.users.push(user.clone());
        Ok(user)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new(EmailPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_assigns_sequential_ids() {
        let mut dir = UserDirectory::default();
        let a = dir
            .register("Alice", "alice@company.com", Role::Requester, Department::It)
            .unwrap();
        let b = dir
            .register("Bob", "bob@company.com", Role::Technician, Department::Hr)
            .unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(dir.list().len(), 2);
    }

    #[test]
    fn email_lookup_is_case_insensitive() {
        let mut dir = UserDirectory::default();
        dir.register("Alice", "a@b.com", Role::Requester, Department::General)
            .unwrap();

        let found = dir.find_by_email("A@B.COM").unwrap();
        assert_eq!(found.name, "Alice");
        assert!(dir.find_by_email("missing@b.com").is_none());
    }

    #[test]
    fn shared_policy_tolerates_duplicate_emails() {
        let mut dir = UserDirectory::new(EmailPolicy::Shared);
        dir.register("Alice", "desk@company.com", Role::Requester, Department::It)
            .unwrap();
        let second = dir.register("Bob", "desk@company.com", Role::Requester, Department::It);
        assert!(second.is_ok());
    }

    #[test]
    fn unique_policy_rejects_duplicates_without_burning_order() {
        let mut dir = UserDirectory::new(EmailPolicy::Unique);
        dir.register("Alice", "a@b.com", Role::Requester, Department::It)
            .unwrap();
        dir.register("Bob", "b@b.com", Role::Requester, Department::It)
            .unwrap();

        let dup = dir.register("Mallory", "A@B.com", Role::Requester, Department::It);
        assert!(matches!(dup, Err(Error::DuplicateEmail(_))));

        // Ids keep increasing after the failed attempt.
        let c = dir
            .register("Carol", "c@b.com", Role::Requester, Department::It)
            .unwrap();
        assert_eq!(c.id, 3);
    }
}
