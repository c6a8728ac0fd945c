//! Session-lifetime cache of user display projections, filled lazily per
//! participant so the views can render names instead of raw identifiers.

use std::collections::HashMap;

use crate::common::models::User;

#[derive(Debug, Default)]
pub struct UserDirectory {
    users: HashMap<String, User>,
    /// Lookups already in flight or failed; not retried this session.
    requested: std::collections::HashSet<String>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    /// Name to render for `user_id`, falling back to the raw identifier
    /// until the lookup resolves.
    pub fn display_name(&self, user_id: &str) -> String {
        match self.users.get(user_id) {
            Some(user) => user.display_name(),
            None => user_id.to_string(),
        }
    }

    /// Whether a lookup should be started for `user_id`. Marks it requested,
    /// so each participant is fetched at most once per session.
    pub fn mark_requested(&mut self, user_id: &str) -> bool {
        if self.users.contains_key(user_id) {
            return false;
        }
        self.requested.insert(user_id.to_string())
    }

    pub fn insert(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.into(),
            email: format!("{}@example.com", id),
            user_type: "student".into(),
            username: Some(id.into()),
            name: Some(name.into()),
            lastname: None,
            grade: None,
        }
    }

    #[test]
    fn falls_back_to_identifier_until_resolved() {
        let mut directory = UserDirectory::new();
        assert_eq!(directory.display_name("u1"), "u1");
        directory.insert(user("u1", "Ana"));
        assert_eq!(directory.display_name("u1"), "Ana");
    }

    #[test]
    fn each_participant_is_requested_once() {
        let mut directory = UserDirectory::new();
        assert!(directory.mark_requested("u1"));
        assert!(!directory.mark_requested("u1"));
        directory.insert(user("u2", "Juan"));
        assert!(!directory.mark_requested("u2"));
    }
}
