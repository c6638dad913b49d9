use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::contract::model::{NewUser, User};

/// Fresh random identifier for a new record.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Turn a draft into a storable user: keep a caller-supplied id, otherwise
/// generate one, and stamp both timestamps with the same instant.
///
/// The password is copied as-is; hashing happens in the service.
pub fn assign(draft: NewUser, now: DateTime<Utc>) -> User {
    let id = match draft.id {
        Some(id) if !id.trim().is_empty() => id,
        _ => new_id(),
    };

    User {
        id,
        first_name: draft.first_name,
        last_name: draft.last_name,
        nickname: draft.nickname,
        password: draft.password,
        email: draft.email,
        country: draft.country,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_id_when_absent() {
        let user = assign(NewUser::default(), Utc::now());
        assert!(!user.id.is_empty());
        assert!(Uuid::parse_str(&user.id).is_ok());
    }

    #[test]
    fn generates_id_when_blank() {
        let draft = NewUser {
            id: Some("  ".into()),
            ..Default::default()
        };
        let user = assign(draft, Utc::now());
        assert!(Uuid::parse_str(&user.id).is_ok());
    }

    #[test]
    fn keeps_supplied_id() {
        let draft = NewUser {
            id: Some("fixed".into()),
            ..Default::default()
        };
        assert_eq!(assign(draft, Utc::now()).id, "fixed");
    }

    #[test]
    fn timestamps_are_equal_at_creation() {
        let now = Utc::now();
        let user = assign(NewUser::default(), now);
        assert_eq!(user.created_at, now);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }
}
