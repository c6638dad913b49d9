use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::model::User;

/// Lifecycle event names as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
    UserCreated,
    UserUpdated,
    UserDeleted,
}

impl EventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::UserCreated => "user_created",
            EventName::UserUpdated => "user_updated",
            EventName::UserDeleted => "user_deleted",
        }
    }
}

/// Public-safe projection of a user; never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserPayload {
    pub fn id_only(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: None,
            last_name: None,
            nickname: None,
            email: None,
            country: None,
            created_at: None,
            updated_at: None,
        }
    }
}

impl From<&User> for UserPayload {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.clone(),
            first_name: Some(u.first_name.clone()),
            last_name: Some(u.last_name.clone()),
            nickname: Some(u.nickname.clone()),
            email: Some(u.email.clone()),
            country: Some(u.country.clone()),
            created_at: Some(u.created_at),
            updated_at: Some(u.updated_at),
        }
    }
}

/// Outbound notification envelope. Built after a successful write, handed to
/// the notifier and then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEvent {
    pub event_name: EventName,
    pub payload: UserPayload,
}

impl UserEvent {
    pub fn created(user: &User) -> Self {
        Self {
            event_name: EventName::UserCreated,
            payload: user.into(),
        }
    }

    pub fn updated(user: &User) -> Self {
        Self {
            event_name: EventName::UserUpdated,
            payload: user.into(),
        }
    }

    pub fn deleted(id: impl Into<String>) -> Self {
        Self {
            event_name: EventName::UserDeleted,
            payload: UserPayload::id_only(id),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.payload.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_user() -> User {
        let at = Utc.with_ymd_and_hms(2023, 11, 14, 12, 0, 0).unwrap();
        User {
            id: "u-1".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            nickname: "jd".into(),
            password: "$2b$04$secret".into(),
            email: "john@example.com".into(),
            country: "TR".into(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn created_event_serializes_without_password() {
        let event = UserEvent::created(&sample_user());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_name"], "user_created");
        assert_eq!(json["payload"]["id"], "u-1");
        assert_eq!(json["payload"]["email"], "john@example.com");
        assert!(json["payload"].get("password").is_none());
        assert!(!json.to_string().contains("secret"));
    }

    #[test]
    fn deleted_event_carries_only_id() {
        let json = serde_json::to_value(UserEvent::deleted("u-9")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"event_name": "user_deleted", "payload": {"id": "u-9"}})
        );
    }

    #[test]
    fn event_names_match_wire_names() {
        for name in [
            EventName::UserCreated,
            EventName::UserUpdated,
            EventName::UserDeleted,
        ] {
            let json = serde_json::to_value(name).unwrap();
            assert_eq!(json, name.as_str());
        }
    }
}
