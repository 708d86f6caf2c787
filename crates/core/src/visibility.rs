//! Redaction of anonymous confessions at the response boundary.

use chrono::{DateTime, FixedOffset};
use confessly_db::entities::confession;
use serde::Serialize;
use uuid::Uuid;

use crate::principal::Principal;

/// A confession as shown to a particular viewer.
///
/// Identity fields are omitted from the JSON entirely when redacted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfessionView {
    pub id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_uuid: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub title: String,
    pub text: String,
    pub anon: bool,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

/// Build the view of `confession` that `viewer` is allowed to see.
#[must_use]
pub fn redact(confession: confession::Model, viewer: &Principal) -> ConfessionView {
    let hide_identity = confession.anon && !viewer.is_admin();

    let (user_id, guest_uuid, username) = if hide_identity {
        (None, None, None)
    } else {
        (
            confession.user_id,
            confession.guest_uuid,
            Some(confession.username),
        )
    };

    ConfessionView {
        id: confession.id,
        user_id,
        guest_uuid,
        username,
        title: confession.title,
        text: confession.text,
        anon: confession.anon,
        created_at: confession.created_at,
        updated_at: confession.updated_at,
    }
}

/// Redact every confession in a list for the same viewer.
#[must_use]
pub fn redact_all(confessions: Vec<confession::Model>, viewer: &Principal) -> Vec<ConfessionView> {
    confessions
        .into_iter()
        .map(|c| redact(c, viewer))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use confessly_db::entities::user::Role;

    fn confession(anon: bool) -> confession::Model {
        confession::Model {
            id: 1,
            user_id: Some(7),
            guest_uuid: None,
            username: "alice".to_string(),
            title: "Secret title".to_string(),
            text: "secret".to_string(),
            anon,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_anonymous_confession_hidden_from_non_admins() {
        let viewers = [
            Principal::Anonymous,
            Principal::Guest { id: Uuid::new_v4() },
            Principal::Authenticated {
                id: 7,
                username: "alice".to_string(),
                role: Role::User,
            },
        ];

        for viewer in &viewers {
            let view = redact(confession(true), viewer);
            assert_eq!(view.user_id, None);
            assert_eq!(view.guest_uuid, None);
            assert_eq!(view.username, None);
            assert_eq!(view.title, "Secret title");
        }
    }

    #[test]
    fn test_admin_sees_everything() {
        let admin = Principal::Authenticated {
            id: 1,
            username: "admin".to_string(),
            role: Role::Admin,
        };

        let view = redact(confession(true), &admin);
        assert_eq!(view.user_id, Some(7));
        assert_eq!(view.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_public_confession_untouched() {
        let view = redact(confession(false), &Principal::Anonymous);
        assert_eq!(view.user_id, Some(7));
        assert_eq!(view.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_redacted_fields_absent_from_json() {
        let json = serde_json::to_value(redact(confession(true), &Principal::Anonymous)).unwrap();
        let obj = json.as_object().unwrap();

        assert!(!obj.contains_key("user_id"));
        assert!(!obj.contains_key("guest_uuid"));
        assert!(!obj.contains_key("username"));
        assert_eq!(obj["anon"], true);
    }
}
