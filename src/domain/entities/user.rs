//! User entity and the identity carried through a request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
///
/// `password_hash` is a PHC-format Argon2 string and is never serialized.
#[derive(Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The snapshot stored in a session.
    pub fn snapshot(&self) -> SessionUser {
        SessionUser {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"***")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Input for creating a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

/// What a session remembers about its user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
}

/// Who is making a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Identity {
    #[default]
    Anonymous,
    Authenticated(SessionUser),
}

impl Identity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated(_))
    }

    /// Owner key used for URL mappings: the user's email, or `""`.
    pub fn owner(&self) -> &str {
        match self {
            Identity::Anonymous => "",
            Identity::Authenticated(user) => &user.email,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated(user) => Some(&user.email),
        }
    }
}

impl From<Option<SessionUser>> for Identity {
    fn from(user: Option<SessionUser>) -> Self {
        user.map_or(Identity::Anonymous, Identity::Authenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 7,
            email: "a@example.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_snapshot_has_no_credentials() {
        let snapshot = user().snapshot();
        assert_eq!(snapshot.id, 7);
        assert_eq!(snapshot.email, "a@example.com");

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn test_debug_masks_hash() {
        let printed = format!("{:?}", user());
        assert!(!printed.contains("secret"));
    }

    #[test]
    fn test_identity_owner() {
        assert_eq!(Identity::Anonymous.owner(), "");
        let identity = Identity::Authenticated(user().snapshot());
        assert_eq!(identity.owner(), "a@example.com");
        assert!(identity.is_authenticated());
    }

    #[test]
    fn test_identity_from_option() {
        assert_eq!(Identity::from(None), Identity::Anonymous);
        assert!(Identity::from(Some(user().snapshot())).is_authenticated());
    }
}
