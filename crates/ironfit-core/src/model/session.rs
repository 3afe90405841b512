use serde::{Deserialize, Serialize};

use super::profile::Profile;
use super::user::User;

/// Persisted form of the authenticated identity: the user record with a
/// denormalized copy of its profile embedded under `profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub profile: Option<Profile>,
}

impl SessionRecord {
    pub fn new(user: User, profile: Option<Profile>) -> Self {
        Self { user, profile }
    }
}

/// Login form data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}
