use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A member or trainer account. Created at signup, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(flatten)]
    pub role: Role,
}

impl User {
    pub fn new(
        username: String,
        email: String,
        first_name: String,
        last_name: String,
        role: Role,
    ) -> Self {
        Self {
            id: new_id(),
            username,
            email,
            first_name,
            last_name,
            role,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn user_type(&self) -> UserType {
        self.role.user_type()
    }

    pub fn is_trainer(&self) -> bool {
        matches!(self.role, Role::Trainer { .. })
    }

    pub fn is_customer(&self) -> bool {
        matches!(self.role, Role::Customer)
    }
}

/// Role with its variant-specific fields. Serialized flat into the user
/// record as `userType` plus the trainer fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "userType", rename_all = "lowercase")]
pub enum Role {
    Customer,
    Trainer {
        #[serde(default)]
        specialization: String,
        #[serde(default)]
        experience: String,
    },
}

impl Role {
    pub fn user_type(&self) -> UserType {
        match self {
            Role::Customer => UserType::Customer,
            Role::Trainer { .. } => UserType::Trainer,
        }
    }
}

/// Field-less role discriminant, used by forms and filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Customer,
    Trainer,
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Trainer => write!(f, "trainer"),
        }
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customer" | "member" => Ok(Self::Customer),
            "trainer" => Ok(Self::Trainer),
            _ => Err(format!("unknown user type: {s}")),
        }
    }
}

/// Time-ordered unique identifier for new records.
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}
