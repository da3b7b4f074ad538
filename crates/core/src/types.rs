use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Application role as reported by the backend.
///
/// Matching is case-insensitive. Strings that name no known role are kept
/// in [`Role::Unknown`] so the user record survives a storage round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Teacher,
    Parent,
    Specialist,
    Unknown(String),
}

impl Role {
    /// Every role a dashboard exists for
    pub const KNOWN: [Self; 4] = [Self::Admin, Self::Teacher, Self::Parent, Self::Specialist];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "ADMIN",
            Self::Teacher => "TEACHER",
            Self::Parent => "PARENT",
            Self::Specialist => "SPECIALIST",
            Self::Unknown(raw) => raw,
        }
    }

    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl Default for Role {
    /// A missing role is carried as an empty unknown role
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Self::Admin,
            "TEACHER" => Self::Teacher,
            "PARENT" => Self::Parent,
            "SPECIALIST" => Self::Specialist,
            _ => Self::Unknown(value.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend user identifier; numeric primary keys and string ids both occur
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// Snapshot of the signed-in user, captured at login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Fields the backend sends that this crate does not interpret
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl UserRecord {
    /// Login identifier, preferring the username over the email
    pub fn identifier(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or_default()
    }

    /// Human-readable name for greetings and notices
    pub fn label(&self) -> &str {
        if let Some(name) = self.display_name.as_deref() {
            return name;
        }
        match self.extra.get("first_name").and_then(JsonValue::as_str) {
            Some(first) if !first.is_empty() => first,
            _ => self.identifier(),
        }
    }
}

/// Authenticated session held client-side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserRecord,
}
