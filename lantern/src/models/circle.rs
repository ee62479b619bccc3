use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CircleStatus {
    #[default]
    Active,
    Inactive,
    Archived,
}

impl std::fmt::Display for CircleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for CircleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("Unknown circle status: {s}")),
        }
    }
}

/// A named group of trusted people. The single-active-circle rule is
/// enforced in the service layer, not by the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: String,
    pub status: CircleStatus,
    pub created_at: DateTime<Utc>,
}

impl Circle {
    pub fn new(id: String, name: String, owner_id: String) -> Self {
        Self {
            id,
            name,
            description: None,
            owner_id,
            status: CircleStatus::Active,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CircleRole {
    Owner,
    Admin,
    #[default]
    Member,
}

impl std::fmt::Display for CircleRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::Admin => write!(f, "admin"),
            Self::Member => write!(f, "member"),
        }
    }
}

impl std::str::FromStr for CircleRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            _ => Err(format!("Unknown circle role: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleMember {
    pub id: String,
    pub circle_id: String,
    pub member_id: String,
    pub role: CircleRole,
    pub joined_at: DateTime<Utc>,
}

impl CircleMember {
    pub fn new(id: String, circle_id: String, member_id: String, role: CircleRole) -> Self {
        Self {
            id,
            circle_id,
            member_id,
            role,
            joined_at: Utc::now(),
        }
    }
}
