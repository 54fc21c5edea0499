//! Server value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A member's role inside one server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerRole {
    Admin,
    #[default]
    User,
}

impl ServerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerRole::Admin => "admin",
            ServerRole::User => "user",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, ServerRole::Admin)
    }
}

impl fmt::Display for ServerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ServerRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(ServerRole::Admin),
            "user" => Ok(ServerRole::User),
            other => Err(format!("unknown role '{}' (expected admin or user)", other)),
        }
    }
}

/// Category shown in the server settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ServerCategory {
    Team,
    Project,
    Hobby,
    #[default]
    General,
    Other,
}

impl ServerCategory {
    pub const ALL: [ServerCategory; 5] = [
        ServerCategory::Team,
        ServerCategory::Project,
        ServerCategory::Hobby,
        ServerCategory::General,
        ServerCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServerCategory::Team => "Team",
            ServerCategory::Project => "Project",
            ServerCategory::Hobby => "Hobby",
            ServerCategory::General => "General",
            ServerCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ServerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ServerCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| {
                format!(
                    "unknown category '{}' (expected one of: Team, Project, Hobby, General, Other)",
                    wanted
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("Admin".parse::<ServerRole>().unwrap(), ServerRole::Admin);
        assert_eq!(" user ".parse::<ServerRole>().unwrap(), ServerRole::User);
        assert!("owner".parse::<ServerRole>().is_err());
    }

    #[test]
    fn test_role_serialize_lowercase() {
        let json = serde_json::to_string(&ServerRole::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
    }

    #[test]
    fn test_category_parse_case_insensitive() {
        assert_eq!(
            "hobby".parse::<ServerCategory>().unwrap(),
            ServerCategory::Hobby
        );
        assert!("Sports".parse::<ServerCategory>().is_err());
    }

    #[test]
    fn test_category_default_is_general() {
        assert_eq!(ServerCategory::default(), ServerCategory::General);
    }
}
