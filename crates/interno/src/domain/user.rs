use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Which side of the board a session belongs to. The role decides which
/// stores and surfaces apply to the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Company,
    Intern,
}

impl UserRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Company => "Company",
            Self::Intern => "Intern",
        }
    }
}

/// Opaque session identity handed over by the auth collaborator. Only
/// `role` and `completed` feed decisions in this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub role: UserRole,
    pub completed: bool,
}
