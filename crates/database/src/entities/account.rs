//! Account entity definitions

use serde::{Deserialize, Serialize};

/// A signed-in member account, as handed to action recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Read-only display projection of a member account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountReference {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
}

impl AccountReference {
    /// Projection carrying display names only, no avatar.
    pub fn text_only(id: i64, username: String, first_name: String, last_name: String) -> Self {
        Self {
            id,
            username,
            first_name,
            last_name,
            avatar_url: None,
        }
    }
}
