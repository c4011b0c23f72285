//! Invite entity definitions

use serde::{Deserialize, Serialize};

use super::account::AccountReference;

/// The person being invited to join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Invitee {
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
        }
    }
}

/// An invite as loaded for display.
///
/// `accepted` is derived at query time from the acceptance join table;
/// it is never a stored column on the invite row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invite {
    pub invitee: Invitee,
    pub sent_by: AccountReference,
    pub accepted: bool,
}

/// Generate an unguessable token for a new invite.
pub fn generate_token() -> String {
    cuid2::create_id()
}
