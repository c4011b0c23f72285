//! Member action entity definitions

use serde::{Deserialize, Serialize};

use super::account::Account;

/// Geographic point attached to a recorded action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Context handed to an action factory after the base record is persisted.
///
/// The id is already allocated, so writes made by the factory can
/// reference it.
#[derive(Debug, Clone)]
pub struct NewAction {
    pub id: i64,
    pub performed_at: String,
    pub account: Account,
    pub location: Option<Location>,
}

/// Action recorded when an invitee signs up through an invite.
///
/// `sent_by` and `sent_time` describe the original invite, not the
/// accepting account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InviteAcceptAction {
    pub id: i64,
    pub performed_at: String,
    pub member_id: i64,
    pub location: Option<Location>,
    pub sent_by: i64,
    pub sent_time: String,
}
