//! Domain entities for the database layer

pub mod account;
pub mod action;
pub mod invite;

// Re-export all entity types
pub use account::{Account, AccountReference};
pub use action::{InviteAcceptAction, Location, NewAction};
pub use invite::{generate_token, Invite, Invitee};
