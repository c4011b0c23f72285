//! Trellis Database Crate
//!
//! Persistence for the Trellis member network: connection management,
//! migrations, the invite repository, and the member-action recording it
//! delegates to.

use sqlx::SqlitePool;
use trellis_config::DatabaseConfig;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::{prepare_database, DatabaseConnection};
pub use migrations::run_migrations;

// Re-export repositories
pub use repos::{ActionRepository, InviteRepository};

// Re-export entities
pub use entities::{
    account::{Account, AccountReference},
    action::{InviteAcceptAction, Location, NewAction},
    invite::{generate_token, Invite, Invitee},
};

// Re-export types
pub use types::{
    errors::{ActionError, DatabaseError, InviteError},
    ActionResult, DatabaseResult, InviteResult,
};

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

    Ok(pool)
}
