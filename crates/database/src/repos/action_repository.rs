//! Repository recording generic member actions.

use std::future::Future;

use crate::entities::{Account, Location, NewAction};
use crate::types::{ActionError, ActionResult};
use sqlx::SqlitePool;
use tracing::info;

/// Records timestamped member actions and hands the generated id to a
/// domain-specific factory.
#[derive(Clone)]
pub struct ActionRepository {
    pool: SqlitePool,
}

impl ActionRepository {
    /// Create a new action repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a member action of the given kind.
    ///
    /// The base record is inserted first, then `factory` is invoked with
    /// the allocated id, the performed-at timestamp, the account, and the
    /// location. Writes made inside the factory can reference the id.
    pub async fn create_action<A, F, Fut>(
        &self,
        kind: &str,
        account: &Account,
        location: Option<Location>,
        factory: F,
    ) -> ActionResult<A>
    where
        F: FnOnce(NewAction) -> Fut,
        Fut: Future<Output = ActionResult<A>>,
    {
        let performed_at = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO member_actions (kind, member_id, performed_at, latitude, longitude)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(kind)
        .bind(account.id)
        .bind(&performed_at)
        .bind(location.map(|l| l.latitude))
        .bind(location.map(|l| l.longitude))
        .execute(&self.pool)
        .await
        .map_err(|e| ActionError::DatabaseError(e.to_string()))?;

        let action_id = result.last_insert_rowid();

        info!(
            action_id = action_id,
            kind = kind,
            member_id = account.id,
            "recorded member action"
        );

        factory(NewAction {
            id: action_id,
            performed_at,
            account: account.clone(),
            location,
        })
        .await
    }
}
