//! Repository for invite data access operations.

use crate::entities::{Account, AccountReference, Invite, InviteAcceptAction, Invitee};
use crate::repos::ActionRepository;
use crate::types::{ActionError, InviteError, InviteResult};
use sqlx::{Row, SqlitePool};
use tracing::info;

/// Action kind recorded when an invitee signs up.
const INVITE_ACCEPT_KIND: &str = "invite_accept";

const INSERT_INVITE: &str =
    "INSERT INTO invites (token, email, first_name, last_name, message, sent_by, sent_time)
     VALUES (?, ?, ?, ?, ?, ?, ?)";

// The EXISTS subquery derives the accepted flag in the same round trip as
// the row fetch.
const SELECT_INVITE: &str =
    "SELECT i.email, i.first_name, i.last_name,
            m.id AS sent_by_id, m.username AS sent_by_username,
            m.first_name AS sent_by_first_name, m.last_name AS sent_by_last_name,
            EXISTS(SELECT 1 FROM invite_accept_actions WHERE invite_token = ?) AS accepted
     FROM invites i
     INNER JOIN members m ON i.sent_by = m.id
     WHERE i.token = ?";

/// Repository for invite database operations
pub struct InviteRepository {
    pool: SqlitePool,
    actions: ActionRepository,
}

impl InviteRepository {
    /// Create a new invite repository
    pub fn new(pool: SqlitePool, actions: ActionRepository) -> Self {
        Self { pool, actions }
    }

    /// Persist a new invite under a caller-generated token.
    ///
    /// The token is the primary key; inserting a duplicate surfaces the
    /// uniqueness violation from the database unchanged. Invitee fields
    /// are trusted to the caller, no validation happens here.
    pub async fn save_invite(
        &self,
        token: &str,
        invitee: &Invitee,
        text: &str,
        sent_by: i64,
    ) -> InviteResult<()> {
        let sent_time = chrono::Utc::now().to_rfc3339();

        sqlx::query(INSERT_INVITE)
            .bind(token)
            .bind(&invitee.email)
            .bind(&invitee.first_name)
            .bind(&invitee.last_name)
            .bind(text)
            .bind(sent_by)
            .bind(&sent_time)
            .execute(&self.pool)
            .await
            .map_err(|e| InviteError::DatabaseError(e.to_string()))?;

        info!(token = token, sent_by = sent_by, "saved invite");

        Ok(())
    }

    /// Record that the invitee behind `token` signed up as `signed_up`.
    ///
    /// Acceptance is a member action: the join row linking the generated
    /// action id to the token and the re-read of the original sender both
    /// run inside the action factory. The returned action carries the
    /// original invite's sender and sent time, not the accepting account.
    pub async fn mark_invite_accepted(
        &self,
        token: &str,
        signed_up: &Account,
    ) -> InviteResult<InviteAcceptAction> {
        let pool = self.pool.clone();
        let invite_token = token.to_string();

        let created = self
            .actions
            .create_action(
                INVITE_ACCEPT_KIND,
                signed_up,
                None,
                move |new_action| async move {
                    sqlx::query(
                        "INSERT INTO invite_accept_actions (invite_token, member_action) VALUES (?, ?)",
                    )
                    .bind(&invite_token)
                    .bind(new_action.id)
                    .execute(&pool)
                    .await
                    .map_err(|e| ActionError::DatabaseError(e.to_string()))?;

                    let invite = sqlx::query("SELECT sent_by, sent_time FROM invites WHERE token = ?")
                        .bind(&invite_token)
                        .fetch_one(&pool)
                        .await
                        .map_err(|e| match e {
                            sqlx::Error::RowNotFound => {
                                ActionError::MissingReference(format!("invite {invite_token}"))
                            }
                            other => ActionError::DatabaseError(other.to_string()),
                        })?;

                    Ok(InviteAcceptAction {
                        id: new_action.id,
                        performed_at: new_action.performed_at,
                        member_id: new_action.account.id,
                        location: new_action.location,
                        sent_by: invite
                            .try_get("sent_by")
                            .map_err(|e| ActionError::DatabaseError(e.to_string()))?,
                        sent_time: invite
                            .try_get("sent_time")
                            .map_err(|e| ActionError::DatabaseError(e.to_string()))?,
                    })
                },
            )
            .await;

        match created {
            Ok(action) => {
                info!(token = token, accepted_by = signed_up.id, "marked invite accepted");
                Ok(action)
            }
            Err(ActionError::MissingReference(_)) => Err(InviteError::NoSuchInvite {
                token: token.to_string(),
            }),
            Err(ActionError::DatabaseError(e)) => Err(InviteError::DatabaseError(e)),
        }
    }

    /// Look up a pending invite by token.
    ///
    /// Fails with `NoSuchInvite` when the token never matched a row and
    /// with `AlreadyAccepted` when the invite was already used; only a
    /// pending invite yields a usable result.
    pub async fn find_invite(&self, token: &str) -> InviteResult<Invite> {
        let invite = self.query_for_invite(token).await?;

        if invite.accepted {
            return Err(InviteError::AlreadyAccepted {
                token: token.to_string(),
            });
        }

        Ok(invite)
    }

    /// Single-row SELECT and mapping; a zero-row outcome becomes
    /// `NoSuchInvite`. The accepted check is `find_invite`'s, so that
    /// logic stays in one place.
    async fn query_for_invite(&self, token: &str) -> InviteResult<Invite> {
        let row = sqlx::query(SELECT_INVITE)
            .bind(token)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| InviteError::DatabaseError(e.to_string()))?;

        let Some(row) = row else {
            return Err(InviteError::NoSuchInvite {
                token: token.to_string(),
            });
        };

        let invitee = Invitee {
            first_name: row
                .try_get("first_name")
                .map_err(|e| InviteError::DatabaseError(e.to_string()))?,
            last_name: row
                .try_get("last_name")
                .map_err(|e| InviteError::DatabaseError(e.to_string()))?,
            email: row
                .try_get("email")
                .map_err(|e| InviteError::DatabaseError(e.to_string()))?,
        };

        let sent_by = AccountReference::text_only(
            row.try_get("sent_by_id")
                .map_err(|e| InviteError::DatabaseError(e.to_string()))?,
            row.try_get("sent_by_username")
                .map_err(|e| InviteError::DatabaseError(e.to_string()))?,
            row.try_get("sent_by_first_name")
                .map_err(|e| InviteError::DatabaseError(e.to_string()))?,
            row.try_get("sent_by_last_name")
                .map_err(|e| InviteError::DatabaseError(e.to_string()))?,
        );

        Ok(Invite {
            invitee,
            sent_by,
            accepted: row
                .try_get("accepted")
                .map_err(|e| InviteError::DatabaseError(e.to_string()))?,
        })
    }
}
