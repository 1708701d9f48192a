//! MySQL implementation of the ChallengeRepository trait.
//!
//! One row per live challenge, keyed by `(channel, channel_value)` with
//! a unique index enforcing the single-challenge invariant at the
//! database level. Expired rows are not swept; expiry is decided at
//! confirmation time from `created_at`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sg_core::domain::entities::{ChannelKind, VerificationChallenge};
use sg_core::errors::{DomainError, VerificationError};
use sg_core::repositories::ChallengeRepository;

/// MySQL implementation of ChallengeRepository
pub struct MySqlChallengeRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlChallengeRepository {
    /// Create a new MySQL challenge repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn parse_channel(raw: &str) -> Result<ChannelKind, DomainError> {
        match raw {
            "phone" => Ok(ChannelKind::Phone),
            "email" => Ok(ChannelKind::Email),
            other => Err(DomainError::Internal {
                message: format!("Unknown channel kind in store: {}", other),
            }),
        }
    }

    /// Convert database row to VerificationChallenge entity
    fn row_to_challenge(row: &sqlx::mysql::MySqlRow) -> Result<VerificationChallenge, DomainError> {
        let channel: String = row.try_get("channel").map_err(|e| DomainError::Internal {
            message: format!("Failed to get channel: {}", e),
        })?;
        let account_id: String =
            row.try_get("account_id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get account_id: {}", e),
            })?;

        Ok(VerificationChallenge {
            channel: Self::parse_channel(&channel)?,
            channel_value: row
                .try_get("channel_value")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get channel_value: {}", e),
                })?,
            code: row.try_get("code").map_err(|e| DomainError::Internal {
                message: format!("Failed to get code: {}", e),
            })?,
            owner_account_id: Uuid::parse_str(&account_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid account UUID: {}", e),
            })?,
            is_verified: row
                .try_get("is_verified")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get is_verified: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl ChallengeRepository for MySqlChallengeRepository {
    async fn find_by_channel(
        &self,
        channel: ChannelKind,
        channel_value: &str,
    ) -> Result<Option<VerificationChallenge>, DomainError> {
        let query = r#"
            SELECT channel, channel_value, code, account_id, is_verified, created_at
            FROM verification_challenges
            WHERE channel = ? AND channel_value = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(channel.as_str())
            .bind(channel_value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find challenge: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_challenge(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_channel_and_code(
        &self,
        channel: ChannelKind,
        channel_value: &str,
        code: &str,
    ) -> Result<Option<VerificationChallenge>, DomainError> {
        let query = r#"
            SELECT channel, channel_value, code, account_id, is_verified, created_at
            FROM verification_challenges
            WHERE channel = ? AND channel_value = ? AND code = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(channel.as_str())
            .bind(channel_value)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find challenge by code: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_challenge(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(
        &self,
        challenge: VerificationChallenge,
    ) -> Result<VerificationChallenge, DomainError> {
        let query = r#"
            INSERT INTO verification_challenges (
                channel, channel_value, code, account_id, is_verified, created_at
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(challenge.channel.as_str())
            .bind(&challenge.channel_value)
            .bind(&challenge.code)
            .bind(challenge.owner_account_id.to_string())
            .bind(challenge.is_verified)
            .bind(challenge.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.as_database_error()
                    .map_or(false, |d| d.is_unique_violation())
                {
                    VerificationError::DuplicateChannel {
                        channel: challenge.channel,
                    }
                    .into()
                } else {
                    DomainError::Internal {
                        message: format!("Failed to save challenge: {}", e),
                    }
                }
            })?;

        Ok(challenge)
    }

    async fn update(
        &self,
        challenge: VerificationChallenge,
    ) -> Result<VerificationChallenge, DomainError> {
        let query = r#"
            UPDATE verification_challenges
            SET code = ?, is_verified = ?, created_at = ?
            WHERE channel = ? AND channel_value = ?
        "#;

        let result = sqlx::query(query)
            .bind(&challenge.code)
            .bind(challenge.is_verified)
            .bind(challenge.created_at)
            .bind(challenge.channel.as_str())
            .bind(&challenge.channel_value)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update challenge: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(VerificationError::NotFound {
                resource: "Verification challenge".to_string(),
            }
            .into());
        }

        Ok(challenge)
    }

    async fn delete_by_channel(
        &self,
        channel: ChannelKind,
        channel_value: &str,
    ) -> Result<bool, DomainError> {
        let query = r#"
            DELETE FROM verification_challenges
            WHERE channel = ? AND channel_value = ?
        "#;

        let result = sqlx::query(query)
            .bind(channel.as_str())
            .bind(channel_value)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete challenge: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
