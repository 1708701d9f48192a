//! MySQL implementation of the AccountRepository trait.
//!
//! Email and phone number each carry a unique index; the race between
//! two concurrent registrations for the same value is settled here, at
//! the INSERT, and surfaced as `DuplicateChannel`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sg_core::domain::entities::{Account, ChannelKind};
use sg_core::errors::{DomainError, VerificationError};
use sg_core::repositories::AccountRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, email, phone_number, first_name, last_name,
           is_active, is_phone_verified, is_email_verified,
           created_at, updated_at
    FROM accounts
"#;

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid account UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get phone_number: {}", e),
                })?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get first_name: {}", e),
                })?,
            last_name: row
                .try_get("last_name")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get last_name: {}", e),
                })?,
            is_active: row.try_get("is_active").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_active: {}", e),
            })?,
            is_phone_verified: row
                .try_get("is_phone_verified")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get is_phone_verified: {}", e),
                })?,
            is_email_verified: row
                .try_get("is_email_verified")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get is_email_verified: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }

    async fn find_one(
        &self,
        condition: &str,
        value: &str,
    ) -> Result<Option<Account>, DomainError> {
        let query = format!("{} WHERE {} = ? LIMIT 1", SELECT_COLUMNS, condition);

        let result = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find account: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists(&self, condition: &str, value: &str) -> Result<bool, DomainError> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE {} = ?) AS present",
            condition
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to check account existence: {}", e),
            })?;

        let present: i8 = row.try_get("present").map_err(|e| DomainError::Internal {
            message: format!("Failed to get existence result: {}", e),
        })?;

        Ok(present == 1)
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.find_one("id", &id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.find_one("email", email).await
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Account>, DomainError> {
        self.find_one("phone_number", phone_number).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        self.exists("email", email).await
    }

    async fn exists_by_phone(&self, phone_number: &str) -> Result<bool, DomainError> {
        self.exists("phone_number", phone_number).await
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, email, phone_number, first_name, last_name,
                is_active, is_phone_verified, is_email_verified,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.email)
            .bind(&account.phone_number)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(account.is_active)
            .bind(account.is_phone_verified)
            .bind(account.is_email_verified)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.as_database_error()
                    .map_or(false, |d| d.is_unique_violation())
                {
                    let channel = if account.phone_number.is_some() {
                        ChannelKind::Phone
                    } else {
                        ChannelKind::Email
                    };
                    VerificationError::DuplicateChannel { channel }.into()
                } else {
                    DomainError::Internal {
                        message: format!("Failed to save account: {}", e),
                    }
                }
            })?;

        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            UPDATE accounts
            SET email = ?, phone_number = ?, first_name = ?, last_name = ?,
                is_active = ?, is_phone_verified = ?, is_email_verified = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&account.email)
            .bind(&account.phone_number)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(account.is_active)
            .bind(account.is_phone_verified)
            .bind(account.is_email_verified)
            .bind(account.updated_at)
            .bind(account.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update account: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(VerificationError::NotFound {
                resource: "Account".to_string(),
            }
            .into());
        }

        Ok(account)
    }
}
