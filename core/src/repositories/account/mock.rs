//! In-memory implementation of AccountRepository for tests and development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Account, ChannelKind};
use crate::errors::{DomainError, VerificationError};

use super::trait_::AccountRepository;

/// In-memory account repository
#[derive(Clone)]
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.phone_number.as_deref() == Some(phone_number))
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn exists_by_phone(&self, phone_number: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_phone(phone_number).await?.is_some())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        // Single write lock so the uniqueness check and insert are one
        // atomic step, matching a database unique index.
        let mut accounts = self.accounts.write().await;

        if let Some(email) = &account.email {
            if accounts.values().any(|a| a.email.as_ref() == Some(email)) {
                return Err(VerificationError::DuplicateChannel {
                    channel: ChannelKind::Email,
                }
                .into());
            }
        }
        if let Some(phone) = &account.phone_number {
            if accounts
                .values()
                .any(|a| a.phone_number.as_ref() == Some(phone))
            {
                return Err(VerificationError::DuplicateChannel {
                    channel: ChannelKind::Phone,
                }
                .into());
            }
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(VerificationError::NotFound {
                resource: "Account".to_string(),
            }
            .into());
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }
}
