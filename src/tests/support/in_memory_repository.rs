use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::application::domain::entities::{
    Account, AccountStatus, RoleProfile, VerificationToken, VerificationTokenType,
};
use crate::auth::application::ports::outgoing::{
    AccountRepository, AccountRepositoryError, AccountUpdate, NewAccount, NewVerificationToken,
    RedemptionEffect,
};

#[derive(Default)]
struct State {
    accounts: HashMap<Uuid, Account>,
    profiles: HashMap<Uuid, RoleProfile>,
    tokens: HashMap<Uuid, VerificationToken>,
}

/// Repository over plain maps behind one lock, so every operation is atomic
/// the way the database transaction is.
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_account(&self, account: Account) {
        let mut state = self.state.lock().unwrap();
        let profile = RoleProfile::empty_for(account.role, account.id, account.created_at);
        state.profiles.insert(account.id, profile);
        state.accounts.insert(account.id, account);
    }

    pub fn set_status(&self, account_id: Uuid, status: AccountStatus) {
        let mut state = self.state.lock().unwrap();
        if let Some(account) = state.accounts.get_mut(&account_id) {
            account.status = status;
        }
    }

    pub fn account_by_email(&self, email: &str) -> Option<Account> {
        let state = self.state.lock().unwrap();
        state.accounts.values().find(|a| a.email == email).cloned()
    }

    pub fn tokens_for(&self, account_id: Uuid) -> Vec<VerificationToken> {
        let state = self.state.lock().unwrap();
        state
            .tokens
            .values()
            .filter(|t| t.account_id == account_id)
            .cloned()
            .collect()
    }

    pub fn account_count(&self) -> usize {
        self.state.lock().unwrap().accounts.len()
    }

    pub fn profile_count(&self) -> usize {
        self.state.lock().unwrap().profiles.len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountRepositoryError> {
        Ok(self.account_by_email(email))
    }

    async fn find_by_id(
        &self,
        account_id: Uuid,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        Ok(self.state.lock().unwrap().accounts.get(&account_id).cloned())
    }

    async fn create_account_with_profile(
        &self,
        account: NewAccount,
    ) -> Result<Account, AccountRepositoryError> {
        let mut state = self.state.lock().unwrap();

        if state.accounts.values().any(|a| a.email == account.email) {
            return Err(AccountRepositoryError::DuplicateEmail);
        }
        if state.tokens.values().any(|t| t.token == account.verification_token) {
            return Err(AccountRepositoryError::DatabaseError(
                "duplicate verification token".to_string(),
            ));
        }

        let now = Utc::now();
        let created = Account {
            id: Uuid::new_v4(),
            tenant_id: account.tenant_id,
            email: account.email,
            password_hash: account.password_hash,
            role: account.role,
            status: AccountStatus::Active,
            email_verified: false,
            email_verified_at: None,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };

        state.profiles.insert(
            created.id,
            RoleProfile::empty_for(created.role, created.id, now),
        );
        let token = VerificationToken {
            id: Uuid::new_v4(),
            account_id: created.id,
            token: account.verification_token,
            token_type: VerificationTokenType::EmailVerification,
            expires_at: account.verification_expires_at,
            used: false,
            created_at: now,
        };
        state.tokens.insert(token.id, token);
        state.accounts.insert(created.id, created.clone());

        Ok(created)
    }

    async fn update(
        &self,
        account_id: Uuid,
        changes: AccountUpdate,
    ) -> Result<Account, AccountRepositoryError> {
        let mut state = self.state.lock().unwrap();
        let account = state
            .accounts
            .get_mut(&account_id)
            .ok_or(AccountRepositoryError::AccountNotFound)?;

        if let Some(status) = changes.status {
            account.status = status;
        }
        if let Some(verified_at) = changes.email_verified_at {
            account.email_verified = true;
            account.email_verified_at = Some(verified_at);
        }
        if let Some(last_login_at) = changes.last_login_at {
            account.last_login_at = Some(last_login_at);
        }
        if let Some(password_hash) = changes.password_hash {
            account.password_hash = password_hash;
        }
        account.updated_at = Utc::now();

        Ok(account.clone())
    }

    async fn create_verification_token(
        &self,
        token: NewVerificationToken,
    ) -> Result<VerificationToken, AccountRepositoryError> {
        let mut state = self.state.lock().unwrap();

        if state.tokens.values().any(|t| t.token == token.token) {
            return Err(AccountRepositoryError::DatabaseError(
                "duplicate verification token".to_string(),
            ));
        }

        let stored = VerificationToken {
            id: Uuid::new_v4(),
            account_id: token.account_id,
            token: token.token,
            token_type: token.token_type,
            expires_at: token.expires_at,
            used: false,
            created_at: Utc::now(),
        };
        state.tokens.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn find_redeemable_token(
        &self,
        token: &str,
        token_type: VerificationTokenType,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationToken>, AccountRepositoryError> {
        let state = self.state.lock().unwrap();

        Ok(state
            .tokens
            .values()
            .find(|t| t.token == token && t.token_type == token_type && t.is_redeemable(now))
            .cloned())
    }

    async fn mark_token_used(&self, token_id: Uuid) -> Result<(), AccountRepositoryError> {
        let mut state = self.state.lock().unwrap();

        match state.tokens.get_mut(&token_id) {
            Some(token) if !token.used => {
                token.used = true;
                Ok(())
            }
            _ => Err(AccountRepositoryError::TokenAlreadyRedeemed),
        }
    }

    async fn redeem_token(
        &self,
        token: &VerificationToken,
        effect: RedemptionEffect,
        now: DateTime<Utc>,
    ) -> Result<(), AccountRepositoryError> {
        let mut state = self.state.lock().unwrap();

        let redeemable = state
            .tokens
            .get(&token.id)
            .is_some_and(|stored| stored.is_redeemable(now));
        if !redeemable {
            return Err(AccountRepositoryError::TokenAlreadyRedeemed);
        }

        let account = state
            .accounts
            .get_mut(&token.account_id)
            .ok_or(AccountRepositoryError::AccountNotFound)?;

        match effect {
            RedemptionEffect::VerifyEmail => {
                account.email_verified = true;
                account.email_verified_at = Some(now);
            }
            RedemptionEffect::ResetPassword { password_hash } => {
                account.password_hash = password_hash;
            }
        }
        account.updated_at = now;

        if let Some(stored) = state.tokens.get_mut(&token.id) {
            stored.used = true;
        }

        Ok(())
    }
}
