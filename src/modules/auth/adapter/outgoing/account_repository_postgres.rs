use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::{
    Account, RoleProfile, TenantId, VerificationToken, VerificationTokenType,
};
use crate::auth::application::ports::outgoing::{
    AccountRepository, AccountRepositoryError, AccountUpdate, NewAccount, NewVerificationToken,
    RedemptionEffect,
};

use super::sea_orm_entity::{alumni, students, users, verification_tokens};

#[derive(Clone, Debug)]
pub struct AccountRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AccountRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_db_err(e: DbErr) -> AccountRepositoryError {
        AccountRepositoryError::DatabaseError(e.to_string())
    }

    fn map_insert_err(e: DbErr) -> AccountRepositoryError {
        let err_str = e.to_string().to_lowercase();
        if err_str.contains("23505")
            || err_str.contains("duplicate key")
            || err_str.contains("unique constraint")
        {
            return AccountRepositoryError::DuplicateEmail;
        }
        Self::map_db_err(e)
    }

    fn corrupt(what: &str, value: &str) -> AccountRepositoryError {
        AccountRepositoryError::DatabaseError(format!("Unexpected {} '{}' in storage", what, value))
    }

    fn to_account(model: users::Model) -> Result<Account, AccountRepositoryError> {
        Ok(Account {
            id: model.id,
            tenant_id: TenantId::from(model.university_id),
            role: model
                .role
                .parse()
                .map_err(|_| Self::corrupt("role", &model.role))?,
            status: model
                .status
                .parse()
                .map_err(|_| Self::corrupt("status", &model.status))?,
            email: model.email,
            password_hash: model.password_hash,
            email_verified: model.email_verified,
            email_verified_at: model.email_verified_at.map(|t| t.with_timezone(&Utc)),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            last_login_at: model.last_login_at.map(|t| t.with_timezone(&Utc)),
        })
    }

    fn to_token(
        model: verification_tokens::Model,
    ) -> Result<VerificationToken, AccountRepositoryError> {
        Ok(VerificationToken {
            id: model.id,
            account_id: model.user_id,
            token_type: model
                .token_type
                .parse()
                .map_err(|_| Self::corrupt("token type", &model.token_type))?,
            token: model.token,
            expires_at: model.expires_at.with_timezone(&Utc),
            used: model.used,
            created_at: model.created_at.with_timezone(&Utc),
        })
    }

    async fn insert_profile<C>(db: &C, profile: RoleProfile) -> Result<(), DbErr>
    where
        C: sea_orm::ConnectionTrait,
    {
        match profile {
            RoleProfile::Student(p) => {
                students::ActiveModel {
                    id: Set(p.account_id),
                    graduation_year: Set(p.graduation_year),
                    major: Set(p.major),
                    secondary_major: Set(p.secondary_major),
                    career_interests: Set(serde_json::json!(p.career_interests)),
                    current_location: Set(p.current_location),
                    bio: Set(p.bio),
                    linkedin_url: Set(p.linkedin_url),
                    resume_url: Set(p.resume_url),
                    reputation_score: Set(p.reputation_score),
                    total_requests: Set(p.total_requests),
                    successful_introductions: Set(p.successful_introductions),
                    created_at: Set(p.created_at.into()),
                    updated_at: Set(p.updated_at.into()),
                }
                .insert(db)
                .await?;
            }
            RoleProfile::Alumni(p) => {
                alumni::ActiveModel {
                    id: Set(p.account_id),
                    graduation_year: Set(p.graduation_year),
                    degree: Set(p.degree),
                    major: Set(p.major),
                    current_role: Set(p.current_role),
                    current_company: Set(p.current_company),
                    industry: Set(p.industry),
                    location: Set(p.location),
                    years_experience: Set(p.years_experience),
                    bio: Set(p.bio),
                    linkedin_url: Set(p.linkedin_url),
                    availability_status: Set(p.availability_status.as_str().to_string()),
                    max_requests_per_month: Set(p.max_requests_per_month),
                    current_month_requests: Set(p.current_month_requests),
                    helpfulness_score: Set(p.helpfulness_score),
                    total_introductions: Set(p.total_introductions),
                    response_rate: Set(p.response_rate),
                    created_at: Set(p.created_at.into()),
                    updated_at: Set(p.updated_at.into()),
                }
                .insert(db)
                .await?;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl AccountRepository for AccountRepositoryPostgres {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountRepositoryError> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?
            .map(Self::to_account)
            .transpose()
    }

    async fn find_by_id(
        &self,
        account_id: Uuid,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        users::Entity::find_by_id(account_id)
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?
            .map(Self::to_account)
            .transpose()
    }

    async fn create_account_with_profile(
        &self,
        account: NewAccount,
    ) -> Result<Account, AccountRepositoryError> {
        let now = Utc::now();
        let account_id = Uuid::new_v4();

        let txn = self.db.begin().await.map_err(Self::map_db_err)?;

        let user = users::ActiveModel {
            id: Set(account_id),
            university_id: Set(account.tenant_id.value()),
            email: Set(account.email),
            password_hash: Set(account.password_hash),
            role: Set(account.role.as_str().to_string()),
            status: Set("active".to_string()),
            email_verified: Set(false),
            email_verified_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            last_login_at: Set(None),
        };

        let inserted = match user.insert(&txn).await {
            Ok(model) => model,
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(Self::map_insert_err(e));
            }
        };

        let profile = RoleProfile::empty_for(account.role, account_id, now);
        if let Err(e) = Self::insert_profile(&txn, profile).await {
            let _ = txn.rollback().await;
            return Err(Self::map_db_err(e));
        }

        let token = verification_tokens::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(account_id),
            token: Set(account.verification_token),
            token_type: Set(VerificationTokenType::EmailVerification.as_str().to_string()),
            expires_at: Set(account.verification_expires_at.into()),
            used: Set(false),
            created_at: Set(now.into()),
        };
        if let Err(e) = token.insert(&txn).await {
            let _ = txn.rollback().await;
            return Err(Self::map_db_err(e));
        }

        txn.commit().await.map_err(Self::map_insert_err)?;

        Self::to_account(inserted)
    }

    async fn update(
        &self,
        account_id: Uuid,
        changes: AccountUpdate,
    ) -> Result<Account, AccountRepositoryError> {
        let user = users::Entity::find_by_id(account_id)
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?
            .ok_or(AccountRepositoryError::AccountNotFound)?;

        let mut active_user: users::ActiveModel = user.into();

        if let Some(status) = changes.status {
            active_user.status = Set(status.as_str().to_string());
        }
        if let Some(verified_at) = changes.email_verified_at {
            active_user.email_verified = Set(true);
            active_user.email_verified_at = Set(Some(verified_at.into()));
        }
        if let Some(last_login_at) = changes.last_login_at {
            active_user.last_login_at = Set(Some(last_login_at.into()));
        }
        if let Some(password_hash) = changes.password_hash {
            active_user.password_hash = Set(password_hash);
        }

        let updated = active_user
            .update(&*self.db)
            .await
            .map_err(Self::map_db_err)?;

        Self::to_account(updated)
    }

    async fn create_verification_token(
        &self,
        token: NewVerificationToken,
    ) -> Result<VerificationToken, AccountRepositoryError> {
        let inserted = verification_tokens::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(token.account_id),
            token: Set(token.token),
            token_type: Set(token.token_type.as_str().to_string()),
            expires_at: Set(token.expires_at.into()),
            used: Set(false),
            created_at: Set(Utc::now().into()),
        }
        .insert(&*self.db)
        .await
        .map_err(Self::map_db_err)?;

        Self::to_token(inserted)
    }

    async fn find_redeemable_token(
        &self,
        token: &str,
        token_type: VerificationTokenType,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationToken>, AccountRepositoryError> {
        verification_tokens::Entity::find()
            .filter(verification_tokens::Column::Token.eq(token))
            .filter(verification_tokens::Column::TokenType.eq(token_type.as_str()))
            .filter(verification_tokens::Column::Used.eq(false))
            .filter(verification_tokens::Column::ExpiresAt.gt(now))
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?
            .map(Self::to_token)
            .transpose()
    }

    async fn mark_token_used(&self, token_id: Uuid) -> Result<(), AccountRepositoryError> {
        let res = verification_tokens::Entity::update_many()
            .col_expr(verification_tokens::Column::Used, Expr::value(true))
            .filter(verification_tokens::Column::Id.eq(token_id))
            .filter(verification_tokens::Column::Used.eq(false))
            .exec(&*self.db)
            .await
            .map_err(Self::map_db_err)?;

        if res.rows_affected == 0 {
            return Err(AccountRepositoryError::TokenAlreadyRedeemed);
        }

        Ok(())
    }

    async fn redeem_token(
        &self,
        token: &VerificationToken,
        effect: RedemptionEffect,
        now: DateTime<Utc>,
    ) -> Result<(), AccountRepositoryError> {
        let txn = self.db.begin().await.map_err(Self::map_db_err)?;

        // Compare-and-swap on the token row: only one redemption can flip it
        let claimed = verification_tokens::Entity::update_many()
            .col_expr(verification_tokens::Column::Used, Expr::value(true))
            .filter(verification_tokens::Column::Id.eq(token.id))
            .filter(verification_tokens::Column::Used.eq(false))
            .filter(verification_tokens::Column::ExpiresAt.gt(now))
            .exec(&txn)
            .await;

        match claimed {
            Ok(res) if res.rows_affected == 1 => {}
            Ok(_) => {
                let _ = txn.rollback().await;
                return Err(AccountRepositoryError::TokenAlreadyRedeemed);
            }
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(Self::map_db_err(e));
            }
        }

        let update = users::Entity::update_many()
            .col_expr(
                users::Column::UpdatedAt,
                Expr::value(now.fixed_offset()),
            )
            .filter(users::Column::Id.eq(token.account_id));

        let update = match effect {
            RedemptionEffect::VerifyEmail => update
                .col_expr(users::Column::EmailVerified, Expr::value(true))
                .col_expr(
                    users::Column::EmailVerifiedAt,
                    Expr::value(now.fixed_offset()),
                ),
            RedemptionEffect::ResetPassword { password_hash } => {
                update.col_expr(users::Column::PasswordHash, Expr::value(password_hash))
            }
        };

        match update.exec(&txn).await {
            Ok(res) if res.rows_affected == 1 => {}
            Ok(_) => {
                let _ = txn.rollback().await;
                return Err(AccountRepositoryError::AccountNotFound);
            }
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(Self::map_db_err(e));
            }
        }

        txn.commit().await.map_err(Self::map_db_err)?;

        Ok(())
    }
}
