use chrono::Utc;
use uuid::Uuid;

use crate::auth::application::domain::entities::{Account, AccountStatus, TenantId, UserRole};

pub fn account(email: &str, role: UserRole, status: AccountStatus) -> Account {
    let now = Utc::now();

    Account {
        id: Uuid::new_v4(),
        tenant_id: TenantId::from(Uuid::new_v4()),
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=4096,t=1,p=1$c2FsdA$aGFzaA".to_string(),
        role,
        status,
        email_verified: false,
        email_verified_at: None,
        created_at: now,
        updated_at: now,
        last_login_at: None,
    }
}

pub fn active_student(email: &str) -> Account {
    account(email, UserRole::Student, AccountStatus::Active)
}
