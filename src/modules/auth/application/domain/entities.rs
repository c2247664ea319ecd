use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Role & Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Alumni,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Alumni => "alumni",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown value '{0}'")]
pub struct UnknownVariant(pub String);

impl FromStr for UserRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(UserRole::Student),
            "alumni" => Ok(UserRole::Alumni),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Lifecycle state of an account. Transitions happen outside this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
    Suspended,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
            AccountStatus::Suspended => "suspended",
        }
    }
}

impl FromStr for AccountStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AccountStatus::Active),
            "inactive" => Ok(AccountStatus::Inactive),
            "suspended" => Ok(AccountStatus::Suspended),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

// ============================================================================
// Tenant
// ============================================================================

/// Organisation boundary (a university) an account belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TenantId(Uuid);

impl TenantId {
    /// Parses a tenant id, falling back to a freshly generated one when the
    /// input is not a UUID. The flag tells whether a substitution happened.
    pub fn parse_or_generate(raw: &str) -> (Self, bool) {
        match Uuid::parse_str(raw.trim()) {
            Ok(id) => (Self(id), false),
            Err(_) => (Self(Uuid::new_v4()), true),
        }
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for TenantId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

// ============================================================================
// Account
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub status: AccountStatus,
    pub email_verified: bool,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    pub fn public_view(&self) -> AccountView {
        AccountView {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
            email_verified: self.email_verified,
            created_at: self.created_at,
        }
    }

    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
            email_verified: self.email_verified,
        }
    }
}

/// What callers may see of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountView {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSummary {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub email_verified: bool,
}

// ============================================================================
// Role profiles
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    #[default]
    Open,
    Limited,
    Closed,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Open => "open",
            AvailabilityStatus::Limited => "limited",
            AvailabilityStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentProfile {
    pub account_id: Uuid,
    pub graduation_year: Option<i32>,
    pub major: Option<String>,
    pub secondary_major: Option<String>,
    pub career_interests: Vec<String>,
    pub current_location: Option<String>,
    pub bio: Option<String>,
    pub linkedin_url: Option<String>,
    pub resume_url: Option<String>,
    // internal metrics, never exposed publicly
    pub reputation_score: f64,
    pub total_requests: i32,
    pub successful_introductions: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlumniProfile {
    pub account_id: Uuid,
    pub graduation_year: Option<i32>,
    pub degree: Option<String>,
    pub major: Option<String>,
    pub current_role: Option<String>,
    pub current_company: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub years_experience: Option<i32>,
    pub bio: Option<String>,
    pub linkedin_url: Option<String>,
    pub availability_status: AvailabilityStatus,
    pub max_requests_per_month: i32,
    pub current_month_requests: i32,
    // internal metrics, never exposed publicly
    pub helpfulness_score: f64,
    pub total_introductions: i32,
    pub response_rate: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Role specific extension of an [`Account`], keyed by the account id.
#[derive(Debug, Clone, PartialEq)]
pub enum RoleProfile {
    Student(StudentProfile),
    Alumni(AlumniProfile),
}

impl RoleProfile {
    /// Blank profile of the variant matching `role`; filled in later by
    /// profile completion.
    pub fn empty_for(role: UserRole, account_id: Uuid, now: DateTime<Utc>) -> Self {
        match role {
            UserRole::Student => RoleProfile::Student(StudentProfile {
                account_id,
                graduation_year: None,
                major: None,
                secondary_major: None,
                career_interests: Vec::new(),
                current_location: None,
                bio: None,
                linkedin_url: None,
                resume_url: None,
                reputation_score: 0.0,
                total_requests: 0,
                successful_introductions: 0,
                created_at: now,
                updated_at: now,
            }),
            UserRole::Alumni => RoleProfile::Alumni(AlumniProfile {
                account_id,
                graduation_year: None,
                degree: None,
                major: None,
                current_role: None,
                current_company: None,
                industry: None,
                location: None,
                years_experience: None,
                bio: None,
                linkedin_url: None,
                availability_status: AvailabilityStatus::Open,
                max_requests_per_month: 5,
                current_month_requests: 0,
                helpfulness_score: 0.0,
                total_introductions: 0,
                response_rate: 0.0,
                created_at: now,
                updated_at: now,
            }),
        }
    }

    pub fn role(&self) -> UserRole {
        match self {
            RoleProfile::Student(_) => UserRole::Student,
            RoleProfile::Alumni(_) => UserRole::Alumni,
        }
    }

    pub fn account_id(&self) -> Uuid {
        match self {
            RoleProfile::Student(p) => p.account_id,
            RoleProfile::Alumni(p) => p.account_id,
        }
    }
}

// ============================================================================
// Verification tokens
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationTokenType {
    EmailVerification,
    PasswordReset,
}

impl VerificationTokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationTokenType::EmailVerification => "email_verification",
            VerificationTokenType::PasswordReset => "password_reset",
        }
    }
}

impl FromStr for VerificationTokenType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email_verification" => Ok(VerificationTokenType::EmailVerification),
            "password_reset" => Ok(VerificationTokenType::PasswordReset),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerificationToken {
    pub id: Uuid,
    pub account_id: Uuid,
    pub token: String,
    pub token_type: VerificationTokenType,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl VerificationToken {
    /// A token can be redeemed only once and only before it expires.
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        !self.used && now < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(used: bool, expires_in: Duration) -> VerificationToken {
        let now = Utc::now();
        VerificationToken {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            token: "tok".to_string(),
            token_type: VerificationTokenType::EmailVerification,
            expires_at: now + expires_in,
            used,
            created_at: now,
        }
    }

    #[test]
    fn test_tenant_id_parses_valid_uuid() {
        let raw = "5f0c6f3e-8a1b-4f43-9d51-1d4c5f6a7b8c";
        let (tenant, substituted) = TenantId::parse_or_generate(raw);

        assert!(!substituted);
        assert_eq!(tenant.value().to_string(), raw);
    }

    #[test]
    fn test_tenant_id_substitutes_malformed_input() {
        let (first, substituted) = TenantId::parse_or_generate("harvard");
        let (second, _) = TenantId::parse_or_generate("harvard");

        assert!(substituted);
        assert_ne!(first, second, "Each substitution must be a fresh id");
    }

    #[test]
    fn test_empty_profile_matches_role() {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let student = RoleProfile::empty_for(UserRole::Student, id, now);
        let alumni = RoleProfile::empty_for(UserRole::Alumni, id, now);

        assert_eq!(student.role(), UserRole::Student);
        assert_eq!(alumni.role(), UserRole::Alumni);
        assert_eq!(student.account_id(), id);

        match alumni {
            RoleProfile::Alumni(p) => {
                assert_eq!(p.availability_status, AvailabilityStatus::Open);
                assert_eq!(p.max_requests_per_month, 5);
            }
            RoleProfile::Student(_) => panic!("Expected alumni profile"),
        }
    }

    #[test]
    fn test_token_redeemable_only_when_unused_and_unexpired() {
        let now = Utc::now();

        assert!(token(false, Duration::hours(1)).is_redeemable(now));
        assert!(!token(true, Duration::hours(1)).is_redeemable(now));
        assert!(!token(false, Duration::seconds(-1)).is_redeemable(now));
    }

    #[test]
    fn test_enum_round_trip_through_storage_strings() {
        assert_eq!("alumni".parse::<UserRole>().unwrap(), UserRole::Alumni);
        assert_eq!(
            "suspended".parse::<AccountStatus>().unwrap(),
            AccountStatus::Suspended
        );
        assert_eq!(
            "password_reset".parse::<VerificationTokenType>().unwrap(),
            VerificationTokenType::PasswordReset
        );
        assert!("teacher".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_public_view_hides_password_hash() {
        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            tenant_id: TenantId::from(Uuid::new_v4()),
            email: "alice@x.edu".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: UserRole::Student,
            status: AccountStatus::Active,
            email_verified: false,
            email_verified_at: None,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };

        let json = serde_json::to_string(&account.public_view()).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("\"role\":\"student\""));
    }
}
