use std::env;

use jsonwebtoken::Algorithm;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, MIN_SECRET_LEN};

/// Upper bound for `REFRESH_TOKEN_EXPIRE_DAYS`. Access tokens must expire
/// sooner, so this caps both lifetimes.
pub const MAX_REFRESH_TOKEN_DAYS: i64 = 3650;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// `false` talks plaintext SMTP, for local catchers such as Mailpit.
    pub tls: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Config {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

/// Everything the service reads from the environment, validated once at
/// startup and handed to constructors from there.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    /// `None` when `SMTP_HOST` is empty, or when TLS is on and `SMTP_USER` is
    /// empty; emails are then only logged.
    pub smtp: Option<SmtpConfig>,
    pub email_from: String,
    pub frontend_url: String,
    pub cors_origins: Vec<String>,
    pub argon2: Argon2Config,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(&lookup);

        let database_url = vars.required("DATABASE_URL")?;
        let host = vars.or("HOST", "127.0.0.1");
        let port = vars.parsed("PORT", 8080u16)?;

        let jwt = Self::jwt_config(&vars)?;

        let smtp_host = vars.or("SMTP_HOST", "");
        let smtp = if smtp_host.is_empty() {
            None
        } else {
            let smtp = SmtpConfig {
                host: smtp_host,
                port: vars.parsed("SMTP_PORT", 587u16)?,
                username: vars.or("SMTP_USER", ""),
                password: vars.or("SMTP_PASSWORD", ""),
                tls: vars.parsed("SMTP_TLS", true)?,
            };
            // A TLS relay without credentials rejects every message
            (!smtp.tls || !smtp.username.is_empty()).then_some(smtp)
        };

        let email_from = vars.or("EMAIL_FROM", "noreply@alumni-connect.local");
        let frontend_url = vars.or("FRONTEND_URL", "http://localhost:3000");

        let cors_origins = vars
            .or("CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let argon2 = Argon2Config {
            memory_kib: vars.parsed("ARGON2_MEMORY_KIB", argon2::Params::DEFAULT_M_COST)?,
            iterations: vars.parsed("ARGON2_ITERATIONS", argon2::Params::DEFAULT_T_COST)?,
            parallelism: vars.parsed("ARGON2_PARALLELISM", argon2::Params::DEFAULT_P_COST)?,
        };
        argon2::Params::new(argon2.memory_kib, argon2.iterations, argon2.parallelism, None)
            .map_err(|e| ConfigError::Invalid {
                key: "ARGON2_MEMORY_KIB",
                reason: format!("rejected Argon2 cost parameters: {e}"),
            })?;

        Ok(Self {
            database_url,
            host,
            port,
            jwt,
            smtp,
            email_from,
            frontend_url,
            cors_origins,
            argon2,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn jwt_config(vars: &Vars<'_>) -> Result<JwtConfig, ConfigError> {
        let secret_key = vars.required("JWT_SECRET")?;
        if secret_key.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                reason: format!("must be at least {MIN_SECRET_LEN} characters"),
            });
        }

        let algorithm_name = vars.or("JWT_ALGORITHM", "HS256");
        let algorithm: Algorithm =
            JwtConfig::parse_algorithm(&algorithm_name).ok_or(ConfigError::Invalid {
                key: "JWT_ALGORITHM",
                reason: format!("unsupported algorithm '{algorithm_name}'"),
            })?;

        let access_minutes: i64 = vars.parsed("ACCESS_TOKEN_EXPIRE_MINUTES", 60)?;
        let refresh_days: i64 = vars.parsed("REFRESH_TOKEN_EXPIRE_DAYS", 30)?;

        if access_minutes <= 0 {
            return Err(ConfigError::Invalid {
                key: "ACCESS_TOKEN_EXPIRE_MINUTES",
                reason: "must be positive".to_string(),
            });
        }

        if refresh_days > MAX_REFRESH_TOKEN_DAYS {
            return Err(ConfigError::Invalid {
                key: "REFRESH_TOKEN_EXPIRE_DAYS",
                reason: format!("must not exceed {MAX_REFRESH_TOKEN_DAYS} days"),
            });
        }

        let access_token_expiry = access_minutes
            .checked_mul(60)
            .ok_or_else(|| ConfigError::Invalid {
                key: "ACCESS_TOKEN_EXPIRE_MINUTES",
                reason: "value is too large".to_string(),
            })?;
        let refresh_token_expiry = refresh_days
            .checked_mul(86_400)
            .ok_or_else(|| ConfigError::Invalid {
                key: "REFRESH_TOKEN_EXPIRE_DAYS",
                reason: "value is too large".to_string(),
            })?;

        if refresh_token_expiry <= access_token_expiry {
            return Err(ConfigError::Invalid {
                key: "REFRESH_TOKEN_EXPIRE_DAYS",
                reason: "refresh tokens must outlive access tokens".to_string(),
            });
        }

        Ok(JwtConfig {
            secret_key,
            algorithm,
            access_token_expiry,
            refresh_token_expiry,
        })
    }
}

struct Vars<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Vars<'_> {
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key))
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
            }),
        }
    }
}
