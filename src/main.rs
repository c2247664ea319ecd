pub mod api;
pub mod config;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::auth;
pub use modules::email;

use crate::auth::adapter::outgoing::jwt::JwtTokenService;
use crate::auth::adapter::outgoing::security::{Argon2Hasher, RandomTokenGenerator};
use crate::auth::adapter::outgoing::AccountRepositoryPostgres;
use crate::auth::application::orchestrator::{
    AccountRegistrationOrchestrator, PasswordResetOrchestrator,
};
use crate::auth::application::ports::incoming::password_policy::PasswordPolicy;
use crate::auth::application::ports::outgoing::{
    PasswordHasher, TokenProvider, VerificationTokenGenerator,
};
use crate::auth::application::services::password::BasicPasswordPolicy;
use crate::auth::application::use_cases::{
    create_account::CreateAccountUseCase,
    get_current_user::{GetCurrentUserUseCase, IGetCurrentUserUseCase},
    login_user::{ILoginUserUseCase, LoginUserUseCase},
    refresh_token::{IRefreshTokenUseCase, RefreshTokenUseCase},
    request_password_reset::RequestPasswordResetUseCase,
    reset_password::{IResetPasswordUseCase, ResetPasswordUseCase},
    verify_user_email::{IVerifyUserEmailUseCase, VerifyUserEmailUseCase},
};
use crate::config::{AppConfig, SmtpConfig};
use crate::email::adapter::outgoing::{LogEmailSender, SmtpEmailSender};
use crate::email::application::ports::outgoing::{AccountEmailNotifier, EmailError, EmailSender};
use crate::email::application::services::AccountEmailService;
use crate::shared::api::custom_json_config;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub register_account_orchestrator: Arc<AccountRegistrationOrchestrator>,
    pub login_user_use_case: Arc<dyn ILoginUserUseCase>,
    pub refresh_token_use_case: Arc<dyn IRefreshTokenUseCase>,
    pub get_current_user_use_case: Arc<dyn IGetCurrentUserUseCase>,
    pub verify_user_email_use_case: Arc<dyn IVerifyUserEmailUseCase>,
    pub password_reset_orchestrator: Arc<PasswordResetOrchestrator>,
    pub reset_password_use_case: Arc<dyn IResetPasswordUseCase>,
}

fn build_email_sender(
    smtp: Option<&SmtpConfig>,
    email_from: &str,
) -> Result<Arc<dyn EmailSender>, EmailError> {
    let Some(smtp) = smtp else {
        warn!("SMTP is not configured; emails will be logged instead of sent");
        return Ok(Arc::new(LogEmailSender::new()));
    };

    if smtp.tls {
        let sender = SmtpEmailSender::new(
            &smtp.host,
            smtp.port,
            &smtp.username,
            &smtp.password,
            email_from,
        )?;
        Ok(Arc::new(sender))
    } else {
        warn!(host = %smtp.host, "SMTP TLS disabled; use only with a local mail catcher");
        Ok(Arc::new(SmtpEmailSender::new_local(
            &smtp.host, smtp.port, email_from,
        )))
    }
}

fn build_state(
    config: &AppConfig,
    repository: AccountRepositoryPostgres,
) -> std::io::Result<AppState> {
    let hasher = Argon2Hasher::with_params(
        config.argon2.memory_kib,
        config.argon2.iterations,
        config.argon2.parallelism,
    )
    .map_err(|e| std::io::Error::other(format!("Invalid Argon2 parameters: {e}")))?;

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(hasher);
    let password_policy: Arc<dyn PasswordPolicy> = Arc::new(BasicPasswordPolicy);
    let token_provider: Arc<dyn TokenProvider> =
        Arc::new(JwtTokenService::new(config.jwt.clone()));
    let token_generator: Arc<dyn VerificationTokenGenerator> = Arc::new(RandomTokenGenerator);

    let email_sender = build_email_sender(config.smtp.as_ref(), &config.email_from)
        .map_err(|e| std::io::Error::other(format!("Email transport setup failed: {e}")))?;
    let email_notifier: Arc<dyn AccountEmailNotifier> = Arc::new(AccountEmailService::new(
        email_sender,
        &config.frontend_url,
    ));

    let create_account_use_case = CreateAccountUseCase::new(
        repository.clone(),
        password_policy.clone(),
        password_hasher.clone(),
        token_generator.clone(),
    );
    let register_account_orchestrator = AccountRegistrationOrchestrator::new(
        Arc::new(create_account_use_case),
        email_notifier.clone(),
    );

    let request_reset_use_case =
        RequestPasswordResetUseCase::new(repository.clone(), token_generator);
    let password_reset_orchestrator =
        PasswordResetOrchestrator::new(Arc::new(request_reset_use_case), email_notifier);

    let login_user_use_case = LoginUserUseCase::new(
        repository.clone(),
        password_hasher.clone(),
        token_provider.clone(),
    );
    let refresh_token_use_case =
        RefreshTokenUseCase::new(repository.clone(), token_provider.clone());
    let get_current_user_use_case = GetCurrentUserUseCase::new(repository.clone(), token_provider);
    let verify_user_email_use_case = VerifyUserEmailUseCase::new(repository.clone());
    let reset_password_use_case =
        ResetPasswordUseCase::new(repository, password_policy, password_hasher);

    Ok(AppState {
        register_account_orchestrator: Arc::new(register_account_orchestrator),
        login_user_use_case: Arc::new(login_user_use_case),
        refresh_token_use_case: Arc::new(refresh_token_use_case),
        get_current_user_use_case: Arc::new(get_current_user_use_case),
        verify_user_email_use_case: Arc::new(verify_user_email_use_case),
        password_reset_orchestrator: Arc::new(password_reset_orchestrator),
        reset_password_use_case: Arc::new(reset_password_use_case),
    })
}

fn build_cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::AUTHORIZATION,
            actix_web::http::header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Try .env.{environment} first, then fall back to .env
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    // Database connection
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(50)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt).await.map_err(|e| {
        error!(error = %e, "Failed to connect to database");
        std::io::Error::other(e)
    })?;
    let db_arc = Arc::new(conn);

    let state = build_state(&config, AccountRepositoryPostgres::new(Arc::clone(&db_arc)))?;

    let server_url = config.bind_address();
    let cors_origins = config.cors_origins.clone();
    let openapi = api::openapi::ApiDoc::openapi();

    info!(address = %server_url, environment = %env, "Server listening");

    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&cors_origins))
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&db_arc)))
            .app_data(custom_json_config())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await
}

fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::register_account_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::login_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::refresh_token_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::current_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::verify_email_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::request_password_reset_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::confirm_password_reset_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
        std::process::exit(1);
    }
}
