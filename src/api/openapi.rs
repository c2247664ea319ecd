use crate::api::schemas::{ErrorDetail, ErrorResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::auth::adapter::incoming::web::routes::{
    AccountSummaryResponse, AccountViewResponse, ConfirmPasswordResetDto, LoginRequestDto,
    MessageResponse, RefreshTokenDto, RegisterAccountRequest, RequestPasswordResetDto,
    TokenPairDto,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Alumni Connect Auth API",
        version = "1.0.0",
        description = "Account registration, login, bearer tokens and email verification"
    ),
    paths(
        crate::auth::adapter::incoming::web::routes::register_account_handler,
        crate::auth::adapter::incoming::web::routes::login_user_handler,
        crate::auth::adapter::incoming::web::routes::refresh_token_handler,
        crate::auth::adapter::incoming::web::routes::current_user_handler,
        crate::auth::adapter::incoming::web::routes::verify_email_handler,
        crate::auth::adapter::incoming::web::routes::request_password_reset_handler,
        crate::auth::adapter::incoming::web::routes::confirm_password_reset_handler,
    ),
    components(
        schemas(
            ErrorResponse,
            ErrorDetail,
            RegisterAccountRequest,
            LoginRequestDto,
            RefreshTokenDto,
            RequestPasswordResetDto,
            ConfirmPasswordResetDto,
            AccountViewResponse,
            AccountSummaryResponse,
            TokenPairDto,
            MessageResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Accounts, credentials and sessions"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from login or refresh"))
                        .build(),
                ),
            )
        }
    }
}
