use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::routes::dto::MessageResponse;
use crate::auth::application::use_cases::verify_user_email::VerifyUserEmailError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::IntoParams;

#[derive(Deserialize, IntoParams)]
pub struct VerifyEmailQuery {
    /// Token from the verification link
    #[serde(default)]
    pub token: String,
}

/// Verify email ownership
///
/// Redeems a single-use verification token. A token works once and only
/// before it expires.
#[utoipa::path(
    post,
    path = "/api/v1/auth/verify-email",
    tag = "auth",
    params(VerifyEmailQuery),
    responses(
        (
            status = 200,
            description = "Email verified",
            body = inline(SuccessResponse<MessageResponse>),
        ),
        (
            status = 400,
            description = "Unknown, used or expired token",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "INVALID_OR_EXPIRED_TOKEN",
                    "message": "Invalid or expired verification token"
                }
            })
        ),
        (status = 404, description = "Account no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/v1/auth/verify-email")]
pub async fn verify_email_handler(
    query: web::Query<VerifyEmailQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.verify_user_email_use_case.execute(&query.token).await {
        Ok(()) => {
            info!("Email verified");
            ApiResponse::success(MessageResponse::new("Email verified successfully"))
        }

        Err(VerifyUserEmailError::InvalidOrExpiredToken) => {
            warn!("Email verification failed: invalid or expired token");
            ApiResponse::bad_request(
                "INVALID_OR_EXPIRED_TOKEN",
                "Invalid or expired verification token",
            )
        }

        Err(VerifyUserEmailError::AccountNotFound) => {
            warn!("Email verification failed: account not found");
            ApiResponse::not_found("ACCOUNT_NOT_FOUND", "Account not found")
        }

        Err(VerifyUserEmailError::RepositoryError(ref e)) => {
            error!(error = %e, "Email verification failed");
            ApiResponse::internal_error()
        }
    }
}
