use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::routes::dto::AccountViewResponse;
use crate::auth::application::domain::entities::UserRole;
use crate::auth::application::use_cases::create_account::{CreateAccountError, CreateAccountInput};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Request body for account registration
#[derive(Deserialize, ToSchema)]
pub struct RegisterAccountRequest {
    #[schema(example = "alice@x.edu")]
    pub email: String,

    /// Between 8 and 128 characters
    #[schema(example = "password123")]
    pub password: String,

    /// `student` or `alumni`
    #[schema(value_type = String, example = "student")]
    pub role: UserRole,

    /// University the account belongs to
    #[schema(example = "5f0c6f3e-8a1b-4f43-9d51-1d4c5f6a7b8c")]
    pub tenant_id: String,
}

fn map_create_account_error(err: CreateAccountError, email: &str) -> HttpResponse {
    match err {
        CreateAccountError::InvalidEmail => {
            warn!(email = %email, "Invalid registration email");
            ApiResponse::bad_request("VALIDATION_ERROR", "Invalid email format")
        }

        CreateAccountError::InvalidPassword(msg) => {
            warn!(email = %email, error = %msg, "Invalid registration password");
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }

        CreateAccountError::DuplicateEmail => {
            warn!(email = %email, "Email already registered");
            ApiResponse::bad_request("DUPLICATE_EMAIL", "Email already registered")
        }

        other @ (CreateAccountError::HashingFailed(_) | CreateAccountError::RepositoryError(_)) => {
            error!(email = %email, error = %other, "Account registration failed");
            ApiResponse::internal_error()
        }
    }
}

/// Register a new account
///
/// Creates an active, unverified account with an empty role profile and mails a
/// verification link. Email delivery problems never fail the request.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = RegisterAccountRequest,
    responses(
        (
            status = 201,
            description = "Account created",
            body = inline(SuccessResponse<AccountViewResponse>),
            example = json!({
                "success": true,
                "data": {
                    "id": "123e4567-e89b-12d3-a456-426614174000",
                    "email": "alice@x.edu",
                    "role": "student",
                    "email_verified": false,
                    "created_at": "2026-01-01T00:00:00Z"
                }
            })
        ),
        (
            status = 400,
            description = "Validation error or duplicate email",
            body = ErrorResponse,
            examples(
                ("Invalid password" = (value = json!({
                    "success": false,
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "message": "Password must be at least 8 characters"
                    }
                }))),
                ("Duplicate email" = (value = json!({
                    "success": false,
                    "error": {
                        "code": "DUPLICATE_EMAIL",
                        "message": "Email already registered"
                    }
                })))
            )
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/v1/auth/register")]
pub async fn register_account_handler(
    req: web::Json<RegisterAccountRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();
    let email = dto.email.trim().to_string();

    info!(email = %email, role = %dto.role, "Account registration attempt");

    let input = CreateAccountInput {
        email: dto.email,
        password: dto.password,
        role: dto.role,
        tenant_id: dto.tenant_id,
    };

    match data
        .register_account_orchestrator
        .register_account(input)
        .await
    {
        Ok(view) => {
            info!(account_id = %view.id, email = %view.email, "Account registered");
            ApiResponse::created(AccountViewResponse::from(view))
        }
        Err(e) => map_create_account_error(e, &email),
    }
}
