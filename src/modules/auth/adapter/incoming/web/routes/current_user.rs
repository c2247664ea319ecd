use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::CurrentAccount;
use crate::auth::adapter::incoming::web::routes::dto::AccountViewResponse;
use crate::shared::api::ApiResponse;
use actix_web::{get, Responder};

/// Current account
///
/// Returns the account behind the bearer access token.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    security(("BearerAuth" = [])),
    responses(
        (
            status = 200,
            description = "Authenticated account",
            body = inline(SuccessResponse<AccountViewResponse>),
        ),
        (
            status = 401,
            description = "Missing, invalid or expired access token",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "UNAUTHENTICATED",
                    "message": "Missing, invalid or expired access token"
                }
            })
        ),
        (status = 403, description = "Account is not active", body = ErrorResponse),
    )
)]
#[get("/api/v1/auth/me")]
pub async fn current_user_handler(current: CurrentAccount) -> impl Responder {
    let CurrentAccount(account) = current;
    ApiResponse::success(AccountViewResponse::from(account.public_view()))
}
