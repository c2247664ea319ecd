use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use futures::future::LocalBoxFuture;
use tracing::{error, warn};

use crate::auth::application::domain::entities::Account;
use crate::auth::application::use_cases::get_current_user::GetCurrentUserError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// The active account behind the request's bearer access token.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

fn unauthenticated() -> ActixError {
    create_api_error(ApiResponse::unauthorized(
        "UNAUTHENTICATED",
        "Missing, invalid or expired access token",
    ))
}

impl FromRequest for CurrentAccount {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = extract_token_from_header(req);

        Box::pin(async move {
            let Some(state) = state else {
                error!("AppState is not registered; cannot authenticate request");
                return Err(create_api_error(ApiResponse::internal_error()));
            };

            let Some(token) = token else {
                return Err(unauthenticated());
            };

            match state.get_current_user_use_case.execute(&token).await {
                Ok(account) => Ok(CurrentAccount(account)),

                Err(GetCurrentUserError::Unauthenticated) => Err(unauthenticated()),

                Err(GetCurrentUserError::Forbidden) => {
                    warn!("Bearer token belongs to an account that is not active");
                    Err(create_api_error(ApiResponse::forbidden(
                        "FORBIDDEN",
                        "Account is not active",
                    )))
                }

                Err(GetCurrentUserError::RepositoryError(e)) => {
                    error!(error = %e, "Failed to resolve current account");
                    Err(create_api_error(ApiResponse::internal_error()))
                }
            }
        })
    }
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|s| s.to_string())
}
