use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::routes::dto::TokenPairDto;
use crate::auth::application::use_cases::refresh_token::{RefreshTokenError, RefreshTokenRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct RefreshTokenDto {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh_token: String,
}

/// Refresh the token pair
///
/// Exchanges a valid refresh token of an active account for a new pair. The
/// presented refresh token stays valid until it expires.
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "auth",
    request_body = RefreshTokenDto,
    responses(
        (
            status = 200,
            description = "New token pair issued",
            body = inline(SuccessResponse<TokenPairDto>),
        ),
        (
            status = 401,
            description = "Refresh token rejected",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "INVALID_TOKEN",
                    "message": "Invalid refresh token"
                }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/v1/auth/refresh")]
pub async fn refresh_token_handler(
    req: web::Json<RefreshTokenDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    info!("Token refresh attempt");

    let request = match RefreshTokenRequest::new(req.into_inner().refresh_token) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Token refresh rejected");
            return ApiResponse::unauthorized("INVALID_TOKEN", "Invalid refresh token");
        }
    };

    match data.refresh_token_use_case.execute(request).await {
        Ok(pair) => {
            info!(account_id = %pair.user.id, "Token refreshed");
            ApiResponse::success(TokenPairDto::from(pair))
        }

        Err(RefreshTokenError::InvalidToken) => {
            warn!("Token refresh failed: invalid refresh token");
            ApiResponse::unauthorized("INVALID_TOKEN", "Invalid refresh token")
        }

        Err(RefreshTokenError::TokenGenerationFailed(ref e)) => {
            error!(error = %e, "Token generation failed");
            ApiResponse::internal_error()
        }

        Err(RefreshTokenError::RepositoryError(ref e)) => {
            error!(error = %e, "Account lookup failed during refresh");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::use_cases::login_user::TokenPairResponse;
    use crate::auth::application::use_cases::refresh_token::IRefreshTokenUseCase;
    use crate::shared::api::custom_json_config;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::fixtures;
    use actix_web::{test, App};
    use async_trait::async_trait;

    struct MockRefresh(Option<RefreshTokenError>);

    #[async_trait]
    impl IRefreshTokenUseCase for MockRefresh {
        async fn execute(
            &self,
            request: RefreshTokenRequest,
        ) -> Result<TokenPairResponse, RefreshTokenError> {
            if let Some(e) = &self.0 {
                return Err(e.clone());
            }

            assert_eq!(request.refresh_token(), "refresh.jwt");

            Ok(TokenPairResponse {
                access_token: "new-access.jwt".to_string(),
                refresh_token: "new-refresh.jwt".to_string(),
                token_type: "bearer".to_string(),
                expires_in: 3600,
                user: fixtures::active_student("alice@x.edu").summary(),
            })
        }
    }

    async fn post_refresh(
        app_state: web::Data<AppState>,
        payload: serde_json::Value,
    ) -> (u16, serde_json::Value) {
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(custom_json_config())
                .service(refresh_token_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .set_json(&payload)
            .to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_refresh_success() {
        let app_state = TestAppStateBuilder::default()
            .with_refresh_token(MockRefresh(None))
            .build();

        let (status, body) = post_refresh(
            app_state,
            serde_json::json!({ "refresh_token": "refresh.jwt" }),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["data"]["access_token"], "new-access.jwt");
        assert_eq!(body["data"]["refresh_token"], "new-refresh.jwt");
        assert_eq!(body["data"]["token_type"], "bearer");
    }

    #[actix_web::test]
    async fn test_refresh_surrounding_whitespace_is_ignored() {
        let app_state = TestAppStateBuilder::default()
            .with_refresh_token(MockRefresh(None))
            .build();

        let (status, _) = post_refresh(
            app_state,
            serde_json::json!({ "refresh_token": "  refresh.jwt\n" }),
        )
        .await;

        assert_eq!(status, 200);
    }

    #[actix_web::test]
    async fn test_refresh_invalid_token() {
        let app_state = TestAppStateBuilder::default()
            .with_refresh_token(MockRefresh(Some(RefreshTokenError::InvalidToken)))
            .build();

        let (status, body) = post_refresh(
            app_state,
            serde_json::json!({ "refresh_token": "refresh.jwt" }),
        )
        .await;

        assert_eq!(status, 401);
        assert_eq!(body["error"]["code"], "INVALID_TOKEN");
    }

    #[actix_web::test]
    async fn test_refresh_blank_token_is_invalid_token() {
        let app_state = TestAppStateBuilder::default()
            .with_refresh_token(MockRefresh(None))
            .build();

        let (status, body) =
            post_refresh(app_state, serde_json::json!({ "refresh_token": "   " })).await;

        assert_eq!(status, 401);
        assert_eq!(body["error"]["code"], "INVALID_TOKEN");
    }

    #[actix_web::test]
    async fn test_refresh_generation_failure() {
        let app_state = TestAppStateBuilder::default()
            .with_refresh_token(MockRefresh(Some(RefreshTokenError::TokenGenerationFailed(
                "bad key".into(),
            ))))
            .build();

        let (status, body) = post_refresh(
            app_state,
            serde_json::json!({ "refresh_token": "refresh.jwt" }),
        )
        .await;

        assert_eq!(status, 500);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    }
}
