use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::routes::dto::MessageResponse;
use crate::auth::application::use_cases::request_password_reset::RequestPasswordResetError;
use crate::auth::application::use_cases::reset_password::{ResetPasswordError, ResetPasswordInput};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

const RESET_REQUESTED_MESSAGE: &str =
    "If an account exists for this email, a password reset link has been sent";

#[derive(Deserialize, ToSchema)]
pub struct RequestPasswordResetDto {
    #[schema(example = "alice@x.edu")]
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ConfirmPasswordResetDto {
    /// Token from the reset link
    #[schema(example = "q4J1n0b9dQ2m8Zk7Qy3xW5v6u1t0s9r8p7o6n5m4l3k")]
    pub token: String,

    /// Between 8 and 128 characters
    #[schema(example = "new-password-456")]
    pub new_password: String,
}

/// Request a password reset
///
/// Mails a reset link when an active account owns the address. The answer is
/// the same whether or not one does.
#[utoipa::path(
    post,
    path = "/api/v1/auth/password-reset/request",
    tag = "auth",
    request_body = RequestPasswordResetDto,
    responses(
        (
            status = 200,
            description = "Request accepted",
            body = inline(SuccessResponse<MessageResponse>),
        ),
        (status = 400, description = "Malformed email", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/v1/auth/password-reset/request")]
pub async fn request_password_reset_handler(
    req: web::Json<RequestPasswordResetDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .password_reset_orchestrator
        .request_reset(&req.email)
        .await
    {
        Ok(()) => {
            info!("Password reset requested");
            ApiResponse::success(MessageResponse::new(RESET_REQUESTED_MESSAGE))
        }

        Err(RequestPasswordResetError::InvalidEmail) => {
            warn!("Password reset rejected: invalid email format");
            ApiResponse::bad_request("VALIDATION_ERROR", "Invalid email format")
        }

        Err(RequestPasswordResetError::RepositoryError(ref e)) => {
            error!(error = %e, "Password reset request failed");
            ApiResponse::internal_error()
        }
    }
}

/// Confirm a password reset
///
/// Redeems a reset token and replaces the account's password.
#[utoipa::path(
    post,
    path = "/api/v1/auth/password-reset/confirm",
    tag = "auth",
    request_body = ConfirmPasswordResetDto,
    responses(
        (
            status = 200,
            description = "Password changed",
            body = inline(SuccessResponse<MessageResponse>),
        ),
        (
            status = 400,
            description = "Weak password, or unknown, used or expired token",
            body = ErrorResponse,
            examples(
                ("Weak password" = (value = json!({
                    "success": false,
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "message": "Password must be at least 8 characters"
                    }
                }))),
                ("Bad token" = (value = json!({
                    "success": false,
                    "error": {
                        "code": "INVALID_OR_EXPIRED_TOKEN",
                        "message": "Invalid or expired reset token"
                    }
                })))
            )
        ),
        (status = 404, description = "Account no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/v1/auth/password-reset/confirm")]
pub async fn confirm_password_reset_handler(
    req: web::Json<ConfirmPasswordResetDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();
    let input = ResetPasswordInput {
        token: dto.token,
        new_password: dto.new_password,
    };

    match data.reset_password_use_case.execute(input).await {
        Ok(()) => {
            info!("Password reset completed");
            ApiResponse::success(MessageResponse::new("Password has been reset"))
        }

        Err(ResetPasswordError::InvalidPassword(msg)) => {
            warn!(error = %msg, "Password reset rejected: weak password");
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }

        Err(ResetPasswordError::InvalidOrExpiredToken) => {
            warn!("Password reset rejected: invalid or expired token");
            ApiResponse::bad_request("INVALID_OR_EXPIRED_TOKEN", "Invalid or expired reset token")
        }

        Err(ResetPasswordError::AccountNotFound) => {
            warn!("Password reset rejected: account not found");
            ApiResponse::not_found("ACCOUNT_NOT_FOUND", "Account not found")
        }

        Err(
            ref other @ (ResetPasswordError::HashingFailed(_)
            | ResetPasswordError::RepositoryError(_)),
        ) => {
            error!(error = %other, "Password reset failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::use_cases::request_password_reset::{
        IRequestPasswordResetUseCase, PasswordResetTicket,
    };
    use crate::auth::application::use_cases::reset_password::IResetPasswordUseCase;
    use crate::shared::api::custom_json_config;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::recording_notifier::{RecordingNotifier, SentEmail};
    use actix_web::{test, App};
    use async_trait::async_trait;

    struct MockRequestReset(Result<Option<PasswordResetTicket>, RequestPasswordResetError>);

    #[async_trait]
    impl IRequestPasswordResetUseCase for MockRequestReset {
        async fn execute(
            &self,
            _email: &str,
        ) -> Result<Option<PasswordResetTicket>, RequestPasswordResetError> {
            self.0.clone()
        }
    }

    struct MockResetPassword(Result<(), ResetPasswordError>);

    #[async_trait]
    impl IResetPasswordUseCase for MockResetPassword {
        async fn execute(&self, input: ResetPasswordInput) -> Result<(), ResetPasswordError> {
            assert_eq!(input.token, "reset-token");
            self.0.clone()
        }
    }

    async fn post_json(
        app_state: web::Data<AppState>,
        uri: &str,
        payload: serde_json::Value,
    ) -> (u16, serde_json::Value) {
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(custom_json_config())
                .service(request_password_reset_handler)
                .service(confirm_password_reset_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(uri)
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    const REQUEST_URI: &str = "/api/v1/auth/password-reset/request";
    const CONFIRM_URI: &str = "/api/v1/auth/password-reset/confirm";

    #[actix_web::test]
    async fn test_request_reset_mails_matching_account() {
        let notifier = RecordingNotifier::new();
        let app_state = TestAppStateBuilder::default()
            .with_request_password_reset(MockRequestReset(Ok(Some(PasswordResetTicket {
                email: "alice@x.edu".into(),
                token: "reset-token".into(),
            }))))
            .with_email_notifier(notifier.clone())
            .build();

        let (status, body) = post_json(
            app_state,
            REQUEST_URI,
            serde_json::json!({ "email": "alice@x.edu" }),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["data"]["message"], RESET_REQUESTED_MESSAGE);
        assert_eq!(
            notifier.wait_for(1).await,
            vec![SentEmail::PasswordReset {
                to: "alice@x.edu".into(),
                token: "reset-token".into()
            }]
        );
    }

    #[actix_web::test]
    async fn test_request_reset_unknown_email_looks_the_same() {
        let notifier = RecordingNotifier::new();
        let app_state = TestAppStateBuilder::default()
            .with_request_password_reset(MockRequestReset(Ok(None)))
            .with_email_notifier(notifier.clone())
            .build();

        let (status, body) = post_json(
            app_state,
            REQUEST_URI,
            serde_json::json!({ "email": "ghost@x.edu" }),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["data"]["message"], RESET_REQUESTED_MESSAGE);
        assert!(notifier.sent().await.is_empty());
    }

    #[actix_web::test]
    async fn test_request_reset_invalid_email() {
        let app_state = TestAppStateBuilder::default()
            .with_request_password_reset(MockRequestReset(Err(
                RequestPasswordResetError::InvalidEmail,
            )))
            .build();

        let (status, body) = post_json(
            app_state,
            REQUEST_URI,
            serde_json::json!({ "email": "nope" }),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    fn confirm_body() -> serde_json::Value {
        serde_json::json!({ "token": "reset-token", "new_password": "new-password-456" })
    }

    #[actix_web::test]
    async fn test_confirm_reset_success() {
        let app_state = TestAppStateBuilder::default()
            .with_reset_password(MockResetPassword(Ok(())))
            .build();

        let (status, body) = post_json(app_state, CONFIRM_URI, confirm_body()).await;

        assert_eq!(status, 200);
        assert_eq!(body["data"]["message"], "Password has been reset");
    }

    #[actix_web::test]
    async fn test_confirm_reset_error_mapping() {
        let cases = [
            (
                ResetPasswordError::InvalidPassword(
                    "Password must be at least 8 characters".into(),
                ),
                400,
                "VALIDATION_ERROR",
            ),
            (
                ResetPasswordError::InvalidOrExpiredToken,
                400,
                "INVALID_OR_EXPIRED_TOKEN",
            ),
            (
                ResetPasswordError::AccountNotFound,
                404,
                "ACCOUNT_NOT_FOUND",
            ),
            (
                ResetPasswordError::HashingFailed("oom".into()),
                500,
                "INTERNAL_ERROR",
            ),
            (
                ResetPasswordError::RepositoryError("down".into()),
                500,
                "INTERNAL_ERROR",
            ),
        ];

        for (error, expected_status, expected_code) in cases {
            let app_state = TestAppStateBuilder::default()
                .with_reset_password(MockResetPassword(Err(error)))
                .build();

            let (status, body) = post_json(app_state, CONFIRM_URI, confirm_body()).await;

            assert_eq!(status, expected_status);
            assert_eq!(body["error"]["code"], expected_code);
        }
    }

    #[actix_web::test]
    async fn test_confirm_reset_missing_field() {
        let (status, body) = post_json(
            TestAppStateBuilder::default().build(),
            CONFIRM_URI,
            serde_json::json!({ "token": "reset-token" }),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
