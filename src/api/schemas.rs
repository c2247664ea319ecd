//! OpenAPI shapes of the auth envelope. The wire format itself is produced by
//! `shared::api::ApiResponse`; these types only describe it.
use serde::Serialize;
use utoipa::ToSchema;

/// Envelope returned by every auth endpoint on success.
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    #[schema(example = true)]
    pub success: bool,
    /// Account view, token pair or confirmation message.
    pub data: T,
}

/// Envelope returned for rejected auth requests; `data` is never present.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    /// `VALIDATION_ERROR`, `DUPLICATE_EMAIL`, `INVALID_CREDENTIALS`,
    /// `ACCOUNT_NOT_ACTIVE`, `UNAUTHENTICATED`, `FORBIDDEN`, `INVALID_TOKEN`,
    /// `INVALID_OR_EXPIRED_TOKEN`, `ACCOUNT_NOT_FOUND` or `INTERNAL_ERROR`.
    #[schema(example = "INVALID_CREDENTIALS")]
    pub code: String,

    /// Safe to show to the user; never carries storage or crypto detail.
    #[schema(example = "Invalid email or password")]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::ApiResponse;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_documented_error_matches_wire_envelope() {
        let documented = serde_json::to_value(ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: "INVALID_CREDENTIALS".to_string(),
                message: "Invalid email or password".to_string(),
            },
        })
        .unwrap();

        let resp = ApiResponse::error(
            StatusCode::UNAUTHORIZED,
            "INVALID_CREDENTIALS",
            "Invalid email or password",
        );
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let wire: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(documented, wire);
    }

    #[actix_web::test]
    async fn test_documented_success_matches_wire_envelope() {
        let data = serde_json::json!({ "message": "Email verified successfully" });
        let documented = serde_json::to_value(SuccessResponse {
            success: true,
            data: data.clone(),
        })
        .unwrap();

        let resp = ApiResponse::success(data);
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let wire: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(documented, wire);
    }
}
