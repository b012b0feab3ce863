use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ordermate_core::domain::common::{
    entities::{app_errors::CoreError, language::Language},
    i18n::{MessageKey, localized},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
    pub status: i64,
}

impl ApiError {
    /// Maps a core failure to a response carrying a localized, user-facing message.
    pub fn from_core(error: CoreError, language: Language) -> Self {
        match error {
            CoreError::EmptyInput => {
                ApiError::BadRequest(localized(language, MessageKey::EmptyInput).to_string())
            }
            other => {
                tracing::error!("chat turn failed: {}", other);
                ApiError::InternalServerError(localized(language, MessageKey::Apology).to_string())
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        ApiError::from_core(error, Language::default())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, "E_BAD_REQUEST", message),
            ApiError::InternalServerError(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "E_INTERNAL_SERVER_ERROR",
                message,
            ),
        };

        let body = ApiErrorResponse {
            code: code.to_string(),
            message,
            status: i64::from(status.as_u16()),
        };

        (status, Json(body)).into_response()
    }
}

/// `Json<T>` that also runs `validator` rules; both failures become a 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!("rejected request body: {}", e.body_text());
            ApiError::BadRequest(e.body_text())
        })?;

        value.validate().map_err(|e| {
            tracing::debug!("request body failed validation: {}", e);
            ApiError::BadRequest(e.to_string())
        })?;

        Ok(ValidateJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_a_localized_bad_request() {
        let error = ApiError::from_core(CoreError::EmptyInput, Language::En);
        assert_eq!(
            error,
            ApiError::BadRequest(localized(Language::En, MessageKey::EmptyInput).to_string())
        );
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unrecoverable_carries_the_apology() {
        let error = ApiError::from(CoreError::Unrecoverable);
        assert_eq!(
            error,
            ApiError::InternalServerError(localized(Language::Zh, MessageKey::Apology).to_string())
        );
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
