use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::modules::movie::schema::{FieldIssue, IssueCode, SchemaError};

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorBody {
    pub error: Vec<FieldIssue>,
}

pub struct ApiSuccess<T>(pub T, pub StatusCode);

impl<T> IntoResponse for ApiSuccess<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let (body, status) = (self.0, self.1);
        (status, Json(body)).into_response()
    }
}

impl ApiSuccess<MessageBody> {
    pub fn message(message: &str, status: StatusCode) -> Self {
        Self(
            MessageBody {
                message: message.to_string(),
            },
            status,
        )
    }
}

#[derive(Debug)]
pub enum ApiError {
    /// Rendered as `{"message": ...}`.
    Message(String, StatusCode),
    /// Rendered as `{"error": ...}`.
    Error(String, StatusCode),
    /// Rendered as 400 `{"error": [issues]}`.
    Invalid(SchemaError),
}

impl From<SchemaError> for ApiError {
    fn from(err: SchemaError) -> Self {
        ApiError::Invalid(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Invalid(SchemaError::single(
            "body",
            IssueCode::InvalidType,
            rejection.body_text(),
        ))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Message(message, status) => (status, Json(MessageBody { message })).into_response(),
            ApiError::Error(error, status) => (status, Json(ErrorBody { error })).into_response(),
            ApiError::Invalid(err) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorBody { error: err.issues }),
            )
                .into_response(),
        }
    }
}
