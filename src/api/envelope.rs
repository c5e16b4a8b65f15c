//! Uniform response envelope
//!
//! Every response leaves the API as
//! `{ "code": 200, "success": true, "message": "", "result": { "<key>": ... } }`.
//! The result is either absent (`null`) or a single named value; [`Keyed`]
//! is the only way to build one, so nothing else can end up in `result`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use utoipa::ToSchema;

use crate::error::Error;

/// A result payload: one descriptive key mapped to a value
#[derive(Debug, Clone, PartialEq)]
pub struct Keyed<T> {
    pub key: &'static str,
    pub value: T,
}

impl<T: Serialize> Serialize for Keyed<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, &self.value)?;
        map.end()
    }
}

/// Response envelope. `success` is derived from the status when serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T = ()> {
    status: StatusCode,
    message: String,
    result: Option<Keyed<T>>,
}

impl Envelope<()> {
    /// 200, empty message, no result
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            message: String::new(),
            result: None,
        }
    }
}

impl Default for Envelope<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Envelope<T> {
    /// 200 envelope carrying `{key: value}`
    pub fn data(key: &'static str, value: T) -> Self {
        Envelope::<()>::new().result(key, value)
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Replace the result with `{key: value}`
    pub fn result<U>(self, key: &'static str, value: U) -> Envelope<U> {
        Envelope {
            status: self.status,
            message: self.message,
            result: Some(Keyed { key, value }),
        }
    }

    pub fn code(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Envelope", 4)?;
        state.serialize_field("code", &self.status.as_u16())?;
        state.serialize_field("success", &self.is_success())?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("result", &self.result)?;
        state.end()
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl Error {
    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Error::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Error::Config(_) | Error::Io(_) | Error::TomlDe(_) | Error::TomlSer(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Internal error");
            "An internal error occurred".to_string()
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
            self.to_string()
        };

        Envelope::new().status(status).message(message).into_response()
    }
}

/// Shape of [`Envelope`] for the OpenAPI document
#[derive(Debug, ToSchema)]
pub struct EnvelopeDoc {
    /// HTTP status code, repeated from the response line
    pub code: u16,
    /// True iff 200 <= code < 300
    pub success: bool,
    /// Human readable message, empty by default
    pub message: String,
    /// Single-key object such as `{"show": {...}}` or `{"shows": [...]}`
    #[schema(value_type = Option<Object>)]
    pub result: Option<serde_json::Value>,
}
