//! Response envelope.
//!
//! Every response body has the same shape:
//! `{success, data?, message?, error?}`. Successes carry `data`, failures
//! carry `error`, never both. `success` is true exactly for 2xx statuses.

use std::borrow::Cow;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// The JSON body of every response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
        }
    }
}

impl Envelope<()> {
    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error: Some(error.into()),
        }
    }
}

/// A successful handler result.
#[derive(Debug)]
pub struct Reply<T> {
    status: StatusCode,
    data: T,
    message: Cow<'static, str>,
}

impl<T> Reply<T> {
    /// 200 OK.
    pub fn ok(data: T, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status: StatusCode::OK,
            data,
            message: message.into(),
        }
    }

    /// 201 Created.
    pub fn created(data: T, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
            message: message.into(),
        }
    }

}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        let body = Envelope::success(self.data, self.message);
        (self.status, Json(body)).into_response()
    }
}

/// Which operation failed, for the human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Action {
    fn verb(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Get => "retrieve",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

/// A failed handler result. Only client-safe text ends up in the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: Cow<'static, str>,
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<Cow<'static, str>>, error: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error: error.into(),
        }
    }

    /// 400 for malformed or missing client input.
    pub fn bad_request(message: impl Into<Cow<'static, str>>, error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, error)
    }

    /// Map a classified store failure for `resource` to a status code.
    ///
    /// The status depends on the error kind only; `action` just words the message.
    pub fn from_store(err: StoreError, resource: &'static str, action: Action) -> Self {
        match err {
            StoreError::NotFound => Self::new(
                StatusCode::NOT_FOUND,
                format!("{} not found", resource),
                "not found",
            ),
            StoreError::Conflict(detail) => {
                tracing::debug!(resource, detail = %detail, "Store conflict");
                Self::new(
                    StatusCode::CONFLICT,
                    format!("{} already exists", resource),
                    "conflict",
                )
            }
            StoreError::Invalid(detail) => {
                tracing::debug!(resource, detail = %detail, "Store rejected values");
                Self::new(
                    StatusCode::BAD_REQUEST,
                    format!("invalid {}", resource),
                    "invalid data",
                )
            }
            StoreError::Unavailable(detail) | StoreError::Internal(detail) => {
                tracing::error!(resource, action = action.verb(), detail = %detail, "Store operation failed");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("failed to {} {}", action.verb(), resource),
                    "internal error",
                )
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error(&self) -> &str {
        &self.error
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Envelope::failure(self.message, self.error);
        (self.status, Json(body)).into_response()
    }
}
