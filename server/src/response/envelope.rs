use application::envelope::{Envelope, Failure};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kernel::KernelError;
use serde::Serialize;

/// JSON rendering of a catalog [`Envelope`]: `{"state": true, ...body}` on success,
/// `{"state": false, "message" | "error": ...}` on failure.
#[derive(Debug)]
pub enum EnvelopeResponse<B> {
    Success { status: StatusCode, body: B },
    Failure(Failure),
}

impl<B> EnvelopeResponse<B> {
    pub fn present<T>(envelope: Envelope<T>, status: StatusCode, f: impl FnOnce(T) -> B) -> Self {
        match envelope {
            Envelope::Success(data) => EnvelopeResponse::Success {
                status,
                body: f(data),
            },
            Envelope::Failure(failure) => EnvelopeResponse::Failure(failure),
        }
    }
}

#[derive(Serialize)]
struct SuccessBody<B> {
    state: bool,
    #[serde(flatten)]
    body: B,
}

#[derive(Serialize)]
struct FailureBody<'a> {
    state: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl<B: Serialize> IntoResponse for EnvelopeResponse<B> {
    fn into_response(self) -> Response {
        match self {
            EnvelopeResponse::Success { status, body } => {
                (status, Json(SuccessBody { state: true, body })).into_response()
            }
            EnvelopeResponse::Failure(failure) => {
                let (status, body) = match failure.kind() {
                    KernelError::NotFound => (
                        StatusCode::NOT_FOUND,
                        FailureBody {
                            state: false,
                            message: Some(failure.message()),
                            error: None,
                        },
                    ),
                    KernelError::ConstraintViolation
                    | KernelError::StoreUnavailable
                    | KernelError::Timeout
                    | KernelError::Internal => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        FailureBody {
                            state: false,
                            message: None,
                            error: Some(failure.message()),
                        },
                    ),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
