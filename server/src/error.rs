use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use kernel::KernelError;
use serde::Serialize;
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

/// Malformed request input, rejected before any catalog operation runs.
#[derive(Debug)]
pub struct RequestRejection(String);

impl RequestRejection {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<PathRejection> for RequestRejection {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.body_text())
    }
}

impl From<JsonRejection> for RequestRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.body_text())
    }
}

impl From<QueryRejection> for RequestRejection {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.body_text())
    }
}

#[derive(Serialize)]
struct RejectionBody {
    state: bool,
    error: String,
}

impl IntoResponse for RequestRejection {
    fn into_response(self) -> axum::response::Response {
        let body = RejectionBody {
            state: false,
            error: self.0,
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
