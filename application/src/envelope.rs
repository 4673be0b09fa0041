use error_stack::Report;

use kernel::KernelError;

/// Outcome of a catalog operation.
///
/// Store failures never escape a service as errors; they are folded into [`Envelope::Failure`]
/// so the transport layer can render every operation the same way.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Envelope<T> {
    Success(T),
    Failure(Failure),
}

impl<T> Envelope<T> {
    pub fn success(self) -> Option<T> {
        match self {
            Envelope::Success(data) => Some(data),
            Envelope::Failure(_) => None,
        }
    }

    pub fn failure(self) -> Option<Failure> {
        match self {
            Envelope::Success(_) => None,
            Envelope::Failure(failure) => Some(failure),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        match self {
            Envelope::Success(data) => Envelope::Success(f(data)),
            Envelope::Failure(failure) => Envelope::Failure(failure),
        }
    }
}

impl<T> From<error_stack::Result<T, KernelError>> for Envelope<T> {
    fn from(result: error_stack::Result<T, KernelError>) -> Self {
        match result {
            Ok(data) => Envelope::Success(data),
            Err(report) => Envelope::Failure(Failure::from(report)),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Failure {
    kind: KernelError,
    message: String,
}

impl Failure {
    pub fn new(kind: KernelError, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> KernelError {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<Report<KernelError>> for Failure {
    fn from(report: Report<KernelError>) -> Self {
        let kind = *report.current_context();
        // The newest printable String is the reason attached where the failure happened.
        let message = report
            .downcast_ref::<String>()
            .cloned()
            .unwrap_or_else(|| kind.to_string());
        match kind {
            KernelError::NotFound => tracing::debug!(%message, "catalog lookup missed"),
            _ => tracing::error!("{report:?}"),
        }
        Self { kind, message }
    }
}
