use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum KernelError {
    NotFound,
    ConstraintViolation,
    StoreUnavailable,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotFound => write!(f, "Requested record was not found"),
            KernelError::ConstraintViolation => write!(f, "Record violates a store constraint"),
            KernelError::StoreUnavailable => write!(f, "Record store is unavailable"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
