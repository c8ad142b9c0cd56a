use thiserror::Error;

use crate::commerce::checkout::CheckoutError;
use crate::domain::cart::CartError;
use crate::quiz::QuizError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("conflict: {message}")]
    Conflict { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The request could not be processed. Check inputs and try again."
            }
            Self::Conflict { .. } => "That step is not available right now. Refresh and try again.",
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. }
            | Self::Conflict { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::Conflict { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        let unassigned = || "unassigned".to_owned();
        match value {
            // Out-of-order quiz navigation is a state conflict, not bad input.
            ApplicationError::Domain(DomainError::Quiz(
                error @ (QuizError::AlreadyCompleted
                | QuizError::AtFirstQuestion
                | QuizError::NotCompleted { .. }),
            )) => Self::Conflict { message: error.to_string(), correlation_id: unassigned() },
            ApplicationError::Domain(error) => {
                Self::BadRequest { message: error.to_string(), correlation_id: unassigned() }
            }
            ApplicationError::Configuration(message) => {
                Self::Internal { message, correlation_id: unassigned() }
            }
        }
    }
}
