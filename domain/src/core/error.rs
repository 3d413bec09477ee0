//! Domain error types
//!
//! Every failure the core can report carries a stable [`ErrorKind`] tag
//! (`malformed_response`, `missing_field:<name>`, `budget_exceeded`,
//! `insufficient_members`, `upstream_failure`) next to its human-readable
//! message.

use thiserror::Error;

/// Stable, machine-readable reason for a planning failure.
///
/// `Display` renders the wire tag, e.g. `missing_field:reason`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedResponse,
    MissingField(&'static str),
    BudgetExceeded,
    InsufficientMembers,
    UpstreamFailure,
}

impl ErrorKind {
    /// Whether the caller should re-issue the upstream request.
    ///
    /// Only validator and transport failures qualify; an empty group needs
    /// more submissions, not another engine call.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ErrorKind::InsufficientMembers)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::MalformedResponse => write!(f, "malformed_response"),
            ErrorKind::MissingField(name) => write!(f, "missing_field:{}", name),
            ErrorKind::BudgetExceeded => write!(f, "budget_exceeded"),
            ErrorKind::InsufficientMembers => write!(f, "insufficient_members"),
            ErrorKind::UpstreamFailure => write!(f, "upstream_failure"),
        }
    }
}

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("No preferences submitted yet")]
    InsufficientMembers,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Plan is missing required field '{0}'")]
    MissingField(&'static str),

    #[error(
        "Plan exceeds the group budget: per-person total {per_person_total} is above the budget floor {min_budget}"
    )]
    BudgetExceeded {
        per_person_total: f64,
        min_budget: f64,
    },
}

impl DomainError {
    /// The stable tag for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InsufficientMembers => ErrorKind::InsufficientMembers,
            DomainError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            DomainError::MissingField(name) => ErrorKind::MissingField(name),
            DomainError::BudgetExceeded { .. } => ErrorKind::BudgetExceeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(
            DomainError::MissingField("reason").kind().to_string(),
            "missing_field:reason"
        );
        assert_eq!(
            DomainError::InsufficientMembers.kind().to_string(),
            "insufficient_members"
        );
        assert_eq!(
            DomainError::MalformedResponse("x".into()).kind().to_string(),
            "malformed_response"
        );
        assert_eq!(ErrorKind::UpstreamFailure.to_string(), "upstream_failure");
    }

    #[test]
    fn test_budget_exceeded_message_names_both_values() {
        let error = DomainError::BudgetExceeded {
            per_person_total: 5000.0,
            min_budget: 3000.0,
        };
        let message = error.to_string();
        assert!(message.contains("5000"));
        assert!(message.contains("3000"));
        assert_eq!(error.kind(), ErrorKind::BudgetExceeded);
    }

    #[test]
    fn test_retryable() {
        assert!(ErrorKind::MalformedResponse.is_retryable());
        assert!(ErrorKind::BudgetExceeded.is_retryable());
        assert!(ErrorKind::UpstreamFailure.is_retryable());
        assert!(!ErrorKind::InsufficientMembers.is_retryable());
    }
}
