use axum::http::StatusCode;

use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::contract::error::Status;
use crate::domain::error::DomainError;

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: Status,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    let problem = Problem::new(status, title, detail)
        .with_type(format!("https://errors.example.com/users/{}", code))
        .with_code(code.as_str())
        .with_instance(instance);

    // Add trace id from current tracing span if available
    let problem = if let Some(id) = tracing::Span::current().id() {
        problem.with_trace_id(id.into_u64().to_string())
    } else {
        problem
    };

    ProblemResponse(problem)
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::UserNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            Status::NotFound,
            "User not found",
            format!("User with id {} was not found", id),
            instance,
        ),
        DomainError::InvalidEmail { email } => from_parts(
            StatusCode::BAD_REQUEST,
            Status::InvalidArgument,
            "Invalid email",
            format!("Email '{}' is invalid", email),
            instance,
        ),
        DomainError::Validation { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            Status::InvalidArgument,
            "Validation error",
            format!("{}", e),
            instance,
        ),
        DomainError::Database { .. } | DomainError::Hashing { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Internal error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                Status::Internal,
                "Internal error",
                "An internal error occurred",
                instance,
            )
        }
    }
}
