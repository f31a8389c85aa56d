// ============================================================================
// ERRORS - Discriminated error types for the portal
// ============================================================================

/// Failures talking to the school backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failures of the persistent key/value store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("could not write key {key}")]
    Write { key: String },

    /// A persisted value exists but cannot be decoded.
    #[error("corrupted value under key {key}: {reason}")]
    Corrupt { key: String, reason: String },
}

/// Errors surfaced to callers of the session store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    /// The backend rejected the admission number / password pair.
    #[error("invalid admission number or password")]
    InvalidCredentials,

    /// The login call succeeded but carried no student record.
    #[error("login response did not include a student record")]
    MissingStudent,

    /// An operation needing a logged-in student ran without one.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The session could not be persisted.
    #[error("could not save the session: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Api(ApiError),
}

impl AuthError {
    /// Inline message for the login form and dashboard
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials => "Invalid admission number or password.".to_string(),
            AuthError::MissingStudent => {
                "We could not load your student record. Please contact the school office.".to_string()
            }
            AuthError::NotAuthenticated => "Your session has ended. Please log in again.".to_string(),
            AuthError::Storage(_) => {
                "Your browser blocked saving the session. Enable site storage and retry.".to_string()
            }
            AuthError::Api(ApiError::Network(_)) => {
                "Unable to reach the school server. Check your connection.".to_string()
            }
            AuthError::Api(ApiError::Http { message, .. }) if !message.trim().is_empty() => message.clone(),
            AuthError::Api(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl From<ApiError> for AuthError {
    fn from(error: ApiError) -> Self {
        match error.status() {
            Some(401) | Some(403) => AuthError::InvalidCredentials,
            _ => AuthError::Api(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_statuses_become_invalid_credentials() {
        let rejected = ApiError::Http { status: 401, message: "Unauthorized".into() };
        assert_eq!(AuthError::from(rejected), AuthError::InvalidCredentials);

        let forbidden = ApiError::Http { status: 403, message: "Forbidden".into() };
        assert_eq!(AuthError::from(forbidden), AuthError::InvalidCredentials);
    }

    #[test]
    fn other_api_failures_are_wrapped() {
        let down = ApiError::Http { status: 503, message: "Service Unavailable".into() };
        assert_eq!(AuthError::from(down.clone()), AuthError::Api(down));

        let offline = ApiError::Network("connection refused".into());
        assert_eq!(AuthError::from(offline.clone()).to_string(), offline.to_string());
    }

    #[test]
    fn user_messages_prefer_backend_text() {
        let rejected = AuthError::Api(ApiError::Http { status: 423, message: "Fees outstanding".into() });
        assert_eq!(rejected.user_message(), "Fees outstanding");

        let blank = AuthError::Api(ApiError::Http { status: 500, message: " ".into() });
        assert_eq!(blank.user_message(), "Something went wrong. Please try again.");

        assert_eq!(
            AuthError::InvalidCredentials.user_message(),
            "Invalid admission number or password."
        );
    }
}
