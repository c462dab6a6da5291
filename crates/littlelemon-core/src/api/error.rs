use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Menu resource not found: {0}")]
    NotFound(String),

    #[error("Rate limited by menu host")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let cut: String = body.chars().take(MAX_ERROR_BODY_LENGTH).collect();
            format!("{}... (truncated, {} total bytes)", cut, body.len())
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            404 => ApiError::NotFound(truncated),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(truncated),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, "gone"),
            ApiError::NotFound(ref b) if b == "gone"
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, ""),
            ApiError::RateLimited
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, "upstream"),
            ApiError::ServerError(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, "no"),
            ApiError::InvalidResponse(ref m) if m.contains("403")
        ));
    }

    #[test]
    fn test_long_body_is_truncated() {
        let body = "x".repeat(MAX_ERROR_BODY_LENGTH + 20);
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body);
        let ApiError::ServerError(msg) = err else {
            panic!("expected server error");
        };
        assert!(msg.contains("truncated"));
        assert!(msg.len() < body.len() + 40);
    }
}
