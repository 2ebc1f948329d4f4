use thiserror::Error;

/// Message used when the API reports a failure without saying why.
pub const DEFAULT_FAILURE_MESSAGE: &str = "API 回傳失敗";

/// Everything that can go wrong between asking for a city's forecast and
/// having a series ready to render.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connection, TLS, body read).
    #[error("network error: {0}")]
    Transport(String),

    /// Non-success HTTP status with a body that is not a usable envelope.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body is not the JSON envelope the API promises.
    #[error("invalid response: {0}")]
    Decode(String),

    /// Well-formed envelope with `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// Well-formed envelope with `success: true` but no `data`.
    #[error("response contained no forecast data")]
    MissingData,
}

impl FetchError {
    pub fn rejected(message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
        Self::Rejected(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_uses_api_message() {
        let err = FetchError::rejected(Some("找不到城市".into()));
        assert_eq!(err.to_string(), "找不到城市");
    }

    #[test]
    fn rejected_falls_back_to_generic_message() {
        assert_eq!(FetchError::rejected(None).to_string(), DEFAULT_FAILURE_MESSAGE);
        assert_eq!(FetchError::rejected(Some("  ".into())).to_string(), DEFAULT_FAILURE_MESSAGE);
    }
}
