/// Convenience result type used across kakijun.
pub type KakijunResult<T> = Result<T, KakijunError>;

/// Top-level error taxonomy used by engine APIs.
///
/// None of these reach the view boundary: resource errors are folded into a missing-diagram
/// outcome before anything is painted.
#[derive(thiserror::Error, Debug)]
pub enum KakijunError {
    /// Invalid user-provided configuration or request data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Diagram markup that could not be parsed into a stroke document.
    #[error("parse error: {0}")]
    Parse(String),

    /// Retrieval of diagram markup failed.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KakijunError {
    /// Build a [`KakijunError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KakijunError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`KakijunError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`KakijunError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
