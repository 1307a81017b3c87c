use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("render backend failure: {0}")]
    Backend(String),
}

/// Normalized failure of one backend request.
///
/// `Display` yields the diagnostic text shown to the user.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received. Displays the transport message verbatim.
    #[error("{message}")]
    Transport { message: String },

    /// Non-2xx response, e.g. `500 Internal Server Error: server error`.
    #[error("{status_line}: {body}")]
    HttpStatus {
        status: u16,
        status_line: String,
        body: String,
    },

    #[error("invalid JSON response: {message}")]
    Decode { message: String },

    #[error("response does not match `{expected}`: {message}")]
    Schema {
        expected: &'static str,
        message: String,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status code, present only for status failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Diagnostic string for the UI.
    #[must_use]
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("`{field}` is required")]
    Missing { field: &'static str },

    #[error("`{field}` is not a number: {value:?}")]
    NotNumeric { field: &'static str, value: String },

    #[error("`{field}` must be finite")]
    NotFinite { field: &'static str },

    #[error("`{field}` is not a valid timestamp: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },
}
