use hostex_protocol::BackendErrorInfo;

pub type HostexResult<T> = Result<T, HostexError>;

#[derive(Debug, thiserror::Error)]
pub enum HostexError {
    /// The API answered with a non-2xx status or a non-200 `error_code`.
    #[error(
        "Hostex API error (HTTP {status}{}): {message}",
        .code.map(|c| format!(", code {c}")).unwrap_or_default()
    )]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
        request_id: Option<String>,
    },

    #[error("request to Hostex failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected Hostex response: {0}")]
    Decode(String),

    /// Refused by the client before anything was sent (business rule).
    #[error("{0}")]
    Rejected(String),
}

impl HostexError {
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::Decode(_) | Self::Rejected(_) => false,
        }
    }

    pub fn info(&self) -> BackendErrorInfo {
        let transient = self.is_transient();
        match self {
            Self::Api {
                status,
                code,
                message,
                request_id,
            } => BackendErrorInfo {
                status: Some(*status),
                code: *code,
                message: message.clone(),
                request_id: request_id.clone(),
                transient,
            },
            Self::Transport(err) => BackendErrorInfo {
                status: err.status().map(|s| s.as_u16()),
                code: None,
                message: err.to_string(),
                request_id: None,
                transient,
            },
            Self::Decode(message) | Self::Rejected(message) => BackendErrorInfo {
                status: None,
                code: None,
                message: message.clone(),
                request_id: None,
                transient,
            },
        }
    }
}
