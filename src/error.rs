use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Prefix shown in front of every failed generation.
pub const FAILURE_PREFIX: &str = "Error: Could not generate idea. ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailureKind {
    /// The backend refused or never accepted the connection.
    Connect,
    Timeout,
    /// The connection was established but broke while exchanging data.
    Network,
    Other,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    HttpClientError(String),

    #[error("{0}")]
    HttpServerError(String),

    #[error("Server returned {status}: {status_text}")]
    HttpOtherStatus { status: u16, status_text: String },

    #[error("Invalid response from server")]
    InvalidResponse,

    #[error("{message}")]
    Transport {
        kind: TransportFailureKind,
        message: String,
        /// Port of the endpoint the request was aimed at, when known.
        port: Option<u16>,
    },

    #[error("Invalid state transition: {current} -> {requested}")]
    InvalidTransition { current: String, requested: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Clone for Error {
    fn clone(&self) -> Self {
        match self {
            Self::Config(s) => Self::Config(s.clone()),
            Self::HttpClientError(s) => Self::HttpClientError(s.clone()),
            Self::HttpServerError(s) => Self::HttpServerError(s.clone()),
            Self::HttpOtherStatus {
                status,
                status_text,
            } => Self::HttpOtherStatus {
                status: *status,
                status_text: status_text.clone(),
            },
            Self::InvalidResponse => Self::InvalidResponse,
            Self::Transport {
                kind,
                message,
                port,
            } => Self::Transport {
                kind: *kind,
                message: message.clone(),
                port: *port,
            },
            Self::InvalidTransition { current, requested } => Self::InvalidTransition {
                current: current.clone(),
                requested: requested.clone(),
            },
            Self::Internal(s) => Self::Internal(s.clone()),
            // Foreign errors are not Clone, keep their text
            Self::Serialization(e) => Self::Internal(format!("Serialization error: {}", e)),
            Self::Yaml(e) => Self::Internal(format!("YAML error: {}", e)),
            Self::Io(e) => Self::Internal(format!("IO error: {}", e)),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_connect() {
            TransportFailureKind::Connect
        } else if err.is_timeout() {
            TransportFailureKind::Timeout
        } else if err.is_request() || err.is_body() {
            TransportFailureKind::Network
        } else {
            TransportFailureKind::Other
        };
        let port = err.url().and_then(|url| url.port_or_known_default());

        Self::Transport {
            kind,
            message: err.to_string(),
            port,
        }
    }
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn transport(kind: TransportFailureKind, msg: impl Into<String>) -> Self {
        Self::Transport {
            kind,
            message: msg.into(),
            port: None,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Attaches the endpoint port to a transport failure that lacks one.
    pub fn with_port(self, endpoint_port: Option<u16>) -> Self {
        match self {
            Self::Transport {
                kind,
                message,
                port: None,
            } => Self::Transport {
                kind,
                message,
                port: endpoint_port,
            },
            other => other,
        }
    }

    /// The text shown to the user when a generation attempt fails.
    pub fn user_message(&self) -> String {
        let suffix = match self {
            Self::Transport {
                kind: TransportFailureKind::Connect,
                port,
                ..
            } => match port {
                Some(port) => format!(
                    "Please make sure the backend server is running on port {}.",
                    port
                ),
                None => "Please make sure the backend server is running.".to_string(),
            },
            Self::Transport {
                kind: TransportFailureKind::Timeout | TransportFailureKind::Network,
                ..
            } => "Network error. Check your connection.".to_string(),
            other => other.to_string(),
        };

        format!("{}{}", FAILURE_PREFIX, suffix)
    }
}
