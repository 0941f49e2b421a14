use reqwest::StatusCode;
use thiserror::Error;

/// Failure of an outbound lookup. Every variant is shown to the user as the
/// same short "network error" status; the detail only goes to the log.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse {service} JSON: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl LookupError {
    pub fn service(&self) -> &'static str {
        match self {
            LookupError::Transport { service, .. }
            | LookupError::Status { service, .. }
            | LookupError::Decode { service, .. } => service,
        }
    }
}

pub type LookupResult<T> = std::result::Result<T, LookupError>;

/// Failure to build or fill an HTML template.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template compilation failed: {0}")]
    Compile(String),

    #[error("Template rendering failed: {0}")]
    Render(String),
}

impl From<tera::Error> for RenderError {
    fn from(e: tera::Error) -> Self {
        Self::Render(e.to_string())
    }
}
