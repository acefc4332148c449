use std::fmt;

use checker_core::{AnalysisKind, DestinationId};
use serde::{Deserialize, Serialize};
use url::Url;

/// How progress is obtained for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Backend streams `data:` event lines.
    #[default]
    Streaming,
    /// Backend answers once; progress is simulated locally.
    Fallback,
}

/// User-triggered analysis, as received from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    Single {
        destination: DestinationId,
        selection: String,
        page_url: String,
    },
    Batch {
        destination: DestinationId,
        page_url: String,
    },
}

impl AnalysisRequest {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisRequest::Single { .. } => AnalysisKind::Single,
            AnalysisRequest::Batch { .. } => AnalysisKind::Batch,
        }
    }

    pub fn destination(&self) -> DestinationId {
        match self {
            AnalysisRequest::Single { destination, .. }
            | AnalysisRequest::Batch { destination, .. } => *destination,
        }
    }
}

/// JSON body posted to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RequestBody {
    Moderate {
        news_text: String,
        comment_text: String,
        language: String,
    },
    DetectAll {
        url: String,
    },
}

/// Everything one in-flight exchange owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub endpoint: Url,
    pub body: RequestBody,
    pub destination: DestinationId,
    pub kind: AnalysisKind,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SessionError {
    pub kind: FailureKind,
    pub message: String,
}

impl SessionError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    MalformedBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::MalformedBody => write!(f, "malformed body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
