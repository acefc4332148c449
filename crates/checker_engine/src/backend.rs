use std::time::Duration;

use checker_core::{AnalysisKind, Profiles};
use url::Url;

use crate::{AnalysisRequest, FailureKind, Mode, RequestBody, SessionContext, SessionError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_LANGUAGE: &str = "zh";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ModerateStream,
    DetectAllStream,
    Moderate,
    DetectAll,
}

impl Endpoint {
    pub fn for_kind(kind: AnalysisKind, mode: Mode) -> Self {
        match (kind, mode) {
            (AnalysisKind::Single, Mode::Streaming) => Endpoint::ModerateStream,
            (AnalysisKind::Batch, Mode::Streaming) => Endpoint::DetectAllStream,
            (AnalysisKind::Single, Mode::Fallback) => Endpoint::Moderate,
            (AnalysisKind::Batch, Mode::Fallback) => Endpoint::DetectAll,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::ModerateStream => "/moderate_stream",
            Endpoint::DetectAllStream => "/detect_all_stream",
            Endpoint::Moderate => "/moderate",
            Endpoint::DetectAll => "/detect_all",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub language: String,
    pub mode: Mode,
    pub connect_timeout: Duration,
    /// Longest silence tolerated between two chunks of a stream.
    pub read_timeout: Duration,
    /// Whole-exchange limit for the single-response endpoints.
    pub request_timeout: Duration,
    pub profiles: Profiles,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            mode: Mode::Streaming,
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(60),
            request_timeout: Duration::from_secs(120),
            profiles: Profiles::default(),
        }
    }
}

impl BackendSettings {
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, SessionError> {
        let raw = format!("{}{}", self.base_url.trim_end_matches('/'), endpoint.path());
        Url::parse(&raw).map_err(|err| SessionError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    /// Builds the exchange for `request` in the configured mode.
    pub fn session_context(&self, request: &AnalysisRequest) -> Result<SessionContext, SessionError> {
        let kind = request.kind();
        let endpoint = self.endpoint_url(Endpoint::for_kind(kind, self.mode))?;
        let body = match request {
            AnalysisRequest::Single {
                selection, page_url, ..
            } => RequestBody::Moderate {
                news_text: page_url.clone(),
                comment_text: selection.clone(),
                language: self.language.clone(),
            },
            AnalysisRequest::Batch { page_url, .. } => RequestBody::DetectAll {
                url: page_url.clone(),
            },
        };

        Ok(SessionContext {
            endpoint,
            body,
            destination: request.destination(),
            kind,
        })
    }

    pub(crate) fn streaming_client(&self) -> Result<reqwest::Client, SessionError> {
        reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .read_timeout(self.read_timeout)
            .build()
            .map_err(|err| SessionError::new(FailureKind::Network, err.to_string()))
    }

    pub(crate) fn one_shot_client(&self) -> Result<reqwest::Client, SessionError> {
        reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .build()
            .map_err(|err| SessionError::new(FailureKind::Network, err.to_string()))
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> SessionError {
    if err.is_timeout() {
        return SessionError::new(FailureKind::Timeout, err.to_string());
    }
    SessionError::new(FailureKind::Network, err.to_string())
}

pub(crate) fn encode_body(body: &RequestBody) -> Result<Vec<u8>, SessionError> {
    serde_json::to_vec(body).map_err(|err| SessionError::new(FailureKind::MalformedBody, err.to_string()))
}
