use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Destination of notifications (one page/tab surface).
pub type DestinationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    /// One selected comment checked against its page.
    Single,
    /// Every comment of a page.
    Batch,
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisKind::Single => write!(f, "single"),
            AnalysisKind::Batch => write!(f, "batch"),
        }
    }
}

/// Progress snapshot shown while an analysis runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub percentage: u8,
    pub message: String,
    pub step: u32,
    pub total_steps: u32,
    #[serde(rename = "elapsedTime")]
    pub elapsed_seconds: u64,
}

/// Final verdict of an analysis.
///
/// On the wire this is `{ok, data?, msg?}`; the enum keeps `data` and `msg`
/// mutually exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WirePayload", into = "WirePayload")]
pub enum ResultPayload {
    Success(Value),
    Failure(String),
}

const UNKNOWN_ERROR: &str = "Unknown error";

impl ResultPayload {
    pub fn failure(msg: impl Into<String>) -> Self {
        ResultPayload::Failure(msg.into())
    }

    pub fn connection_failed(cause: impl fmt::Display) -> Self {
        ResultPayload::Failure(format!("Connection failed: {cause}"))
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ResultPayload::Success(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WirePayload {
    #[serde(default)]
    ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    msg: Option<String>,
}

impl From<WirePayload> for ResultPayload {
    fn from(wire: WirePayload) -> Self {
        if wire.ok {
            ResultPayload::Success(wire.data.unwrap_or(Value::Null))
        } else {
            ResultPayload::Failure(wire.msg.unwrap_or_else(|| UNKNOWN_ERROR.to_string()))
        }
    }
}

impl From<ResultPayload> for WirePayload {
    fn from(payload: ResultPayload) -> Self {
        match payload {
            ResultPayload::Success(data) => WirePayload {
                ok: true,
                data: Some(data),
                msg: None,
            },
            ResultPayload::Failure(msg) => WirePayload {
                ok: false,
                data: None,
                msg: Some(msg),
            },
        }
    }
}
