//! Mapping a filtered response to the success/failure an HTTP client sees.

use crate::model::Response;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// The parts of a response a client observes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settled {
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    pub data: Option<Value>,
}

impl From<Response> for Settled {
    fn from(response: Response) -> Self {
        Self {
            status_code: response.status_code,
            status_text: response.status_text,
            data: response.data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Rejection {
    /// Simulated connection failure; no HTTP response at all
    Timeout,
    /// 4xx/5xx response
    Status(Settled),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Resolved(Settled),
    Rejected(Rejection),
}

impl Outcome {
    /// Timeout wins over status; 4xx/5xx reject; everything else resolves.
    pub fn from_response(response: Response) -> Self {
        if response.timeout {
            Outcome::Rejected(Rejection::Timeout)
        } else if response.is_error_status() {
            Outcome::Rejected(Rejection::Status(response.into()))
        } else {
            Outcome::Resolved(response.into())
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Outcome::Resolved(_))
    }
}

/// Wait out the response's advisory delay, then map it.
pub async fn settle(response: Response) -> Outcome {
    if let Some(ms) = response.delay.filter(|ms| *ms > 0) {
        debug!(delay_ms = ms, "Delaying mock response");
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
    Outcome::from_response(response)
}

/// Like [`settle`], but gives up as soon as `cancel` completes.
///
/// The pending timer is dropped with the losing branch, so a cancelled call
/// never resolves late.
pub async fn settle_or_cancel<C>(response: Response, cancel: C) -> Option<Outcome>
where
    C: Future<Output = ()>,
{
    tokio::select! {
        biased;
        _ = cancel => {
            debug!("Mock call cancelled before settling");
            None
        }
        outcome = settle(response) => Some(outcome),
    }
}
