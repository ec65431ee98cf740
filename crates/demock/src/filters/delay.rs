//! Delay filter - ask the adaptor to wait before settling.

use crate::directive::Directive;
use crate::error::Result;
use crate::filter::{FilterContext, Flow, ResponseFilter};
use crate::model::Response;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// `$delay` argument: fixed milliseconds or a random range
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DelaySpec {
    Fixed(u64),
    Range { min: u64, max: u64 },
}

impl DelaySpec {
    /// Parse a directive argument. Fractional milliseconds are rounded.
    pub fn from_value(value: &Value) -> Option<Self> {
        if let Some(ms) = value.as_f64().filter(|ms| *ms >= 0.0 && ms.is_finite()) {
            return Some(DelaySpec::Fixed(ms.round() as u64));
        }
        serde_json::from_value(value.clone()).ok()
    }

    pub fn duration_ms(&self) -> u64 {
        match self {
            DelaySpec::Fixed(ms) => *ms,
            DelaySpec::Range { min, max } if max > min => {
                rand::thread_rng().gen_range(*min..=*max)
            }
            DelaySpec::Range { min, .. } => *min,
        }
    }
}

/// Sets `response.delay` from `$delay`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelayFilter;

impl ResponseFilter for DelayFilter {
    fn directive(&self) -> Option<Directive> {
        Some(Directive::Delay)
    }

    fn filter_response(
        &self,
        _ctx: &FilterContext<'_>,
        response: &mut Response,
        arg: &Value,
    ) -> Result<Flow> {
        match DelaySpec::from_value(arg) {
            Some(spec) => response.delay = Some(spec.duration_ms()),
            None => warn!("Ignoring malformed $delay argument: {}", arg),
        }
        Ok(Flow::Continue)
    }
}
