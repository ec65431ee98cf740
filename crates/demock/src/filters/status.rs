//! Status filter - override the status code and text.

use crate::directive::Directive;
use crate::error::Result;
use crate::filter::{FilterContext, Flow, ResponseFilter};
use crate::model::Response;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// `$status` argument; absent fields keep the prior value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StatusOverride {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub text: Option<String>,
}

impl StatusOverride {
    pub fn apply(&self, response: &mut Response) {
        if let Some(code) = self.code {
            response.status_code = code;
        }
        if let Some(text) = &self.text {
            response.status_text = Some(text.clone());
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StatusFilter;

impl ResponseFilter for StatusFilter {
    fn directive(&self) -> Option<Directive> {
        Some(Directive::Status)
    }

    fn filter_response(
        &self,
        _ctx: &FilterContext<'_>,
        response: &mut Response,
        arg: &Value,
    ) -> Result<Flow> {
        match serde_json::from_value::<StatusOverride>(arg.clone()) {
            Ok(status) if arg.is_object() => status.apply(response),
            _ => warn!("Ignoring malformed $status argument: {}", arg),
        }
        Ok(Flow::Continue)
    }
}
