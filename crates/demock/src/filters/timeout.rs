//! Timeout filter - simulate a connection that never answers.

use crate::directive::{is_truthy, Directive};
use crate::error::Result;
use crate::filter::{FilterContext, Flow, ResponseFilter};
use crate::model::Response;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutFilter;

impl ResponseFilter for TimeoutFilter {
    fn directive(&self) -> Option<Directive> {
        Some(Directive::Timeout)
    }

    fn filter_response(
        &self,
        _ctx: &FilterContext<'_>,
        response: &mut Response,
        arg: &Value,
    ) -> Result<Flow> {
        if is_truthy(arg) {
            response.timeout = true;
        }
        Ok(Flow::Continue)
    }
}
