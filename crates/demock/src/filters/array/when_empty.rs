//! `$arrayWhenEmpty` - swap in a fallback payload when the target array is empty.

use super::target_array;
use crate::directive::Directive;
use crate::error::Result;
use crate::filter::{FilterContext, Flow, ResponseFilter};
use crate::model::Response;
use serde_json::{Map, Value};
use tracing::debug;

/// Replaces the payload with `{ $data: fallback }` when the array is empty,
/// so directives inside the fallback (e.g. `$status`) run on the next pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayWhenEmptyFilter;

impl ResponseFilter for ArrayWhenEmptyFilter {
    fn directive(&self) -> Option<Directive> {
        Some(Directive::ArrayWhenEmpty)
    }

    fn filter_response(
        &self,
        ctx: &FilterContext<'_>,
        response: &mut Response,
        arg: &Value,
    ) -> Result<Flow> {
        let is_empty = response
            .data
            .as_mut()
            .and_then(|data| target_array(ctx, data))
            .map(|items| items.is_empty())
            .unwrap_or(false);

        if is_empty {
            debug!("Target array is empty, using $arrayWhenEmpty fallback");
            let mut wrapped = Map::new();
            wrapped.insert(ctx.key(&Directive::Data), arg.clone());
            response.data = Some(Value::Object(wrapped));
        }
        Ok(Flow::Continue)
    }
}
