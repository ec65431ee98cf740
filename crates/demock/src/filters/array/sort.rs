//! `$arraySort` - order the target array by request parameters.
//!
//! Reads `sortKey` (the element property) and `sortDir` (`ASC`, anything
//! else sorts descending) from the request.

use super::target_array;
use crate::directive::{scalar_key, Directive};
use crate::error::Result;
use crate::filter::{FilterContext, Flow, ResponseFilter};
use crate::model::Response;
use serde_json::Value;
use std::cmp::Ordering;

/// Request parameter naming the property to sort by
pub const SORT_KEY_PARAM: &str = "sortKey";
/// Request parameter holding the direction
pub const SORT_DIR_PARAM: &str = "sortDir";

/// Case-insensitive ordering with a case-sensitive tiebreak, so `apple`
/// sorts before `Banana` and `a` before `A` deterministically.
pub fn locale_compare(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| right.cmp(left))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ArraySortFilter;

impl ResponseFilter for ArraySortFilter {
    fn directive(&self) -> Option<Directive> {
        Some(Directive::ArraySort)
    }

    fn filter_response(
        &self,
        ctx: &FilterContext<'_>,
        response: &mut Response,
        _arg: &Value,
    ) -> Result<Flow> {
        let Some(key) = ctx.request.param(SORT_KEY_PARAM).and_then(scalar_key) else {
            return Ok(Flow::Continue);
        };
        let ascending = ctx.request.param(SORT_DIR_PARAM).and_then(Value::as_str) == Some("ASC");

        let Some(items) = response.data.as_mut().and_then(|data| target_array(ctx, data)) else {
            return Ok(Flow::Continue);
        };

        let sort_value = |item: &Value| item.get(&key).and_then(scalar_key).unwrap_or_default();
        items.sort_by(|a, b| {
            let ordering = locale_compare(&sort_value(a), &sort_value(b));
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
        Ok(Flow::Continue)
    }
}
