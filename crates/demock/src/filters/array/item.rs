//! `$arrayItem` - replace the target array with one of its elements.

use super::array_target;
use crate::directive::Directive;
use crate::error::Result;
use crate::filter::{FilterContext, Flow, ResponseFilter};
use crate::model::Response;
use rand::Rng;
use serde_json::Value;
use tracing::{debug, warn};

/// Which element `$arrayItem` picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPick {
    Random,
    /// Negative indexes count from the end
    Index(i64),
}

impl ItemPick {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if s == "random" => Some(ItemPick::Random),
            Value::Number(n) => n.as_i64().map(ItemPick::Index),
            _ => None,
        }
    }

    /// Resolve to a position in an array of `len` elements.
    pub fn position(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        match *self {
            ItemPick::Random => Some(rand::thread_rng().gen_range(0..len)),
            ItemPick::Index(index) if index >= 0 => {
                usize::try_from(index).ok().filter(|i| *i < len)
            }
            ItemPick::Index(index) => len.checked_sub(usize::try_from(index.unsigned_abs()).ok()?),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayItemFilter;

impl ResponseFilter for ArrayItemFilter {
    fn directive(&self) -> Option<Directive> {
        Some(Directive::ArrayItem)
    }

    fn filter_response(
        &self,
        ctx: &FilterContext<'_>,
        response: &mut Response,
        arg: &Value,
    ) -> Result<Flow> {
        let Some(pick) = ItemPick::from_value(arg) else {
            warn!("Ignoring malformed $arrayItem argument: {}", arg);
            return Ok(Flow::Continue);
        };

        let Some(target) = response
            .data
            .as_mut()
            .and_then(|data| array_target(ctx, data))
        else {
            return Ok(Flow::Continue);
        };

        let len = target.as_array().map_or(0, Vec::len);
        match pick.position(len) {
            Some(position) => *target = target[position].take(),
            None => debug!(?pick, len, "No element to pick"),
        }
        Ok(Flow::Continue)
    }
}
