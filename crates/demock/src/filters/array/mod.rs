//! Collection directives working on the array found at `$arrayPath`.
//!
//! ```json
//! {
//!   "$arrayPath": "result.items",
//!   "$arrayFilter": { "category": "=", "maxPrice": "<= price" },
//!   "$arraySort": true,
//!   "$arrayWhenEmpty": { "$status": { "code": 404 } },
//!   "result": { "items": [] }
//! }
//! ```
//!
//! A missing `$arrayPath`, or a path that does not lead to an array, makes
//! every filter here a no-op.

mod filter;
mod item;
mod sort;
mod when_empty;

pub use filter::{ArrayFilter, Comparator};
pub use item::{ArrayItemFilter, ItemPick};
pub use sort::{locale_compare, ArraySortFilter};
pub use when_empty::ArrayWhenEmptyFilter;

use crate::directive::Directive;
use crate::filter::FilterContext;
use serde_json::Value;

/// Walk a dot-separated path; numeric segments index into arrays.
pub(crate) fn resolve_path_mut<'a>(data: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(data, |current, segment| match current {
            Value::Object(map) => map.get_mut(segment),
            Value::Array(items) => items.get_mut(segment.parse::<usize>().ok()?),
            _ => None,
        })
}

/// The `$arrayPath` of the current payload, if any.
pub(crate) fn array_path(ctx: &FilterContext<'_>, data: &Value) -> Option<String> {
    ctx.sibling(data, &Directive::ArrayPath)?
        .as_str()
        .map(str::to_string)
}

/// The array-valued node `$arrayPath` points at in the current payload.
pub(crate) fn array_target<'a>(
    ctx: &FilterContext<'_>,
    data: &'a mut Value,
) -> Option<&'a mut Value> {
    let path = array_path(ctx, data)?;
    resolve_path_mut(data, &path).filter(|target| target.is_array())
}

/// The elements of the array targeted by `$arrayPath`.
pub(crate) fn target_array<'a>(
    ctx: &FilterContext<'_>,
    data: &'a mut Value,
) -> Option<&'a mut Vec<Value>> {
    array_target(ctx, data)?.as_array_mut()
}
