//! Stock filters implementing the directive vocabulary.
//!
//! # Request Filters
//!
//! - `method` - Rewrite non-GET calls to GET with the verb as a path segment
//! - `defaultDocument` - Append a default document name to directory-like URLs
//!
//! # Response Filters
//!
//! - `delay`, `status`, `timeout` - Annotate the response
//! - `switch` - Pick a payload by request parameter
//! - `arrayFilter`, `arraySort`, `arrayWhenEmpty`, `arrayItem` - Collection logic

pub mod array;
mod default_document;
mod delay;
mod method;
mod status;
mod switch;
mod timeout;

pub use array::{
    ArrayFilter, ArrayItemFilter, ArraySortFilter, ArrayWhenEmptyFilter, Comparator, ItemPick,
};
pub use default_document::DefaultDocumentFilter;
pub use delay::{DelayFilter, DelaySpec};
pub use method::{MethodFilter, METHOD_HEADER, PARAM_HEADER_PREFIX, URL_HEADER};
pub use status::{StatusFilter, StatusOverride};
pub use switch::SwitchFilter;
pub use timeout::TimeoutFilter;

use crate::filter::FilterUnit;

/// The stock response filters, in the order a configured chain registers them.
pub fn stock_response_filters() -> Vec<FilterUnit> {
    vec![
        FilterUnit::response("delay", DelayFilter),
        FilterUnit::response("status", StatusFilter),
        FilterUnit::response("timeout", TimeoutFilter),
        FilterUnit::response("switch", SwitchFilter),
        FilterUnit::response("arrayFilter", ArrayFilter),
        FilterUnit::response("arraySort", ArraySortFilter),
        FilterUnit::response("arrayWhenEmpty", ArrayWhenEmptyFilter),
        FilterUnit::response("arrayItem", ArrayItemFilter),
    ]
}

/// Append `segment` to `url`, dropping one trailing slash first.
pub(crate) fn append_segment(url: &str, segment: &str) -> String {
    format!("{}/{segment}", url.strip_suffix('/').unwrap_or(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_segment_single_slash() {
        assert_eq!(append_segment("/api/test", "x"), "/api/test/x");
        assert_eq!(append_segment("/api/test/", "x"), "/api/test/x");
        assert_eq!(append_segment("", "x"), "/x");
    }

    #[test]
    fn test_stock_order() {
        let names: Vec<_> = stock_response_filters()
            .iter()
            .map(|unit| unit.name().to_string())
            .collect();
        assert_eq!(
            names,
            [
                "delay",
                "status",
                "timeout",
                "switch",
                "arrayFilter",
                "arraySort",
                "arrayWhenEmpty",
                "arrayItem"
            ]
        );
    }
}
