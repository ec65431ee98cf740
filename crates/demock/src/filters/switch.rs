//! Switch filter - pick a payload by the value of a request parameter.
//!
//! ```json
//! {
//!   "$switch": "username",
//!   "$case": { "joe": { "name": "Joe" } },
//!   "$default": { "name": "Unknown" }
//! }
//! ```
//!
//! The chosen payload is wrapped in `$data`, so the chain re-runs on it and
//! any directives it carries take effect. With no matching case and no
//! `$default` the payload is left as is.

use crate::directive::{scalar_key, Directive};
use crate::error::Result;
use crate::filter::{FilterContext, Flow, ResponseFilter};
use crate::model::Response;
use serde_json::{Map, Value};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct SwitchFilter;

impl SwitchFilter {
    fn choose(ctx: &FilterContext<'_>, data: &Value, param: &str) -> Option<Value> {
        let matched = ctx
            .request
            .param(param)
            .and_then(scalar_key)
            .and_then(|key| {
                ctx.sibling(data, &Directive::Case)?
                    .as_object()?
                    .get(&key)
                    .cloned()
            });
        if matched.is_some() {
            return matched;
        }
        ctx.sibling(data, &Directive::Default).cloned()
    }
}

impl ResponseFilter for SwitchFilter {
    fn directive(&self) -> Option<Directive> {
        Some(Directive::Switch)
    }

    fn filter_response(
        &self,
        ctx: &FilterContext<'_>,
        response: &mut Response,
        arg: &Value,
    ) -> Result<Flow> {
        let Some(param) = arg.as_str() else {
            warn!("Ignoring $switch with non-string parameter name: {}", arg);
            return Ok(Flow::Continue);
        };
        let Some(data) = response.data.as_ref() else {
            return Ok(Flow::Continue);
        };

        match Self::choose(ctx, data, param) {
            Some(chosen) => {
                let mut wrapped = Map::new();
                wrapped.insert(ctx.key(&Directive::Data), chosen);
                response.data = Some(Value::Object(wrapped));
            }
            None => debug!(param, "No $case matched and no $default, leaving payload"),
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Request;
    use serde_json::json;

    fn apply(request: &Request, data: Value) -> Value {
        let ctx = FilterContext::new(request, "$");
        let mut response = Response::ok(data.clone());
        let arg = data["$switch"].clone();
        SwitchFilter
            .filter_response(&ctx, &mut response, &arg)
            .unwrap();
        response.data.unwrap()
    }

    fn fixture() -> Value {
        json!({
            "$switch": "username",
            "$case": { "joe": { "name": "Joe" }, "7": { "name": "Seven" } },
            "$default": { "name": "Unknown" }
        })
    }

    #[test]
    fn test_matching_case_wrapped_in_data() {
        let request = Request::new("GET", "/").with_param("username", "joe");
        assert_eq!(
            apply(&request, fixture()),
            json!({ "$data": { "name": "Joe" } })
        );
    }

    #[test]
    fn test_integral_float_param_matches_string_key() {
        let request = Request::new("GET", "/").with_param("username", 7.0);
        assert_eq!(
            apply(&request, fixture()),
            json!({ "$data": { "name": "Seven" } })
        );
    }

    #[test]
    fn test_numeric_param_matches_string_key() {
        let request = Request::new("GET", "/").with_param("username", 7);
        assert_eq!(
            apply(&request, fixture()),
            json!({ "$data": { "name": "Seven" } })
        );
    }

    #[test]
    fn test_default_when_no_case_matches() {
        let request = Request::new("GET", "/").with_param("username", "jane");
        assert_eq!(
            apply(&request, fixture()),
            json!({ "$data": { "name": "Unknown" } })
        );

        let request = Request::new("GET", "/");
        assert_eq!(
            apply(&request, fixture()),
            json!({ "$data": { "name": "Unknown" } })
        );
    }

    #[test]
    fn test_no_match_no_default_leaves_data() {
        let mut data = fixture();
        data.as_object_mut().unwrap().remove("$default");
        let request = Request::new("GET", "/").with_param("username", "jane");
        assert_eq!(apply(&request, data.clone()), data);
    }

    #[test]
    fn test_falsy_default_still_used() {
        let data = json!({ "$switch": "q", "$case": {}, "$default": null });
        let request = Request::new("GET", "/");
        assert_eq!(apply(&request, data), json!({ "$data": null }));
    }
}
