//! Method filter - serve every verb from a GET-only static file server.

use super::append_segment;
use crate::filter::{Flow, RequestFilter};
use crate::model::Request;
use tracing::debug;

/// Header recording the original verb
pub const METHOD_HEADER: &str = "X-Request-Method";
/// Header recording the original URL
pub const URL_HEADER: &str = "X-Request-Url";
/// Prefix of the headers recording each parameter, JSON-encoded
pub const PARAM_HEADER_PREFIX: &str = "X-Request-Param-";

/// Rewrites `POST /api/users` to `GET /api/users/POST`.
///
/// The original method, URL and parameters are kept in request headers so a
/// recording server can still trace them.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodFilter;

impl RequestFilter for MethodFilter {
    fn filter_request(&self, request: &mut Request) -> Flow {
        if request.method == "GET" {
            return Flow::Continue;
        }

        let original_url = std::mem::take(&mut request.url);
        request.url = append_segment(&original_url, &request.method);

        request
            .headers
            .insert(METHOD_HEADER.to_string(), request.method.clone());
        request
            .headers
            .insert(URL_HEADER.to_string(), original_url);
        for (name, value) in &request.params {
            request
                .headers
                .insert(format!("{PARAM_HEADER_PREFIX}{name}"), value.to_string());
        }

        debug!(method = %request.method, url = %request.url, "Rewrote request method to GET");
        request.method = "GET".to_string();
        Flow::Continue
    }
}
