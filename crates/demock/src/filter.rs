//! Filter capabilities and the units a chain is built from.

use crate::directive::Directive;
use crate::error::Result;
use crate::model::{Request, Response};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// What the chain should do after a hook returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Run the remaining hooks
    #[default]
    Continue,
    /// Skip the remaining hooks for this call (request) or pass (response)
    Halt,
}

/// A hook that rewrites outgoing requests.
pub trait RequestFilter: Send + Sync {
    fn filter_request(&self, request: &mut Request) -> Flow;
}

/// A hook that transforms responses built from fixtures.
pub trait ResponseFilter: Send + Sync {
    /// The directive that triggers this filter.
    ///
    /// `None` makes the filter unkeyed: it runs on every pass with a `null`
    /// argument.
    fn directive(&self) -> Option<Directive>;

    fn filter_response(
        &self,
        ctx: &FilterContext<'_>,
        response: &mut Response,
        arg: &Value,
    ) -> Result<Flow>;
}

/// Per-call state handed to response filters.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub request: &'a Request,
    pub prefix: &'a str,
}

impl<'a> FilterContext<'a> {
    pub fn new(request: &'a Request, prefix: &'a str) -> Self {
        Self { request, prefix }
    }

    pub fn key(&self, directive: &Directive) -> String {
        directive.key(self.prefix)
    }

    /// Read a sibling directive (e.g. `$case`) off the current payload.
    pub fn sibling<'d>(&self, data: &'d Value, directive: &Directive) -> Option<&'d Value> {
        directive.lookup(self.prefix, data)
    }
}

/// A named registration: a request hook, a response hook, or both.
#[derive(Clone)]
pub struct FilterUnit {
    name: String,
    request: Option<Arc<dyn RequestFilter>>,
    response: Option<Arc<dyn ResponseFilter>>,
}

impl FilterUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            request: None,
            response: None,
        }
    }

    /// A unit with only a request hook.
    pub fn request<F: RequestFilter + 'static>(name: impl Into<String>, filter: F) -> Self {
        Self::new(name).with_request(filter)
    }

    /// A unit with only a response hook.
    pub fn response<F: ResponseFilter + 'static>(name: impl Into<String>, filter: F) -> Self {
        Self::new(name).with_response(filter)
    }

    /// A unit whose single filter value provides both hooks.
    pub fn both<F>(name: impl Into<String>, filter: F) -> Self
    where
        F: RequestFilter + ResponseFilter + 'static,
    {
        let filter = Arc::new(filter);
        Self {
            name: name.into(),
            request: Some(filter.clone()),
            response: Some(filter),
        }
    }

    pub fn with_request<F: RequestFilter + 'static>(mut self, filter: F) -> Self {
        self.request = Some(Arc::new(filter));
        self
    }

    pub fn with_response<F: ResponseFilter + 'static>(mut self, filter: F) -> Self {
        self.response = Some(Arc::new(filter));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn request_hook(&self) -> Option<&dyn RequestFilter> {
        self.request.as_deref()
    }

    pub fn response_hook(&self) -> Option<&dyn ResponseFilter> {
        self.response.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.request.is_none() && self.response.is_none()
    }
}

impl fmt::Debug for FilterUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterUnit")
            .field("name", &self.name)
            .field("request", &self.request.is_some())
            .field(
                "response",
                &self.response.as_ref().map(|r| r.directive()),
            )
            .finish()
    }
}

/// Adapter turning a closure into a request filter.
pub struct RequestFn<F>(pub F);

impl<F> RequestFilter for RequestFn<F>
where
    F: Fn(&mut Request) -> Flow + Send + Sync,
{
    fn filter_request(&self, request: &mut Request) -> Flow {
        (self.0)(request)
    }
}

/// Adapter turning a closure into a response filter keyed by `directive`.
pub struct ResponseFn<F> {
    directive: Option<Directive>,
    hook: F,
}

impl<F> ResponseFn<F>
where
    F: Fn(&FilterContext<'_>, &mut Response, &Value) -> Result<Flow> + Send + Sync,
{
    /// Key the hook by a directive; names outside the stock set become `Custom`.
    pub fn keyed(directive: impl Into<Directive>, hook: F) -> Self {
        Self {
            directive: Some(directive.into()),
            hook,
        }
    }

    pub fn unkeyed(hook: F) -> Self {
        Self {
            directive: None,
            hook,
        }
    }
}

impl<F> ResponseFilter for ResponseFn<F>
where
    F: Fn(&FilterContext<'_>, &mut Response, &Value) -> Result<Flow> + Send + Sync,
{
    fn directive(&self) -> Option<Directive> {
        self.directive.clone()
    }

    fn filter_response(
        &self,
        ctx: &FilterContext<'_>,
        response: &mut Response,
        arg: &Value,
    ) -> Result<Flow> {
        (self.hook)(ctx, response, arg)
    }
}
