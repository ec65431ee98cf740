//! The filter chain engine.
//!
//! A chain holds an ordered list of [`FilterUnit`]s. Registration order is the
//! only ordering: it decides which hook sees a mutation first and whose
//! [`Flow::Halt`] takes effect, identically on every pass.
//!
//! # Fixed-point response filtering
//!
//! 1. If `response.data` is absent (or `null`), stop.
//! 2. Run each response hook in order. Keyed hooks fire only when the payload
//!    owns their exact directive key; unkeyed hooks always fire. A hook
//!    returning `Halt` ends the pass.
//! 3. If the payload owns `<prefix>data`, replace the payload with its value
//!    and go back to 1.
//! 4. Otherwise the response is stable.
//!
//! The number of passes is bounded so a fixture that keeps wrapping `$data`
//! fails with [`DemockError::PassLimitExceeded`] instead of looping forever.

use crate::config::DemockConfig;
use crate::directive::{Directive, DEFAULT_PREFIX};
use crate::error::{DemockError, Result};
use crate::filter::{FilterContext, FilterUnit, Flow, RequestFilter, ResponseFilter};
use crate::filters;
use crate::model::{Request, Response};
use serde_json::Value;
use tracing::{debug, trace};

/// Default bound on fixed-point passes per response
pub const DEFAULT_MAX_PASSES: usize = 32;

/// An ordered, immutable-after-setup set of request and response filters.
#[derive(Debug, Clone)]
pub struct FilterChain {
    prefix: String,
    max_passes: usize,
    units: Vec<FilterUnit>,
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl FilterChain {
    /// Create an empty chain matching directives under `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            max_passes: DEFAULT_MAX_PASSES,
            units: Vec::new(),
        }
    }

    /// Build a chain with the stock filters registered in their pinned order.
    pub fn from_config(config: &DemockConfig) -> Result<Self> {
        config.validate()?;
        let mut chain = Self::new(config.filter_prefix.clone()).with_max_passes(config.max_passes);

        if config.method_rewrite {
            chain.register_filter(FilterUnit::request("method", filters::MethodFilter))?;
        }
        if let Some(document) = &config.default_document {
            chain.register_filter(FilterUnit::request(
                "defaultDocument",
                filters::DefaultDocumentFilter::new(document.clone()),
            ))?;
        }
        for unit in filters::stock_response_filters() {
            chain.register_filter(unit)?;
        }

        debug!(
            prefix = %chain.prefix,
            filters = chain.units.len(),
            "Built filter chain from config"
        );
        Ok(chain)
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    pub fn units(&self) -> &[FilterUnit] {
        &self.units
    }

    /// Append a unit. Units offering neither hook are rejected.
    pub fn register_filter(&mut self, unit: FilterUnit) -> Result<&mut Self> {
        if unit.is_empty() {
            return Err(DemockError::EmptyFilterUnit(unit.name().to_string()));
        }
        trace!(name = unit.name(), position = self.units.len(), "Registering filter");
        self.units.push(unit);
        Ok(self)
    }

    pub fn register_request_filter<F: RequestFilter + 'static>(
        &mut self,
        name: &str,
        filter: F,
    ) -> Result<&mut Self> {
        self.register_filter(FilterUnit::request(name, filter))
    }

    pub fn register_response_filter<F: ResponseFilter + 'static>(
        &mut self,
        name: &str,
        filter: F,
    ) -> Result<&mut Self> {
        self.register_filter(FilterUnit::response(name, filter))
    }

    /// Run every request hook in registration order until one halts.
    pub fn filter_request(&self, mut request: Request) -> Request {
        for unit in &self.units {
            let Some(hook) = unit.request_hook() else {
                continue;
            };
            if hook.filter_request(&mut request) == Flow::Halt {
                debug!(filter = unit.name(), "Request filter halted the chain");
                break;
            }
        }
        request
    }

    /// Run response hooks to a fixed point. See the module docs.
    pub fn filter_response(&self, request: &Request, mut response: Response) -> Result<Response> {
        let ctx = FilterContext::new(request, &self.prefix);
        let data_key = Directive::Data.key(&self.prefix);
        let mut passes = 0;

        while response.live_data().is_some() {
            if passes == self.max_passes {
                return Err(DemockError::PassLimitExceeded {
                    limit: self.max_passes,
                });
            }
            passes += 1;
            trace!(pass = passes, url = %request.url, "Filtering response");

            self.run_pass(&ctx, &mut response)?;

            let next = response
                .data
                .as_mut()
                .and_then(Value::as_object_mut)
                .and_then(|data| data.remove(&data_key));
            match next {
                Some(next) => response.data = Some(next),
                None => break,
            }
        }

        debug!(passes, status = response.status_code, "Response filtering complete");
        Ok(response)
    }

    fn run_pass(&self, ctx: &FilterContext<'_>, response: &mut Response) -> Result<()> {
        for unit in &self.units {
            let Some(hook) = unit.response_hook() else {
                continue;
            };

            // Looked up against the live payload: an earlier hook may have replaced it.
            let arg = match hook.directive() {
                Some(directive) => {
                    let found = response
                        .live_data()
                        .and_then(|data| ctx.sibling(data, &directive))
                        .cloned();
                    match found {
                        Some(arg) => arg,
                        None => continue,
                    }
                }
                None => Value::Null,
            };

            trace!(filter = unit.name(), "Applying response filter");
            if hook.filter_response(ctx, response, &arg)? == Flow::Halt {
                debug!(filter = unit.name(), "Response filter halted the pass");
                break;
            }
        }
        Ok(())
    }
}
