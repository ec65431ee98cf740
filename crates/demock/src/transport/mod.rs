//! Reference transport adaptor.
//!
//! The engine only annotates intent on a [`Response`](crate::Response); this
//! module realizes it the way an HTTP client binding would: it waits out
//! `delay`, turns `timeout` into a network failure and maps 4xx/5xx status
//! codes to a rejected outcome. [`MockTransport`] ties a chain to a
//! [`FixtureSource`] for a complete request-to-outcome round trip.

mod outcome;
mod source;

pub use outcome::{settle, settle_or_cancel, Outcome, Rejection, Settled};
pub use source::{DirectorySource, FixtureSource};

use crate::chain::FilterChain;
use crate::error::Result;
use crate::model::{Request, Response};
use std::sync::Arc;
use tracing::debug;

/// Serves calls from fixtures through a filter chain.
#[derive(Debug, Clone)]
pub struct MockTransport<S> {
    chain: Arc<FilterChain>,
    source: S,
}

impl<S: FixtureSource> MockTransport<S> {
    pub fn new(chain: FilterChain, source: S) -> Self {
        Self {
            chain: Arc::new(chain),
            source,
        }
    }

    pub fn chain(&self) -> &FilterChain {
        &self.chain
    }

    /// Filter the request, load its fixture and filter the response.
    ///
    /// A missing fixture yields `404 Not Found` with no payload.
    pub fn respond(&self, request: Request) -> Result<(Request, Response)> {
        let request = self.chain.filter_request(request);
        let response = match self.source.load(&request.url)? {
            Some(data) => Response::ok(data),
            None => {
                debug!(url = %request.url, "No fixture found");
                Response::default().with_status(404, "Not Found")
            }
        };
        let response = self.chain.filter_response(&request, response)?;
        Ok((request, response))
    }

    /// Full call: respond, then wait and map to an outcome.
    pub async fn call(&self, request: Request) -> Result<Outcome> {
        let (request, response) = self.respond(request)?;
        debug!(
            url = %request.url,
            status = response.status_code,
            delay = ?response.delay,
            timeout = response.timeout,
            "Settling mock response"
        );
        Ok(settle(response).await)
    }
}
