//! Demock: simulate HTTP APIs from static JSON fixtures.
//!
//! Fixtures are plain JSON documents annotated with reserved directive keys
//! (`$delay`, `$status`, `$switch`, `$arrayFilter`, ...). A [`FilterChain`]
//! rewrites outgoing requests so a static file server can serve them, and
//! interprets the directives in the returned fixture to synthesize the final
//! response.
//!
//! # Example
//!
//! ```
//! use demock::{DemockConfig, FilterChain, Request, Response};
//! use serde_json::json;
//!
//! let chain = FilterChain::from_config(&DemockConfig::default()).unwrap();
//! let request = chain.filter_request(Request::new("GET", "/api/users").with_param("username", "joe"));
//!
//! let fixture = json!({
//!     "$switch": "username",
//!     "$case": { "joe": { "$delay": 100, "$data": { "name": "Joe" } } },
//!     "$default": { "$status": { "code": 404 } }
//! });
//! let response = chain.filter_response(&request, Response::ok(fixture)).unwrap();
//!
//! assert_eq!(response.data, Some(json!({ "name": "Joe" })));
//! assert_eq!(response.delay, Some(100));
//! ```

pub mod chain;
pub mod config;
pub mod directive;
pub mod error;
pub mod filter;
pub mod filters;
pub mod model;
pub mod transport;

pub use chain::FilterChain;
pub use config::DemockConfig;
pub use directive::Directive;
pub use error::{DemockError, Result};
pub use filter::{FilterContext, FilterUnit, Flow, RequestFilter, ResponseFilter};
pub use model::{Request, Response};
pub use transport::{MockTransport, Outcome};
