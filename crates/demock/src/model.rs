//! Canonical request and response records exchanged with transport adaptors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// An outgoing call, as seen by the filter chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Uppercase HTTP verb
    pub method: String,
    pub url: String,
    /// Query or body parameters, transport-agnostic
    #[serde(default)]
    pub params: Map<String, Value>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

impl Request {
    pub fn new(method: impl AsRef<str>, url: impl Into<String>) -> Self {
        Self {
            method: method.as_ref().to_uppercase(),
            url: url.into(),
            params: Map::new(),
            headers: HashMap::new(),
        }
    }

    /// Build a request from a URL that may carry a query string.
    ///
    /// Query pairs are form-decoded into `params` (`+` is a space, invalid
    /// UTF-8 is replaced lossily); the URL keeps only its path.
    pub fn from_url(method: impl AsRef<str>, url: &str) -> Self {
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (url, None),
        };

        let mut request = Self::new(method, path);
        if let Some(query) = query {
            for pair in query.split('&').filter(|p| !p.is_empty()) {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                request
                    .params
                    .insert(decode_component(key), Value::String(decode_component(value)));
            }
        }
        request
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Look up a parameter, treating JSON `null` as absent.
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name).filter(|v| !v.is_null())
    }
}

/// A synthesized response built from a fixture payload.
///
/// `delay` and `timeout` are advisory: the adaptor realizes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Milliseconds the adaptor should wait before settling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u64>,
    #[serde(default)]
    pub timeout: bool,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status_code: 200,
            status_text: None,
            data: None,
            delay: None,
            timeout: false,
            headers: HashMap::new(),
        }
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

impl Response {
    /// A 200 OK response around a raw fixture payload.
    pub fn ok(data: Value) -> Self {
        Self {
            status_code: 200,
            status_text: Some("OK".to_string()),
            data: Some(data),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, code: u16, text: impl Into<String>) -> Self {
        self.status_code = code;
        self.status_text = Some(text.into());
        self
    }

    /// True for status codes the adaptor must report as failures.
    pub fn is_error_status(&self) -> bool {
        (400..600).contains(&self.status_code)
    }

    /// The payload the fixed-point scan works on; `null` counts as absent.
    pub(crate) fn live_data(&self) -> Option<&Value> {
        self.data.as_ref().filter(|v| !v.is_null())
    }
}
