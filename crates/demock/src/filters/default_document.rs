//! Default document filter - point directory-like URLs at a fixture file.

use super::append_segment;
use crate::filter::{Flow, RequestFilter};
use crate::model::Request;

/// Appends the configured document name, e.g. `/api/test` -> `/api/test/index.json`.
#[derive(Debug, Clone)]
pub struct DefaultDocumentFilter {
    document: String,
}

impl DefaultDocumentFilter {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }

    pub fn document(&self) -> &str {
        &self.document
    }
}

impl RequestFilter for DefaultDocumentFilter {
    fn filter_request(&self, request: &mut Request) -> Flow {
        request.url = append_segment(&request.url, &self.document);
        Flow::Continue
    }
}
