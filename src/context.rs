use crate::constants::{header, method};
use crate::headers::HeaderReader;

/// The parts of an incoming request that CORS processing looks at.
///
/// Empty header values are treated as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub origin: Option<&'a str>,
    pub access_control_request_method: Option<&'a str>,
    pub access_control_request_headers: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    pub fn new(method: &'a str) -> Self {
        Self {
            method,
            origin: None,
            access_control_request_method: None,
            access_control_request_headers: None,
        }
    }

    pub fn from_headers<H>(method: &'a str, headers: &'a H) -> Self
    where
        H: HeaderReader + ?Sized,
    {
        Self {
            method,
            origin: non_empty(headers.header(header::ORIGIN)),
            access_control_request_method: non_empty(
                headers.header(header::ACCESS_CONTROL_REQUEST_METHOD),
            ),
            access_control_request_headers: non_empty(
                headers.header(header::ACCESS_CONTROL_REQUEST_HEADERS),
            ),
        }
    }

    pub fn is_options(&self) -> bool {
        self.method == method::OPTIONS
    }

    /// The method CORS checks evaluate: the announced method during a
    /// preflight, the request verb otherwise.
    pub fn effective_method(&self) -> &'a str {
        if self.is_options() {
            self.access_control_request_method.unwrap_or(self.method)
        } else {
            self.method
        }
    }

    /// Header names listed in `Access-Control-Request-Headers`, split on ASCII
    /// whitespace. Other Unicode whitespace stays part of a name, which cannot
    /// occur in a valid header value.
    pub fn requested_headers(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.access_control_request_headers
            .unwrap_or_default()
            .split_ascii_whitespace()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
