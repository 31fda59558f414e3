#![allow(dead_code)]

use cornice_cors::constants::{header, method};
use cornice_cors::{
    Cors, CorsError, Dispatch, Errors, Headers, MethodOptions, PolicyRegistry, ServiceOptions,
};

pub const ROUTE: &str = "/squirel";

/// The service used throughout the suite: GET restricted to one origin, POST
/// with CORS disabled, PUT inheriting the service origin.
pub fn squirel() -> ServiceOptions {
    ServiceOptions::new()
        .origins(["foobar"])
        .method(method::GET, MethodOptions::new().origins(["notmyidea.org"]))
        .method(
            method::POST,
            MethodOptions::new()
                .enabled(false)
                .headers(["X-Another-Header"]),
        )
        .method(method::PUT, MethodOptions::new().headers(["X-My-Header"]))
}

pub fn cors(options: ServiceOptions) -> Cors {
    let mut registry = PolicyRegistry::new();
    registry
        .register(ROUTE, &options)
        .expect("valid CORS configuration");
    Cors::new(registry)
}

#[derive(Debug)]
pub struct Exchange {
    pub outcome: Dispatch<()>,
    pub headers: Headers,
    pub errors: Vec<CorsError>,
    status: u16,
}

impl Exchange {
    /// Status reported by [`Errors::status`] once the request was dispatched.
    pub fn status(&self) -> u16 {
        self.status
    }
}

pub struct RequestBuilder {
    method: String,
    headers: Headers,
}

impl RequestBuilder {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            headers: Headers::new(),
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn origin(self, origin: impl Into<String>) -> Self {
        self.header(header::ORIGIN, origin)
    }

    pub fn request_method(self, method: impl Into<String>) -> Self {
        self.header(header::ACCESS_CONTROL_REQUEST_METHOD, method)
    }

    pub fn request_headers(self, headers: impl Into<String>) -> Self {
        self.header(header::ACCESS_CONTROL_REQUEST_HEADERS, headers)
    }

    pub fn send(self, cors: &Cors) -> Exchange {
        self.send_to(cors, ROUTE)
    }

    pub fn send_to(self, cors: &Cors, route: &str) -> Exchange {
        let mut headers = Headers::new();
        let mut errors = Errors::new();
        let outcome = cors.dispatch(
            route,
            &self.method,
            &self.headers,
            &mut headers,
            &mut errors,
            |_, _| (),
        );
        let status = errors.status();
        Exchange {
            outcome,
            headers,
            errors: errors.into_vec(),
            status,
        }
    }
}

pub fn preflight_request() -> RequestBuilder {
    RequestBuilder::new(method::OPTIONS)
}

pub fn simple_request() -> RequestBuilder {
    RequestBuilder::new(method::GET)
}
