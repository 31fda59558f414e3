use crate::constants::header;
use crate::pattern::PatternError;
use thiserror::Error;

/// A CORS validation failure recorded against a single request.
///
/// These never abort processing: they are pushed into an [`ErrorSink`] and the
/// host decides how to turn them into a response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CorsError {
    #[error("this header is mandatory")]
    MissingHeader(&'static str),
    #[error("method {0} not allowed")]
    MethodNotAllowed(String),
    #[error("header \"{0}\" not allowed")]
    HeaderNotAllowed(String),
    #[error("{0} not allowed")]
    OriginNotAllowed(String),
}

impl CorsError {
    /// Where the offending value was found. Always a request header.
    pub fn location(&self) -> &'static str {
        "header"
    }

    /// Name of the request header the error refers to.
    pub fn name(&self) -> &'static str {
        match self {
            CorsError::MissingHeader(name) => *name,
            CorsError::MethodNotAllowed(_) => header::ACCESS_CONTROL_REQUEST_METHOD,
            CorsError::HeaderNotAllowed(_) => header::ACCESS_CONTROL_REQUEST_HEADERS,
            CorsError::OriginNotAllowed(_) => header::ORIGIN,
        }
    }
}

/// Destination for validation errors produced while handling one request.
pub trait ErrorSink {
    fn add(&mut self, error: CorsError);

    fn error_count(&self) -> usize;

    fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Default [`ErrorSink`]: keeps errors in the order they were recorded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Errors {
    errors: Vec<CorsError>,
}

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CorsError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_vec(self) -> Vec<CorsError> {
        self.errors
    }

    /// Status a host should answer with: `400` once anything was recorded.
    pub fn status(&self) -> u16 {
        if self.errors.is_empty() { 200 } else { 400 }
    }
}

impl ErrorSink for Errors {
    fn add(&mut self, error: CorsError) {
        tracing::debug!(
            location = error.location(),
            name = error.name(),
            "cors validation failed: {error}"
        );
        self.errors.push(error);
    }

    fn error_count(&self) -> usize {
        self.errors.len()
    }
}

impl ErrorSink for Vec<CorsError> {
    fn add(&mut self, error: CorsError) {
        self.push(error);
    }

    fn error_count(&self) -> usize {
        self.len()
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a CorsError;
    type IntoIter = std::slice::Iter<'a, CorsError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Errors raised while building policies or registering routes.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("invalid origin pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: PatternError,
    },
    #[error("method {0} is not declared for this endpoint")]
    UnknownMethod(String),
    #[error("route {0} is already registered")]
    DuplicateRoute(String),
}

#[cfg(test)]
#[path = "errors_test.rs"]
mod errors_test;
