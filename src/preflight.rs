use crate::constants::header;
use crate::context::RequestContext;
use crate::errors::{CorsError, ErrorSink};
use crate::headers::HeaderWriter;
use crate::policy::PolicyDescriptor;
use std::sync::Arc;

/// Outcome of answering a preflight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreflightResult {
    /// `Origin` or `Access-Control-Request-Method` was missing; only the
    /// missing-header errors were recorded and no header was set.
    Incomplete,
    /// Every check ran and the response headers were set. Validation errors
    /// may still have been recorded.
    Completed,
}

impl PreflightResult {
    pub fn is_completed(&self) -> bool {
        matches!(self, PreflightResult::Completed)
    }
}

/// Answers `OPTIONS` preflight requests for one endpoint.
///
/// Every failed check records its own error instead of stopping at the first
/// one, so a caller sees all problems with its request at once.
#[derive(Clone, Debug)]
pub struct PreflightHandler {
    policy: Arc<PolicyDescriptor>,
}

impl PreflightHandler {
    pub fn new(policy: Arc<PolicyDescriptor>) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PolicyDescriptor {
        &self.policy
    }

    pub fn handle(
        &self,
        request: &RequestContext<'_>,
        response: &mut dyn HeaderWriter,
        errors: &mut dyn ErrorSink,
    ) -> PreflightResult {
        if request.origin.is_none() {
            errors.add(CorsError::MissingHeader(header::ORIGIN));
        }
        if request.access_control_request_method.is_none() {
            errors.add(CorsError::MissingHeader(
                header::ACCESS_CONTROL_REQUEST_METHOD,
            ));
        }
        let (Some(_), Some(requested_method)) =
            (request.origin, request.access_control_request_method)
        else {
            return PreflightResult::Incomplete;
        };

        if !self.policy.supports_method(requested_method) {
            errors.add(CorsError::MethodNotAllowed(requested_method.to_string()));
        }

        for name in request.requested_headers() {
            if !self.policy.supports_header(name) {
                errors.add(CorsError::HeaderNotAllowed(name.to_string()));
            }
        }

        response.set_header(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            self.policy.allow_headers_value(),
        );
        response.set_header(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            self.policy.allow_methods_value(),
        );

        if let Some(max_age) = self.policy.max_age_for(requested_method) {
            response.set_header(header::ACCESS_CONTROL_MAX_AGE, max_age.to_string());
        }

        PreflightResult::Completed
    }
}

#[cfg(test)]
#[path = "preflight_test.rs"]
mod preflight_test;
