use crate::constants::header;
use crate::context::RequestContext;
use crate::errors::{CorsError, ErrorSink};
use crate::headers::HeaderWriter;
use crate::policy::PolicyDescriptor;
use std::sync::Arc;

/// Checks the `Origin` of a request against the endpoint policy before the
/// endpoint runs.
///
/// Requests without an `Origin` are not cross-origin requests and pass
/// untouched. An authorized origin is echoed back verbatim in
/// `Access-Control-Allow-Origin`, never as `*`.
#[derive(Clone, Debug)]
pub struct RequestValidator {
    policy: Arc<PolicyDescriptor>,
}

impl RequestValidator {
    pub fn new(policy: Arc<PolicyDescriptor>) -> Self {
        Self { policy }
    }

    pub fn validate(
        &self,
        request: &RequestContext<'_>,
        response: &mut dyn HeaderWriter,
        errors: &mut dyn ErrorSink,
    ) {
        let Some(origin) = request.origin else {
            return;
        };

        let method = request.effective_method();
        if self.policy.is_origin_allowed(method, origin) {
            tracing::trace!(origin, method, "cors origin allowed");
            response.set_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.to_string());
        } else {
            errors.add(CorsError::OriginNotAllowed(origin.to_string()));
        }
    }
}

#[cfg(test)]
#[path = "validator_test.rs"]
mod validator_test;
