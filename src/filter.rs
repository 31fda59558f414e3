use crate::constants::{CREDENTIALS_ALLOWED, header};
use crate::context::RequestContext;
use crate::headers::HeaderWriter;
use crate::policy::PolicyDescriptor;
use std::sync::Arc;

/// Adds credential and exposed-header information to an outgoing response.
#[derive(Clone, Debug)]
pub struct ResponseFilter {
    policy: Arc<PolicyDescriptor>,
}

impl ResponseFilter {
    pub fn new(policy: Arc<PolicyDescriptor>) -> Self {
        Self { policy }
    }

    /// Never fails and can be applied more than once to the same response.
    pub fn apply(&self, request: &RequestContext<'_>, response: &mut dyn HeaderWriter) {
        let method = request.effective_method();

        if self.policy.supports_credentials(method)
            && !response.has_header(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
        {
            response.set_header(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                CREDENTIALS_ALLOWED.to_string(),
            );
        }

        if !request.is_options() && !self.policy.supported_headers().is_empty() {
            response.set_header(
                header::ACCESS_CONTROL_EXPOSE_HEADERS,
                self.policy.allow_headers_value(),
            );
        }
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;
