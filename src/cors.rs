use crate::context::RequestContext;
use crate::errors::ErrorSink;
use crate::headers::{HeaderReader, HeaderWriter};
use crate::preflight::PreflightResult;
use crate::registry::{PolicyRegistry, Route};
use std::sync::Arc;

/// What happened to a request passed through [`Cors::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch<T> {
    /// No route with that identifier is registered. Nothing was touched.
    Unrouted,
    /// Validation recorded errors, so the endpoint was not invoked.
    Rejected,
    /// The request was answered by the preflight handler.
    Preflight(PreflightResult),
    /// The endpoint ran and produced this value.
    Handled(T),
}

impl<T> Dispatch<T> {
    pub fn handled(self) -> Option<T> {
        match self {
            Dispatch::Handled(value) => Some(value),
            _ => None,
        }
    }
}

/// Entry point tying the registry to the request lifecycle.
///
/// For a routed request the validators run first. When they record errors the
/// endpoint is skipped. Otherwise `OPTIONS` requests on routes without their
/// own `OPTIONS` endpoint go to the preflight handler and everything else to
/// the endpoint. The filters run last on every routed response.
#[derive(Clone, Debug)]
pub struct Cors {
    registry: Arc<PolicyRegistry>,
}

impl Cors {
    pub fn new(registry: PolicyRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn from_shared(registry: Arc<PolicyRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    pub fn route(&self, route: &str) -> Option<&Route> {
        self.registry.get(route)
    }

    pub fn dispatch<H, T, F>(
        &self,
        route: &str,
        method: &str,
        request_headers: &H,
        response: &mut dyn HeaderWriter,
        errors: &mut dyn ErrorSink,
        endpoint: F,
    ) -> Dispatch<T>
    where
        H: HeaderReader + ?Sized,
        F: FnOnce(&RequestContext<'_>, &mut dyn HeaderWriter) -> T,
    {
        let Some(entry) = self.registry.get(route) else {
            tracing::trace!(route, "no cors route registered");
            return Dispatch::Unrouted;
        };

        let request = RequestContext::from_headers(method, request_headers);
        entry.validate(&request, response, errors);

        let outcome = if errors.has_errors() {
            tracing::debug!(
                route,
                method,
                errors = errors.error_count(),
                "cors validation failed, endpoint skipped"
            );
            Dispatch::Rejected
        } else if request.is_options() && entry.policy().handles_preflight() {
            Dispatch::Preflight(entry.preflight(&request, response, errors))
        } else {
            Dispatch::Handled(endpoint(&request, &mut *response))
        };

        entry.filter(&request, response);
        outcome
    }
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
