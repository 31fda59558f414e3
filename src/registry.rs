use crate::context::RequestContext;
use crate::errors::{ErrorSink, PolicyError};
use crate::filter::ResponseFilter;
use crate::headers::HeaderWriter;
use crate::options::ServiceOptions;
use crate::policy::PolicyDescriptor;
use crate::preflight::{PreflightHandler, PreflightResult};
use crate::validator::RequestValidator;
use indexmap::IndexMap;
use indexmap::map::Entry;
use std::fmt;
use std::sync::Arc;

/// Hook run before the endpoint. Records problems into the error sink.
pub type ValidatorFn = dyn for<'a> Fn(&RequestContext<'a>, &mut dyn HeaderWriter, &mut dyn ErrorSink)
    + Send
    + Sync;

/// Hook run on the outgoing response.
pub type FilterFn = dyn for<'a> Fn(&RequestContext<'a>, &mut dyn HeaderWriter) + Send + Sync;

/// A registered endpoint: its policy plus the hooks wrapped around it.
///
/// The CORS validator and filter are always the first entries of their
/// respective lists.
#[derive(Clone)]
pub struct Route {
    name: String,
    policy: Arc<PolicyDescriptor>,
    preflight: PreflightHandler,
    validators: Vec<Arc<ValidatorFn>>,
    filters: Vec<Arc<FilterFn>>,
}

impl Route {
    fn new(name: String, policy: PolicyDescriptor) -> Self {
        let policy = Arc::new(policy);
        let mut route = Self {
            name,
            preflight: PreflightHandler::new(Arc::clone(&policy)),
            policy: Arc::clone(&policy),
            validators: Vec::new(),
            filters: Vec::new(),
        };

        let validator = RequestValidator::new(Arc::clone(&policy));
        route.push_validator(move |request, response, errors| {
            validator.validate(request, response, errors)
        });
        let filter = ResponseFilter::new(policy);
        route.push_filter(move |request, response| filter.apply(request, response));
        route
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> &Arc<PolicyDescriptor> {
        &self.policy
    }

    pub fn push_validator<F>(&mut self, validator: F) -> &mut Self
    where
        F: for<'a> Fn(&RequestContext<'a>, &mut dyn HeaderWriter, &mut dyn ErrorSink)
            + Send
            + Sync
            + 'static,
    {
        self.validators.push(Arc::new(validator));
        self
    }

    pub fn push_filter<F>(&mut self, filter: F) -> &mut Self
    where
        F: for<'a> Fn(&RequestContext<'a>, &mut dyn HeaderWriter) + Send + Sync + 'static,
    {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Runs every validator in registration order.
    pub fn validate(
        &self,
        request: &RequestContext<'_>,
        response: &mut dyn HeaderWriter,
        errors: &mut dyn ErrorSink,
    ) {
        for validator in &self.validators {
            validator(request, &mut *response, &mut *errors);
        }
    }

    pub fn preflight(
        &self,
        request: &RequestContext<'_>,
        response: &mut dyn HeaderWriter,
        errors: &mut dyn ErrorSink,
    ) -> PreflightResult {
        self.preflight.handle(request, response, errors)
    }

    /// Runs every filter in registration order.
    pub fn filter(&self, request: &RequestContext<'_>, response: &mut dyn HeaderWriter) {
        for filter in &self.filters {
            filter(request, &mut *response);
        }
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("validators", &self.validators.len())
            .field("filters", &self.filters.len())
            .finish()
    }
}

/// Route identifier to [`Route`] lookup, filled once at startup.
#[derive(Clone, Debug, Default)]
pub struct PolicyRegistry {
    routes: IndexMap<String, Route>,
}

impl PolicyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the policy for `route` and registers it with the CORS hooks.
    pub fn register<S: Into<String>>(
        &mut self,
        route: S,
        options: &ServiceOptions,
    ) -> Result<&mut Route, PolicyError> {
        match self.routes.entry(route.into()) {
            Entry::Occupied(entry) => {
                tracing::warn!(route = %entry.key(), "route registered twice");
                Err(PolicyError::DuplicateRoute(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                let policy = PolicyDescriptor::from_options(options)?;
                let name = entry.key().clone();
                tracing::debug!(route = %name, "registered cors route");
                Ok(entry.insert(Route::new(name, policy)))
            }
        }
    }

    pub fn get(&self, route: &str) -> Option<&Route> {
        self.routes.get(route)
    }

    pub fn policy(&self, route: &str) -> Option<&Arc<PolicyDescriptor>> {
        self.routes.get(route).map(Route::policy)
    }

    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;
