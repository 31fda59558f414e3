use crate::constants::{HEADER_SEPARATOR, METHOD_SEPARATOR, method};
use crate::errors::PolicyError;
use crate::options::{MethodOptions, ServiceOptions};
use crate::pattern::OriginPattern;
use indexmap::{IndexMap, IndexSet};

/// Immutable CORS policy of one endpoint.
///
/// Every declared method has an origin entry. Methods with CORS disabled map
/// to an empty list, which denies every cross-origin caller.
#[derive(Clone, Debug)]
pub struct PolicyDescriptor {
    allowed_origins_by_method: IndexMap<String, Vec<OriginPattern>>,
    supported_methods: IndexSet<String>,
    supported_headers: IndexSet<String>,
    credentials_by_method: IndexMap<String, bool>,
    max_age_by_method: IndexMap<String, Option<u64>>,
    handles_preflight: bool,
}

impl PolicyDescriptor {
    /// Builds the policy of a service from its static declaration.
    ///
    /// Declaring `GET` also declares `HEAD` unless `HEAD` is listed on its own.
    /// A CORS-enabled service without an explicit `OPTIONS` declaration gets an
    /// implicit `OPTIONS` entry carrying the service-level settings; that entry
    /// is answered by the preflight handler and is not advertised in
    /// `Access-Control-Allow-Methods`.
    pub fn from_options(options: &ServiceOptions) -> Result<Self, PolicyError> {
        let mut policy = Self {
            allowed_origins_by_method: IndexMap::new(),
            supported_methods: IndexSet::new(),
            supported_headers: IndexSet::new(),
            credentials_by_method: IndexMap::new(),
            max_age_by_method: IndexMap::new(),
            handles_preflight: options.enabled && !options.declares(method::OPTIONS),
        };

        for (name, method_options) in &options.methods {
            policy.declare(name, method_options, options)?;
            if name == method::GET && !options.declares(method::HEAD) {
                policy.declare(method::HEAD, method_options, options)?;
            }
        }

        if policy.handles_preflight {
            policy.allowed_origins_by_method.insert(
                method::OPTIONS.to_string(),
                compile_origins(&options.origins)?,
            );
            policy
                .credentials_by_method
                .insert(method::OPTIONS.to_string(), options.credentials);
            policy
                .max_age_by_method
                .insert(method::OPTIONS.to_string(), options.max_age);
        }

        tracing::debug!(
            methods = %policy.allow_methods_value(),
            headers = %policy.allow_headers_value(),
            "built cors policy"
        );

        Ok(policy)
    }

    fn declare(
        &mut self,
        name: &str,
        method_options: &MethodOptions,
        service: &ServiceOptions,
    ) -> Result<(), PolicyError> {
        let enabled = method_options.enabled.unwrap_or(service.enabled);
        if !enabled {
            self.allowed_origins_by_method
                .insert(name.to_string(), Vec::new());
            self.credentials_by_method.insert(name.to_string(), false);
            self.max_age_by_method.insert(name.to_string(), None);
            return Ok(());
        }

        let origins = method_options
            .origins
            .as_deref()
            .unwrap_or(service.origins.as_slice());
        self.allowed_origins_by_method
            .insert(name.to_string(), compile_origins(origins)?);
        self.supported_methods.insert(name.to_string());
        self.supported_headers
            .extend(service.headers.iter().cloned());
        self.supported_headers
            .extend(method_options.headers.iter().cloned());
        self.credentials_by_method.insert(
            name.to_string(),
            method_options.credentials.unwrap_or(service.credentials),
        );
        self.max_age_by_method.insert(
            name.to_string(),
            method_options.max_age.or(service.max_age),
        );
        Ok(())
    }

    /// Origin patterns authorized for `method`.
    pub fn origins_for(&self, method: &str) -> Result<&[OriginPattern], PolicyError> {
        self.allowed_origins_by_method
            .get(method)
            .map(Vec::as_slice)
            .ok_or_else(|| PolicyError::UnknownMethod(method.to_string()))
    }

    pub fn supports_credentials(&self, method: &str) -> bool {
        self.credentials_by_method
            .get(method)
            .copied()
            .unwrap_or(false)
    }

    pub fn max_age_for(&self, method: &str) -> Option<u64> {
        self.max_age_by_method.get(method).copied().flatten()
    }

    /// Whether `origin` matches one of the patterns configured for `method`.
    /// Undeclared methods authorize nothing.
    pub fn is_origin_allowed(&self, method: &str, origin: &str) -> bool {
        self.origins_for(method)
            .map(|patterns| patterns.iter().any(|pattern| pattern.matches(origin)))
            .unwrap_or(false)
    }

    pub fn supported_methods(&self) -> &IndexSet<String> {
        &self.supported_methods
    }

    pub fn supports_method(&self, method: &str) -> bool {
        self.supported_methods.contains(method)
    }

    pub fn supported_headers(&self) -> &IndexSet<String> {
        &self.supported_headers
    }

    /// Case-sensitive membership test against the configured header names.
    pub fn supports_header(&self, name: &str) -> bool {
        self.supported_headers.contains(name)
    }

    pub fn declared_methods(&self) -> impl Iterator<Item = &str> {
        self.allowed_origins_by_method.keys().map(String::as_str)
    }

    /// True when `OPTIONS` requests are answered by the preflight handler.
    pub fn handles_preflight(&self) -> bool {
        self.handles_preflight
    }

    pub fn allow_methods_value(&self) -> String {
        join(&self.supported_methods, METHOD_SEPARATOR)
    }

    pub fn allow_headers_value(&self) -> String {
        join(&self.supported_headers, HEADER_SEPARATOR)
    }
}

impl TryFrom<&ServiceOptions> for PolicyDescriptor {
    type Error = PolicyError;

    fn try_from(options: &ServiceOptions) -> Result<Self, Self::Error> {
        Self::from_options(options)
    }
}

fn compile_origins(origins: &[String]) -> Result<Vec<OriginPattern>, PolicyError> {
    origins
        .iter()
        .map(|origin| {
            OriginPattern::new(origin.as_str()).map_err(|source| PolicyError::InvalidPattern {
                pattern: origin.clone(),
                source,
            })
        })
        .collect()
}

fn join(values: &IndexSet<String>, separator: &str) -> String {
    values
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;
