use indexmap::IndexMap;

/// Per-method CORS overrides. Unset fields inherit from [`ServiceOptions`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct MethodOptions {
    /// Replaces the service-level origins for this method.
    pub origins: Option<Vec<String>>,
    /// Headers accepted in addition to the service-level ones.
    pub headers: Vec<String>,
    pub enabled: Option<bool>,
    pub credentials: Option<bool>,
    pub max_age: Option<u64>,
}

impl MethodOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.origins = Some(origins.into_iter().map(Into::into).collect());
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn credentials(mut self, enabled: bool) -> Self {
        self.credentials = Some(enabled);
        self
    }

    pub fn max_age(mut self, seconds: u64) -> Self {
        self.max_age = Some(seconds);
        self
    }
}

/// Static CORS declaration of one service (a route and the methods it serves).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ServiceOptions {
    pub origins: Vec<String>,
    pub headers: Vec<String>,
    pub enabled: bool,
    pub credentials: bool,
    pub max_age: Option<u64>,
    /// Declared methods, in declaration order.
    pub methods: IndexMap<String, MethodOptions>,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            origins: Vec::new(),
            headers: Vec::new(),
            enabled: true,
            credentials: false,
            max_age: None,
            methods: IndexMap::new(),
        }
    }
}

impl ServiceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.origins = origins.into_iter().map(Into::into).collect();
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn credentials(mut self, enabled: bool) -> Self {
        self.credentials = enabled;
        self
    }

    pub fn max_age(mut self, seconds: u64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    /// Declares `method`, replacing an earlier declaration of the same name.
    pub fn method<S: Into<String>>(mut self, method: S, options: MethodOptions) -> Self {
        self.methods.insert(method.into(), options);
        self
    }

    pub(crate) fn declares(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
