use indexmap::IndexMap;

/// Ordered header map used by the default request and response adapters.
///
/// Names keep the casing they were inserted with; lookups through
/// [`HeaderReader`] ignore ASCII case as HTTP requires.
pub type Headers = IndexMap<String, String>;

/// Read access to a set of HTTP headers.
pub trait HeaderReader {
    /// Returns the value of the first header named `name`, ignoring ASCII case.
    fn header(&self, name: &str) -> Option<&str>;

    fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }
}

/// Mutable access to outgoing response headers.
pub trait HeaderWriter: HeaderReader {
    /// Sets `name` to `value`, replacing any existing header with the same name.
    fn set_header(&mut self, name: &str, value: String);
}

impl HeaderReader for Headers {
    fn header(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.get(name) {
            return Some(value.as_str());
        }

        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl HeaderWriter for Headers {
    fn set_header(&mut self, name: &str, value: String) {
        if let Some((_, existing)) = self
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            *existing = value;
            return;
        }

        self.insert(name.to_string(), value);
    }
}

impl<T: HeaderReader + ?Sized> HeaderReader for &T {
    fn header(&self, name: &str) -> Option<&str> {
        (**self).header(name)
    }
}

impl<T: HeaderReader + ?Sized> HeaderReader for &mut T {
    fn header(&self, name: &str) -> Option<&str> {
        (**self).header(name)
    }
}

impl<T: HeaderWriter + ?Sized> HeaderWriter for &mut T {
    fn set_header(&mut self, name: &str, value: String) {
        (**self).set_header(name, value);
    }
}

#[cfg(feature = "http")]
mod http_adapter {
    use super::{HeaderReader, HeaderWriter};
    use http::header::{HeaderMap, HeaderName, HeaderValue};

    impl HeaderReader for HeaderMap {
        fn header(&self, name: &str) -> Option<&str> {
            self.get(name).and_then(|value| value.to_str().ok())
        }
    }

    impl HeaderWriter for HeaderMap {
        fn set_header(&mut self, name: &str, value: String) {
            match (
                HeaderName::try_from(name),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    self.insert(name, value);
                }
                _ => tracing::warn!(header = name, "dropping header with invalid name or value"),
            }
        }
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
