#![allow(dead_code)]

use cornice_cors::{HeaderReader, Headers};

pub fn header_value<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers.header(name)
}

pub fn has_header(headers: &Headers, name: &str) -> bool {
    headers.has_header(name)
}

/// Splits a list-valued header on `separator`, dropping empty entries.
pub fn list_values(headers: &Headers, name: &str, separator: &str) -> Vec<String> {
    header_value(headers, name)
        .map(|value| {
            value
                .split(separator)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
