#![allow(dead_code)]

use super::builders::Exchange;
use super::headers::{has_header, header_value};
use cornice_cors::{CorsError, Dispatch, PreflightResult};

pub fn assert_header_eq(exchange: &Exchange, name: &str, expected: &str) {
    assert_eq!(
        header_value(&exchange.headers, name),
        Some(expected),
        "unexpected value for {name}"
    );
}

pub fn assert_no_header(exchange: &Exchange, name: &str) {
    assert!(
        !has_header(&exchange.headers, name),
        "{name} should not be set, got {:?}",
        header_value(&exchange.headers, name)
    );
}

pub fn assert_errors(exchange: &Exchange, expected: &[CorsError]) {
    assert_eq!(exchange.errors.as_slice(), expected);
}

pub fn assert_preflight_completed(exchange: &Exchange) {
    assert_eq!(
        exchange.outcome,
        Dispatch::Preflight(PreflightResult::Completed),
        "expected a completed preflight, errors: {:?}",
        exchange.errors
    );
}

pub fn assert_handled(exchange: &Exchange) {
    assert_eq!(
        exchange.outcome,
        Dispatch::Handled(()),
        "expected the endpoint to run, errors: {:?}",
        exchange.errors
    );
}
