use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use cornice_cors::{ErrorSink, Errors, RequestContext};
use serde_json::json;

use super::AppState;

/// Runs the route's CORS hooks around the downstream handler, in the same
/// order as `Cors::dispatch`: validators, then preflight or handler, then
/// filters on whatever response comes out.
pub async fn cors_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(route) = state.cors.route(request.uri().path()) else {
        return next.run(request).await;
    };

    let method = request.method().as_str().to_string();
    let request_headers = request.headers().clone();
    let context = RequestContext::from_headers(&method, &request_headers);
    let mut cors_headers = HeaderMap::new();
    let mut errors = Errors::new();

    route.validate(&context, &mut cors_headers, &mut errors);

    let mut response = if errors.has_errors() {
        error_response(&errors)
    } else if context.is_options() && route.policy().handles_preflight() {
        route.preflight(&context, &mut cors_headers, &mut errors);
        if errors.has_errors() {
            error_response(&errors)
        } else {
            StatusCode::OK.into_response()
        }
    } else {
        next.run(request).await
    };

    route.filter(&context, &mut cors_headers);
    response.headers_mut().extend(cors_headers);
    response
}

fn error_response(errors: &Errors) -> Response {
    let body = json!({
        "status": "error",
        "errors": errors
            .iter()
            .map(|error| json!({
                "location": error.location(),
                "name": error.name(),
                "description": error.to_string(),
            }))
            .collect::<Vec<_>>(),
    });

    (
        StatusCode::from_u16(errors.status()).unwrap_or(StatusCode::BAD_REQUEST),
        Json(body),
    )
        .into_response()
}
