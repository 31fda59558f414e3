use std::sync::Arc;

use cornice_cors::{Cors, MethodOptions, PolicyError, PolicyRegistry, ServiceOptions};

pub type SharedCors = Arc<Cors>;

#[derive(Clone)]
pub struct AppState {
    pub cors: SharedCors,
    pub greeting: &'static str,
}

pub fn build_state() -> Result<AppState, PolicyError> {
    let mut registry = PolicyRegistry::new();

    registry.register(
        "/squirel",
        &ServiceOptions::new()
            .origins(["http://localhost:3000"])
            .method("GET", MethodOptions::new().origins(["http://*.example.com"]))
            .method(
                "POST",
                MethodOptions::new()
                    .enabled(false)
                    .headers(["X-Another-Header"]),
            )
            .method("PUT", MethodOptions::new().headers(["X-My-Header"])),
    )?;

    registry.register(
        "/spotted",
        &ServiceOptions::new()
            .origins(["http://localhost:3000"])
            .headers(["Content-Type", "X-Example-Trace"])
            .credentials(true)
            .max_age(600)
            .method("GET", MethodOptions::new()),
    )?;

    Ok(AppState {
        cors: Arc::new(Cors::new(registry)),
        greeting: "Welcome to the Axum CORS example!",
    })
}

pub mod middleware;
