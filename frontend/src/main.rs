//! Frontend application entry point.

use frontend::app::App;

fn main() {
    #[cfg(not(feature = "server"))]
    dioxus::launch(App);

    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        use std::sync::Arc;

        use axum::{extract::Request, middleware::Next};
        use backend::{api::catalog::default_backend, server_extra::catalog_routes::catalog_router};
        use dioxus::server::axum;

        let backend = Arc::new(default_backend());
        dioxus::logger::tracing::info!("catalog config: {:?}", backend.config);

        Ok(dioxus::server::router(App)
            .merge(catalog_router(backend))
            .layer(axum::middleware::from_fn(
                |request: Request, next: Next| async move {
                    let method = request.method().clone();
                    let path = request.uri().path().to_string();
                    let res = next.run(request).await;
                    dioxus::logger::tracing::debug!("{} {} -> {}", method, path, res.status());
                    res
                },
            )))
    });
}
