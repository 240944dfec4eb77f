//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router from configured routes
//! - Attach per-route `only_vary_on` / `dont_vary_on` layers
//! - Wire up the shared stack (upstream Vary stage, post-processor, tracing)
//! - Bind server to listener and shut down gracefully

use std::future::Future;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::{RouteConfig, ServerConfig};
use crate::http::upstream::UpstreamVaryLayer;
use crate::vary::{dont_vary_on, only_vary_on, VaryRewriteLayer};

/// HTTP server exercising the `Vary` layers.
pub struct VaryServer {
    router: Router,
    config: ServerConfig,
}

impl VaryServer {
    /// Create a new server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let router = Self::build_router(&config);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers added later sit further out, so on the way back the upstream
    /// stage runs before the rewrite.
    fn build_router(config: &ServerConfig) -> Router {
        let mut router = Router::new();
        for route in &config.routes {
            tracing::debug!(
                path = %route.path,
                only_vary_on = ?route.only_vary_on,
                dont_vary_on = ?route.dont_vary_on,
                "Registering route"
            );
            router = router.route(&route.path, route_handler(route));
        }

        let router = router.layer(UpstreamVaryLayer::upstream(config.vary.upstream.iter().cloned()));
        let router = if config.vary.rewrite_enabled {
            router.layer(VaryRewriteLayer::rewrite())
        } else {
            tracing::warn!("Vary rewriting disabled; directives will be ignored");
            router
        };
        router.layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Serve on `listener` until `signal` resolves.
    pub async fn run<F>(self, listener: TcpListener, signal: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.config.routes.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Handler for one configured route, wrapped in its `Vary` annotations.
fn route_handler(route: &RouteConfig) -> axum::routing::MethodRouter {
    let body = route.body.clone();
    let mut method_router = get(move || {
        let body = body.clone();
        async move { body }
    });

    if !route.dont_vary_on.is_empty() {
        method_router = method_router.layer(dont_vary_on(route.dont_vary_on.iter().cloned()));
    }
    if !route.only_vary_on.is_empty() {
        method_router = method_router.layer(only_vary_on(route.only_vary_on.iter().cloned()));
    }
    method_router
}

/// Routes served when the config file declares none.
pub fn default_routes() -> Vec<RouteConfig> {
    let mut home = RouteConfig::new("/", "Same page for every visitor\n");
    home.dont_vary_on = vec!["Cookie".to_string()];

    let mut localized = RouteConfig::new("/localized", "Greeting picked by Accept-Language\n");
    localized.only_vary_on = vec!["Accept-Language".to_string()];

    let plain = RouteConfig::new("/plain", "Vary left as the upstream stage set it\n");

    vec![home, localized, plain]
}
