//! Application startup and lifecycle management.

use crate::config::RestaurantConfig;
use crate::handlers;
use crate::services::RestaurantDb;
use axum::{
    body::Body,
    middleware::from_fn,
    routing::{get, put},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, request_span};
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state. Cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub config: RestaurantConfig,
    pub db: RestaurantDb,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/top_restaurants/:limit", get(handlers::top_restaurants))
        .route("/update_grade", put(handlers::update_grade))
        .route(
            "/restaurants_borough_cuisine/:borough/:cuisine/:limit",
            get(handlers::restaurants_by_borough_cuisine),
        )
        .route("/restaurants", get(handlers::list_restaurants))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route_layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(request_span::<Body>))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Opens the database handle and binds the listener (port 0 picks a
    /// random port).
    pub async fn build(config: RestaurantConfig) -> Result<Self, AppError> {
        let db = RestaurantDb::connect(
            &config.mongodb.uri,
            &config.mongodb.database,
            &config.mongodb.collection,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            e
        })?;

        db.initialize_indexes().await.map_err(|e| {
            tracing::error!("Failed to initialize database indexes: {}", e);
            e
        })?;

        let addr = config.common.socket_addr();
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Restaurant service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState { config, db },
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn db(&self) -> &RestaurantDb {
        &self.state.db
    }

    /// Serve until the process is killed.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_with_shutdown(std::future::pending()).await
    }

    /// Serve until `signal` resolves, drain in-flight requests, then close the
    /// database client.
    pub async fn run_with_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let db = self.state.db.clone();
        let router = build_router(self.state);

        let result = axum::serve(self.listener, router)
            .with_graceful_shutdown(signal)
            .await;

        if let Err(e) = &result {
            tracing::error!("HTTP server error: {}", e);
        }

        db.shutdown().await;
        result
    }
}
