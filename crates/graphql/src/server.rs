//! GraphQL HTTP server.

use std::future::Future;
use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use tracing::{debug, info, warn};

use storefront_core::ports::CatalogSource;

use crate::types::StorefrontSchema;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_playground: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            enable_playground: true,
        }
    }
}

impl ServerConfig {
    /// Socket address to bind.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone)]
struct AppState {
    schema: StorefrontSchema,
    catalog: Arc<dyn CatalogSource>,
}

/// Build the HTTP router for a schema.
///
/// `/health` reports the availability of `catalog`, which should be the
/// source the schema reads from.
pub fn router(
    schema: StorefrontSchema,
    catalog: Arc<dyn CatalogSource>,
    config: &ServerConfig,
) -> Router {
    let mut app = Router::new()
        .route("/graphql", get(graphql_playground).post(graphql_handler))
        .route("/health", get(health_check))
        .with_state(AppState { schema, catalog });

    if config.enable_playground {
        app = app.route("/", get(graphql_playground));
    }
    app
}

/// Start the GraphQL server.
pub async fn serve(
    schema: StorefrontSchema,
    catalog: Arc<dyn CatalogSource>,
    config: ServerConfig,
) -> Result<(), std::io::Error> {
    let app = router(schema, catalog, &config);
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("⚡ GraphQL server listening on http://{}", addr);

    axum::serve(listener, app).await
}

/// Start the GraphQL server with graceful shutdown support.
pub async fn serve_with_shutdown<F>(
    schema: StorefrontSchema,
    catalog: Arc<dyn CatalogSource>,
    config: ServerConfig,
    shutdown_signal: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(schema, catalog, &config);
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    debug!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}

/// GraphQL query handler.
async fn graphql_handler(
    State(state): State<AppState>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let response = state.schema.execute(req.into_inner()).await;
    if response.is_err() {
        warn!(errors = response.errors.len(), "Query finished with errors");
    }
    response.into()
}

/// GraphQL Playground UI.
async fn graphql_playground() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// Health check endpoint: 503 while the catalog source is unreachable.
async fn health_check(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.catalog.ping().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use storefront_core::error::{StorageError, StorageResult};
    use storefront_core::models::{
        Collection, EntityId, Image, Product, Store, StoreScope, Variant,
    };
    use storefront_core::services::Paginator;
    use storefront_storage::MemoryCatalog;

    use crate::build_schema;

    /// Catalog whose backing store is gone.
    struct Unreachable;

    fn gone<T>() -> StorageResult<T> {
        Err(StorageError::ConnectionError("connection refused".into()))
    }

    #[async_trait]
    impl CatalogSource for Unreachable {
        async fn ping(&self) -> StorageResult<()> {
            gone()
        }
        async fn store(&self, _: &StoreScope) -> StorageResult<Option<Store>> {
            gone()
        }
        async fn products(&self, _: &StoreScope) -> StorageResult<Vec<Product>> {
            gone()
        }
        async fn product(&self, _: &StoreScope, _: EntityId) -> StorageResult<Option<Product>> {
            gone()
        }
        async fn product_by_handle(&self, _: &StoreScope, _: &str) -> StorageResult<Option<Product>> {
            gone()
        }
        async fn collections(&self, _: &StoreScope) -> StorageResult<Vec<Collection>> {
            gone()
        }
        async fn collection(&self, _: &StoreScope, _: EntityId) -> StorageResult<Option<Collection>> {
            gone()
        }
        async fn collection_by_handle(
            &self,
            _: &StoreScope,
            _: &str,
        ) -> StorageResult<Option<Collection>> {
            gone()
        }
        async fn products_in_collection(&self, _: &StoreScope, _: EntityId) -> StorageResult<Vec<Product>> {
            gone()
        }
        async fn variants_for_product(&self, _: &StoreScope, _: EntityId) -> StorageResult<Vec<Variant>> {
            gone()
        }
        async fn images_for_product(&self, _: &StoreScope, _: EntityId) -> StorageResult<Vec<Image>> {
            gone()
        }
        async fn collections_for_product(
            &self,
            _: &StoreScope,
            _: EntityId,
        ) -> StorageResult<Vec<Collection>> {
            gone()
        }
    }

    fn state(catalog: Arc<dyn CatalogSource>) -> AppState {
        AppState {
            schema: build_schema(Arc::new(MemoryCatalog::sample()), StoreScope::new(1), Paginator::default()),
            catalog,
        }
    }

    // Test critique: /health reflète la disponibilité du catalogue
    #[tokio::test]
    async fn test_health_follows_catalog() {
        let up = health_check(State(state(Arc::new(MemoryCatalog::sample())))).await;
        assert_eq!(up, (StatusCode::OK, "OK"));

        let down = health_check(State(state(Arc::new(Unreachable)))).await;
        assert_eq!(down, (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE"));
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces_as_field_error() {
        let schema = build_schema(Arc::new(Unreachable), StoreScope::new(1), Paginator::default());
        let response = serde_json::to_value(schema.execute("{ shop { name } }").await).unwrap();

        assert_eq!(response["errors"].as_array().map(Vec::len), Some(1));
        assert_eq!(response["errors"][0]["extensions"]["code"], "STORAGE_ERROR");
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:4000");
        assert!(config.enable_playground);
    }
}
