//! Supplier registry server: loads settings, optionally bootstraps the store,
//! verifies the table against the column mapping, then serves HTTP.

use axum::Router;
use supplier_registry::{
    common_routes, connect, ensure_database_exists, ensure_suppliers_table, supplier_routes, verify_schema,
    AppState, Settings,
};
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("supplier_registry=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    if settings.bootstrap {
        ensure_database_exists(&settings.database_url).await?;
    }
    let pool = connect(&settings).await?;
    if settings.bootstrap {
        ensure_suppliers_table(&pool, &settings.schema).await?;
    }
    verify_schema(&pool, &settings.schema).await?;

    let state = AppState::new(pool, &settings);
    let app = Router::new()
        .merge(common_routes())
        .merge(supplier_routes(state))
        .layer(RequestBodyLimitLayer::new(settings.body_limit))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
