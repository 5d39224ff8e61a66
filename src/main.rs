mod data;
mod server;

use std::sync::Arc;

use anyhow::Context;

use data::loader;
use server::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Eager load: the process must not serve requests without the table.
    let data_path = loader::default_data_path();
    let table = loader::load_table(&data_path)
        .with_context(|| format!("loading dataset from {}", data_path.display()))?;
    log::info!(
        "Loaded {} locations ({} columns, {} region types) from {}",
        table.len(),
        table.columns.len(),
        table.region_types.len(),
        data_path.display()
    );

    let state = AppState {
        table: Arc::new(table),
    };
    let app = server::build_router(state);

    let addr =
        std::env::var("ACCIDENT_MAP_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding to {addr}"))?;
    log::info!("Accident map serving on http://{addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
