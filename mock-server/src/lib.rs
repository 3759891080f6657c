use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use tokio::{net::TcpListener, sync::RwLock};

pub type Db = Arc<RwLock<Vec<String>>>;

pub fn app() -> Router {
    app_with_items(Vec::new())
}

/// Router whose list starts out as `items`.
pub fn app_with_items(items: Vec<String>) -> Router {
    let db: Db = Arc::new(RwLock::new(items));
    Router::new()
        .route("/api/all", get(list_all))
        .route("/api/add", post(add_item))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_items(listener: TcpListener, items: Vec<String>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_items(items)).await
}

async fn list_all(State(db): State<Db>) -> Json<Vec<String>> {
    Json(db.read().await.clone())
}

async fn add_item(State(db): State<Db>, Json(value): Json<String>) -> StatusCode {
    tracing::debug!(%value, "adding item");
    db.write().await.push(value);
    StatusCode::CREATED
}
