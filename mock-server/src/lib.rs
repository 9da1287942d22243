use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const NOT_FOUND_MSG: &str = "Auto no encontrado";
pub const DELETED_MSG: &str = "Auto eliminado";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Auto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: AutoInput,
}

/// Body of POST and PUT. PUT replaces the whole document, so optional fields
/// missing from the body are cleared.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AutoInput {
    pub marca: String,
    pub modelo: String,
    pub anio: i32,
    pub precio: f64,
    #[serde(default)]
    pub kilometraje: String,
    #[serde(default)]
    pub color: String,
    pub transmision: String,
    #[serde(default)]
    pub combustible: String,
    #[serde(default)]
    pub imagen_url: String,
    #[serde(default)]
    pub descripcion: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Msg {
    pub msg: String,
}

// Insertion-ordered, like a document store's default listing order.
pub type Db = Arc<RwLock<Vec<Auto>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/api/autos", get(list_autos).post(create_auto))
        .route(
            "/api/autos/{id}",
            get(get_auto).put(update_auto).delete(delete_auto),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found() -> (StatusCode, Json<Msg>) {
    (
        StatusCode::NOT_FOUND,
        Json(Msg {
            msg: NOT_FOUND_MSG.to_string(),
        }),
    )
}

async fn list_autos(State(db): State<Db>) -> Json<Vec<Auto>> {
    let autos = db.read().await;
    tracing::debug!(count = autos.len(), "listing autos");
    Json(autos.clone())
}

async fn create_auto(
    State(db): State<Db>,
    Json(input): Json<AutoInput>,
) -> (StatusCode, Json<Auto>) {
    let auto = Auto {
        id: Uuid::new_v4().simple().to_string(),
        fields: input,
    };
    tracing::info!(id = %auto.id, marca = %auto.fields.marca, "auto created");
    db.write().await.push(auto.clone());
    (StatusCode::CREATED, Json(auto))
}

async fn get_auto(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Auto>, (StatusCode, Json<Msg>)> {
    let autos = db.read().await;
    autos
        .iter()
        .find(|a| a.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(not_found)
}

async fn update_auto(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<AutoInput>,
) -> Result<Json<Auto>, (StatusCode, Json<Msg>)> {
    let mut autos = db.write().await;
    let auto = autos.iter_mut().find(|a| a.id == id).ok_or_else(not_found)?;
    auto.fields = input;
    tracing::info!(id = %id, "auto replaced");
    Ok(Json(auto.clone()))
}

async fn delete_auto(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Msg>, (StatusCode, Json<Msg>)> {
    let mut autos = db.write().await;
    let index = autos.iter().position(|a| a.id == id).ok_or_else(not_found)?;
    autos.remove(index);
    tracing::info!(id = %id, "auto deleted");
    Ok(Json(Msg {
        msg: DELETED_MSG.to_string(),
    }))
}
