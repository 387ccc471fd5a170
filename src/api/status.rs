use crate::{db::Scope, error::ApiError};
use actix_web::{HttpResponse, Responder};
use serde_json::json;

/// Liveness check, round-trips the database
#[utoipa::path(
    get,
    path = "/status",
    responses(
        (status = 200, description = "Service and database are reachable", body = Object, example = json!({
            "status": "up"
        })),
        (status = 500, description = "Database unreachable")
    ),
    tag = "Status"
)]
pub async fn status(scope: Scope) -> Result<impl Responder, ApiError> {
    let mut guard = scope.lock().await;

    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(guard.conn()?)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "up" })))
}
