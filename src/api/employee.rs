use crate::{
    db::Scope,
    error::{ApiError, REQUEST_NOT_VALID},
    repo,
    schema::employee::{EmployeeResponse, PatchEmployeeRequest},
};
use actix_web::{HttpResponse, Responder, web};
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/employee/{id}",
    params(
        ("id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeResponse),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "No such employee"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn get_employee(scope: Scope, path: web::Path<i64>) -> Result<impl Responder, ApiError> {
    let employee_id = path.into_inner();
    let mut guard = scope.lock().await;

    let employee = repo::employee::find_by_id(guard.conn()?, employee_id)
        .await?
        .ok_or_else(ApiError::no_such_employee)?;

    Ok(HttpResponse::Ok().json(EmployeeResponse::from(employee)))
}

/// Patch Employee names
#[utoipa::path(
    patch,
    path = "/employee/{id}",
    params(
        ("id" = i64, Path, description = "Employee ID")
    ),
    request_body = PatchEmployeeRequest,
    responses(
        (status = 204, description = "Employee updated"),
        (status = 400, description = "Invalid patch", body = Object, example = json!({
            "message": "first_name cannot be blank"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "No such employee"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
#[instrument(name = "patch_employee", skip(scope, path, body), fields(employee_id = *path))]
pub async fn patch_employee(
    scope: Scope,
    path: web::Path<i64>,
    body: web::Bytes,
) -> Result<impl Responder, ApiError> {
    let employee_id = path.into_inner();
    let mut guard = scope.lock().await;
    let conn = guard.conn()?;

    repo::employee::find_by_id(&mut *conn, employee_id)
        .await?
        .ok_or_else(ApiError::no_such_employee)?;

    // parsed here so an unknown employee is a 404 whatever the body holds
    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "Rejected employee patch body");
        ApiError::BadRequest(REQUEST_NOT_VALID.to_string())
    })?;

    let patch = PatchEmployeeRequest::validate(&body).map_err(|errors| {
        debug!(%errors, "Rejected employee patch");
        ApiError::BadRequest(PatchEmployeeRequest::rejection_message(&errors))
    })?;

    if !patch.is_empty() {
        repo::employee::update_names(
            &mut *conn,
            employee_id,
            patch.first_name.as_deref(),
            patch.last_name.as_deref(),
        )
        .await?;
        info!("Employee updated");
    }

    Ok(HttpResponse::NoContent().finish())
}
