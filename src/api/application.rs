use crate::{
    db::Scope,
    error::ApiError,
    repo,
    schema::application::{
        ApplicationListResponse, ApplicationRequest, ApplicationResponse, ApplicationSearch,
    },
    search::{ApplicationFilter, DEFAULT_LIMIT, DEFAULT_OFFSET, page_links},
};
use actix_web::{HttpResponse, Responder, web};
use serde_json::Value;
use tracing::{debug, info, instrument};

/* =========================
Create leave application
========================= */
/// Returns 200 with the stored application, including the nested employee
#[utoipa::path(
    post,
    path = "/application",
    request_body(
        content = ApplicationRequest,
        description = "Leave application payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Application created", body = ApplicationResponse),
        (status = 400, description = "Invalid payload", body = Object, example = json!({
            "message": "leave_start_date is missing;leave_end_date is missing"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "No such employee"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Application"
)]
#[instrument(name = "post_application", skip(scope, body))]
pub async fn post_application(
    scope: Scope,
    body: web::Json<Value>,
) -> Result<impl Responder, ApiError> {
    let request = ApplicationRequest::validate(&body).map_err(|errors| {
        debug!(%errors, "Rejected application");
        ApiError::BadRequest(ApplicationRequest::rejection_message(&errors))
    })?;

    let mut guard = scope.lock().await;
    let conn = guard.conn()?;

    let employee = repo::employee::find_by_id(&mut *conn, request.employee_id)
        .await?
        .ok_or_else(ApiError::no_such_employee)?;

    let application = repo::application::insert(&mut *conn, request.into()).await?;
    info!(
        application_id = application.id,
        employee_id = employee.id,
        "Application created"
    );

    Ok(HttpResponse::Ok().json(ApplicationResponse::new(application, employee)))
}

/* =========================
Search leave applications
========================= */
/// Digits match the employee id exactly, anything else matches employee names
#[utoipa::path(
    get,
    path = "/application",
    params(ApplicationSearch),
    responses(
        (status = 200, description = "Paginated application list", body = ApplicationListResponse)
    ),
    tag = "Application"
)]
pub async fn search_applications(
    scope: Scope,
    query: web::Query<ApplicationSearch>,
) -> Result<impl Responder, ApiError> {
    let ApplicationSearch {
        search,
        offset,
        limit,
    } = query.into_inner();
    let search = search.unwrap_or_default();
    let offset = offset.unwrap_or(DEFAULT_OFFSET);
    let limit = limit.unwrap_or(DEFAULT_LIMIT);

    let filter = ApplicationFilter::from_search(&search);
    debug!(?filter, offset, limit, "Searching applications");

    let mut guard = scope.lock().await;
    let conn = guard.conn()?;

    let count = repo::application::count(&mut *conn, &filter).await?;
    let rows = repo::application::search(&mut *conn, &filter, offset, limit).await?;
    let links = page_links(&search, offset, limit, count);

    Ok(HttpResponse::Ok().json(ApplicationListResponse {
        applications: rows.into_iter().map(ApplicationResponse::from).collect(),
        count,
        limit,
        offset,
        next: links.next,
        prev: links.prev,
    }))
}
