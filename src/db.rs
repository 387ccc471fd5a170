use crate::error::ApiError;
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    body::BoxBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    error::ErrorInternalServerError,
    middleware::Next,
    web::Data,
};
use anyhow::{Context, Result};
use futures::{
    future::{Ready, ready},
    lock::{Mutex, MutexGuard},
};
use sqlx::{
    SqliteConnection, SqlitePool, Transaction,
    sqlite::{Sqlite, SqliteConnectOptions, SqlitePoolOptions},
};
use std::{str::FromStr, sync::Arc};
use tracing::{debug, warn};

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL {database_url}"))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(pool)
}

type Tx = Transaction<'static, Sqlite>;

/// Transactional unit of work bound to a single request.
///
/// `scope_middleware` opens it before the handler runs and decides its fate
/// afterwards; handlers only borrow the connection through [`Scope::lock`].
#[derive(Clone)]
pub struct Scope {
    tx: Arc<Mutex<Option<Tx>>>,
}

impl Scope {
    pub fn new(tx: Tx) -> Self {
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    pub async fn begin(pool: &SqlitePool) -> Result<Self, sqlx::Error> {
        Ok(Self::new(pool.begin().await?))
    }

    pub async fn lock(&self) -> ScopeGuard<'_> {
        ScopeGuard(self.tx.lock().await)
    }

    pub async fn commit(&self) -> Result<(), sqlx::Error> {
        match self.tx.lock().await.take() {
            Some(tx) => tx.commit().await,
            None => Ok(()),
        }
    }

    pub async fn rollback(&self) -> Result<(), sqlx::Error> {
        match self.tx.lock().await.take() {
            Some(tx) => tx.rollback().await,
            None => Ok(()),
        }
    }
}

pub struct ScopeGuard<'a>(MutexGuard<'a, Option<Tx>>);

impl ScopeGuard<'_> {
    /// The connection of the open transaction. Fails once the scope has been
    /// committed or rolled back.
    pub fn conn(&mut self) -> Result<&mut SqliteConnection, ApiError> {
        self.0.as_deref_mut().ok_or(ApiError::NoScope)
    }
}

impl FromRequest for Scope {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(req.extensions().get::<Scope>().cloned().ok_or(ApiError::NoScope))
    }
}

/// Opens a transaction per request and hands it to the handler through the
/// request extensions. Anything below 500 commits, everything else rolls back.
pub async fn scope_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let Some(pool) = req.app_data::<Data<SqlitePool>>().cloned() else {
        warn!(path = %req.path(), "No database pool configured, request has no scope");
        return next.call(req).await;
    };

    let scope = Scope::begin(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to open request scope");
        ErrorInternalServerError("Internal Server Error")
    })?;
    req.extensions_mut().insert(scope.clone());

    let res = next.call(req).await?;

    if res.status().is_server_error() {
        debug!(status = %res.status(), "Rolling back request scope");
        if let Err(e) = scope.rollback().await {
            tracing::error!(error = %e, "Failed to roll back request scope");
        }
    } else {
        scope.commit().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to commit request scope");
            ErrorInternalServerError("Internal Server Error")
        })?;
    }

    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{insert_employee, memory_pool};
    use actix_web::{
        App, HttpResponse,
        middleware::from_fn,
        test::{TestRequest, call_service, init_service},
        web,
    };

    async fn first_name(pool: &SqlitePool, id: i64) -> String {
        sqlx::query_scalar("SELECT first_name FROM employee WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    /// Renames employee 1 through the request scope, then answers with the
    /// status from the path.
    async fn rename_then(scope: Scope, status: web::Path<u16>) -> Result<HttpResponse, ApiError> {
        let mut guard = scope.lock().await;
        sqlx::query("UPDATE employee SET first_name = 'Jane' WHERE id = 1")
            .execute(guard.conn()?)
            .await?;

        match status.into_inner() {
            500 => Err(ApiError::Database(sqlx::Error::RowNotFound)),
            404 => Err(ApiError::no_such_employee()),
            _ => Ok(HttpResponse::NoContent().finish()),
        }
    }

    async fn rename_with_status(status: u16) -> (u16, String) {
        let pool = memory_pool().await;
        insert_employee(&pool, 1, "John", "Doe").await;
        let app = init_service(
            App::new().app_data(Data::new(pool.clone())).service(
                web::scope("")
                    .wrap(from_fn(scope_middleware))
                    .route("/rename/{status}", web::post().to(rename_then)),
            ),
        )
        .await;

        let req = TestRequest::post()
            .uri(&format!("/rename/{status}"))
            .to_request();
        let resp = call_service(&app, req).await;
        (resp.status().as_u16(), first_name(&pool, 1).await)
    }

    #[actix_web::test]
    async fn test_middleware_commits_success() {
        assert_eq!(rename_with_status(204).await, (204, "Jane".to_string()));
    }

    #[actix_web::test]
    async fn test_middleware_commits_client_error() {
        assert_eq!(rename_with_status(404).await, (404, "Jane".to_string()));
    }

    #[actix_web::test]
    async fn test_middleware_rolls_back_server_error() {
        assert_eq!(rename_with_status(500).await, (500, "John".to_string()));
    }

    #[actix_web::test]
    async fn test_commit_persists_writes() {
        let pool = memory_pool().await;
        insert_employee(&pool, 1, "John", "Doe").await;

        let scope = Scope::begin(&pool).await.unwrap();
        {
            let mut guard = scope.lock().await;
            sqlx::query("UPDATE employee SET first_name = 'Jane' WHERE id = 1")
                .execute(guard.conn().unwrap())
                .await
                .unwrap();
        }
        scope.commit().await.unwrap();

        assert_eq!(first_name(&pool, 1).await, "Jane");
    }

    #[actix_web::test]
    async fn test_rollback_discards_writes() {
        let pool = memory_pool().await;
        insert_employee(&pool, 1, "John", "Doe").await;

        let scope = Scope::begin(&pool).await.unwrap();
        {
            let mut guard = scope.lock().await;
            sqlx::query("UPDATE employee SET first_name = 'Jane' WHERE id = 1")
                .execute(guard.conn().unwrap())
                .await
                .unwrap();
        }
        scope.rollback().await.unwrap();

        assert_eq!(first_name(&pool, 1).await, "John");
    }

    #[actix_web::test]
    async fn test_closed_scope_has_no_connection() {
        let pool = memory_pool().await;
        let scope = Scope::begin(&pool).await.unwrap();
        scope.commit().await.unwrap();

        let mut guard = scope.lock().await;
        assert!(matches!(guard.conn(), Err(ApiError::NoScope)));
    }

    #[actix_web::test]
    async fn test_foreign_keys_enforced() {
        let pool = memory_pool().await;
        let result = sqlx::query(
            "INSERT INTO application (leave_start_date, leave_end_date, employee_id) VALUES ('2021-01-01', '2021-02-01', 42)",
        )
        .execute(&pool)
        .await;
        assert!(result.is_err());
    }
}
