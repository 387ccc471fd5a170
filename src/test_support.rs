//! Fixtures shared by the in-module tests.

use crate::{db::MIGRATOR, db::scope_middleware, routes};
use actix_web::{
    App, Error,
    body::BoxBody,
    dev::{Service, ServiceResponse},
    middleware::from_fn,
    test,
    web::{self, Data},
};
use actix_http::Request;
use chrono::NaiveDate;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;

/// Single-connection in-memory database with the migrations applied. The
/// connection is never recycled, otherwise the data would vanish with it.
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();
    pool
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub async fn insert_employee(pool: &SqlitePool, id: i64, first_name: &str, last_name: &str) {
    sqlx::query(
        "INSERT INTO employee (id, first_name, last_name, date_of_birth, secret) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(first_name)
    .bind(last_name)
    .bind(date("1990-05-17"))
    .bind(format!("secret-{id}"))
    .execute(pool)
    .await
    .unwrap();
}

/// The API as served, minus rate limiting (test requests carry no peer address).
pub async fn app(
    pool: SqlitePool,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new().app_data(Data::new(pool)).service(
            web::scope("")
                .wrap(from_fn(scope_middleware))
                .configure(routes::configure),
        ),
    )
    .await
}
