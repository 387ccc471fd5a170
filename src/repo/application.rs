use crate::{
    model::application::{Application, ApplicationDetail, NewApplication},
    search::ApplicationFilter,
};
use sqlx::SqliteConnection;
use tracing::debug;

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    I64(i64),
    Str(&'a str),
}

fn where_clause(filter: &ApplicationFilter) -> (&'static str, Vec<FilterValue<'_>>) {
    match filter {
        ApplicationFilter::All => ("", Vec::new()),
        ApplicationFilter::EmployeeId(id) => {
            (" WHERE a.employee_id = ?", vec![FilterValue::I64(*id)])
        }
        // SQLite lower() folds ASCII letters only
        ApplicationFilter::Name(name) => (
            " WHERE instr(lower(e.first_name), lower(?)) > 0 OR instr(lower(e.last_name), lower(?)) > 0",
            vec![FilterValue::Str(name), FilterValue::Str(name)],
        ),
    }
}

pub async fn insert(
    conn: &mut SqliteConnection,
    application: NewApplication,
) -> Result<Application, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO application (leave_start_date, leave_end_date, employee_id)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(application.leave_start_date)
    .bind(application.leave_end_date)
    .bind(application.employee_id)
    .execute(conn)
    .await?;

    Ok(Application {
        id: result.last_insert_rowid(),
        leave_start_date: application.leave_start_date,
        leave_end_date: application.leave_end_date,
        employee_id: application.employee_id,
    })
}

/// Stores an application unless one with the same employee and dates exists.
pub async fn insert_if_absent(
    conn: &mut SqliteConnection,
    application: NewApplication,
) -> Result<Option<Application>, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO application (leave_start_date, leave_end_date, employee_id)
        SELECT ?, ?, ?
        WHERE NOT EXISTS (
            SELECT 1 FROM application
            WHERE employee_id = ? AND leave_start_date = ? AND leave_end_date = ?
        )
        "#,
    )
    .bind(application.leave_start_date)
    .bind(application.leave_end_date)
    .bind(application.employee_id)
    .bind(application.employee_id)
    .bind(application.leave_start_date)
    .bind(application.leave_end_date)
    .execute(conn)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    Ok(Some(Application {
        id: result.last_insert_rowid(),
        leave_start_date: application.leave_start_date,
        leave_end_date: application.leave_end_date,
        employee_id: application.employee_id,
    }))
}

pub async fn count(
    conn: &mut SqliteConnection,
    filter: &ApplicationFilter,
) -> Result<i64, sqlx::Error> {
    let (where_sql, args) = where_clause(filter);
    let count_sql = format!(
        "SELECT COUNT(*) FROM application a JOIN employee e ON e.id = a.employee_id{}",
        where_sql
    );
    debug!(sql = %count_sql, "Counting applications");

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in args {
        count_q = match arg {
            FilterValue::I64(v) => count_q.bind(v),
            FilterValue::Str(s) => count_q.bind(s),
        };
    }

    count_q.fetch_one(conn).await
}

/// Applications matching `filter`, ascending by id, sliced by offset/limit.
pub async fn search(
    conn: &mut SqliteConnection,
    filter: &ApplicationFilter,
    offset: u32,
    limit: u32,
) -> Result<Vec<ApplicationDetail>, sqlx::Error> {
    let (where_sql, args) = where_clause(filter);
    let data_sql = format!(
        r#"
        SELECT
            a.id,
            a.leave_start_date,
            a.leave_end_date,
            a.employee_id,
            e.first_name AS employee_first_name,
            e.last_name AS employee_last_name,
            e.date_of_birth AS employee_date_of_birth
        FROM application a
        JOIN employee e ON e.id = a.employee_id
        {}
        ORDER BY a.id ASC
        LIMIT ? OFFSET ?
        "#,
        where_sql
    );
    debug!(sql = %data_sql, offset, limit, "Fetching applications");

    let mut data_q = sqlx::query_as::<_, ApplicationDetail>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::I64(v) => data_q.bind(v),
            FilterValue::Str(s) => data_q.bind(s),
        };
    }

    data_q
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(conn)
        .await
}
