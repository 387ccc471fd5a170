use crate::model::employee::Employee;
use sqlx::SqliteConnection;

pub async fn find_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, first_name, last_name, date_of_birth, secret
        FROM employee
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await
}

/// Writes only the names that are `Some`. Returns the number of rows touched.
pub async fn update_names(
    conn: &mut SqliteConnection,
    id: i64,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE employee
        SET first_name = COALESCE(?, first_name),
            last_name = COALESCE(?, last_name)
        WHERE id = ?
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

/// Stores an employee under its own id, keeping any existing row with that
/// id. Returns whether a row was written.
pub async fn insert_if_absent(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT OR IGNORE INTO employee (id, first_name, last_name, date_of_birth, secret)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(employee.id)
    .bind(&employee.first_name)
    .bind(&employee.last_name)
    .bind(employee.date_of_birth)
    .bind(&employee.secret)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() == 1)
}
