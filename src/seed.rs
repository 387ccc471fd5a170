use crate::{
    model::{application::NewApplication, employee::Employee},
    repo,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::info;

/// (id, first_name, last_name, date_of_birth)
const EMPLOYEES: [(i64, &str, &str, (i32, u32, u32)); 3] = [
    (1, "John", "Doe", (1985, 4, 12)),
    (2, "Jane", "Roe", (1990, 9, 3)),
    (10, "Peter", "Parker", (1995, 8, 10)),
];

/// (employee_id, leave_start_date, leave_end_date)
const APPLICATIONS: [(i64, (i32, u32, u32), (i32, u32, u32)); 3] = [
    (1, (2021, 1, 1), (2021, 2, 1)),
    (2, (2021, 2, 1), (2021, 3, 1)),
    (10, (2021, 3, 1), (2021, 4, 1)),
];

fn ymd((y, m, d): (i32, u32, u32)) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).with_context(|| format!("invalid seed date {y}-{m}-{d}"))
}

/// Demo data: employees 1, 2 and 10 and one application each, written in a
/// single transaction. Rows already present are kept, so seeding again on the
/// next boot adds nothing.
pub async fn seed_data(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await.context("Failed to open seed transaction")?;

    for (id, first_name, last_name, dob) in EMPLOYEES {
        let employee = Employee {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            date_of_birth: ymd(dob)?,
            secret: format!("seed-secret-{id}"),
        };
        let created = repo::employee::insert_if_absent(&mut tx, &employee)
            .await
            .with_context(|| format!("Failed to seed employee {id}"))?;
        if created {
            info!(employee_id = id, "Seeded employee");
        }
    }

    for (employee_id, start, end) in APPLICATIONS {
        let application = repo::application::insert_if_absent(
            &mut tx,
            NewApplication {
                leave_start_date: ymd(start)?,
                leave_end_date: ymd(end)?,
                employee_id,
            },
        )
        .await
        .with_context(|| format!("Failed to seed application for employee {employee_id}"))?;

        if let Some(application) = application {
            info!(
                application_id = application.id,
                employee_id, "Seeded application"
            );
        }
    }

    tx.commit().await.context("Failed to commit seed data")?;
    Ok(())
}
