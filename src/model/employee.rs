use chrono::NaiveDate;

/// Row of the `employee` table. Not serializable: responses go through
/// `EmployeeResponse`, which leaves `secret` out.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub secret: String,
}
