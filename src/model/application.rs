use chrono::NaiveDate;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Application {
    pub id: i64,
    pub leave_start_date: NaiveDate,
    pub leave_end_date: NaiveDate,
    pub employee_id: i64,
}

#[derive(Debug)]
pub struct NewApplication {
    pub leave_start_date: NaiveDate,
    pub leave_end_date: NaiveDate,
    pub employee_id: i64,
}

/// An application joined with the public columns of its employee.
#[derive(Debug, sqlx::FromRow)]
pub struct ApplicationDetail {
    pub id: i64,
    pub leave_start_date: NaiveDate,
    pub leave_end_date: NaiveDate,
    pub employee_id: i64,
    pub employee_first_name: String,
    pub employee_last_name: String,
    pub employee_date_of_birth: NaiveDate,
}
