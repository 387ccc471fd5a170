use super::{FieldErrorKind, FieldErrors, employee::EmployeeResponse, object, required_date, required_integer};
use crate::model::{
    application::{Application, ApplicationDetail, NewApplication},
    employee::Employee,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

/// Returned whenever either date key is absent, whichever one it is.
pub const DATES_MISSING: &str = "leave_start_date is missing;leave_end_date is missing";

#[derive(Debug, PartialEq, Eq, ToSchema)]
pub struct ApplicationRequest {
    #[schema(example = "2021-01-01", format = "date", value_type = String)]
    pub leave_start_date: NaiveDate,
    #[schema(example = "2021-02-01", format = "date", value_type = String)]
    pub leave_end_date: NaiveDate,
    #[schema(example = 1)]
    pub employee_id: i64,
}

impl ApplicationRequest {
    pub fn validate(body: &Value) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        let Some(obj) = object(body, &mut errors) else {
            // nothing can be read out of a non-object, so every field is absent
            let mut errors = FieldErrors::default();
            for field in ["leave_start_date", "leave_end_date", "employee_id"] {
                errors.push(field, FieldErrorKind::Missing);
            }
            return Err(errors);
        };

        let leave_start_date = required_date(obj, "leave_start_date", &mut errors);
        let leave_end_date = required_date(obj, "leave_end_date", &mut errors);
        let employee_id = required_integer(obj, "employee_id", &mut errors);

        match (leave_start_date, leave_end_date, employee_id) {
            (Some(leave_start_date), Some(leave_end_date), Some(employee_id))
                if errors.is_empty() =>
            {
                Ok(Self {
                    leave_start_date,
                    leave_end_date,
                    employee_id,
                })
            }
            _ => Err(errors),
        }
    }

    /// First matching rule wins: blank start, blank end, a missing date,
    /// then every field error verbatim.
    pub fn rejection_message(errors: &FieldErrors) -> String {
        for field in ["leave_start_date", "leave_end_date"] {
            if errors.has(field, FieldErrorKind::Blank) {
                return format!("{field} cannot be blank");
            }
        }

        if errors.has("leave_start_date", FieldErrorKind::Missing)
            || errors.has("leave_end_date", FieldErrorKind::Missing)
        {
            return DATES_MISSING.to_string();
        }

        errors.to_string()
    }
}

impl From<ApplicationRequest> for NewApplication {
    fn from(request: ApplicationRequest) -> Self {
        Self {
            leave_start_date: request.leave_start_date,
            leave_end_date: request.leave_end_date,
            employee_id: request.employee_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "leave_start_date": "2021-01-01",
    "leave_end_date": "2021-02-01",
    "employee": {
        "id": 1,
        "first_name": "John",
        "last_name": "Doe",
        "date_of_birth": "1990-05-17"
    },
    "id": 1
}))]
pub struct ApplicationResponse {
    #[schema(example = "2021-01-01", format = "date", value_type = String)]
    pub leave_start_date: NaiveDate,
    #[schema(example = "2021-02-01", format = "date", value_type = String)]
    pub leave_end_date: NaiveDate,
    pub employee: EmployeeResponse,
    #[schema(example = 1)]
    pub id: i64,
}

impl ApplicationResponse {
    pub fn new(application: Application, employee: Employee) -> Self {
        Self {
            leave_start_date: application.leave_start_date,
            leave_end_date: application.leave_end_date,
            employee: employee.into(),
            id: application.id,
        }
    }
}

impl From<ApplicationDetail> for ApplicationResponse {
    fn from(row: ApplicationDetail) -> Self {
        Self {
            leave_start_date: row.leave_start_date,
            leave_end_date: row.leave_end_date,
            employee: EmployeeResponse {
                id: row.employee_id,
                first_name: row.employee_first_name,
                last_name: row.employee_last_name,
                date_of_birth: row.employee_date_of_birth,
            },
            id: row.id,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ApplicationSearch {
    #[schema(example = "John")]
    /// Employee id (all digits) or a case-insensitive name fragment
    pub search: Option<String>,
    #[schema(example = 0)]
    /// Rows to skip, defaults to 0
    pub offset: Option<u32>,
    #[schema(example = 10)]
    /// Page size, defaults to 10
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicationListResponse {
    pub applications: Vec<ApplicationResponse>,
    #[schema(example = 3)]
    pub count: i64,
    #[schema(example = 1)]
    pub limit: u32,
    #[schema(example = 0)]
    pub offset: u32,
    #[schema(example = "search=&offset=1&limit=1")]
    pub next: String,
    #[schema(example = "")]
    pub prev: String,
}
