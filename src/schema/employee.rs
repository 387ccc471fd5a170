use super::{FieldErrorKind, FieldErrors, object, optional_string};
use crate::{error::REQUEST_NOT_VALID, model::employee::Employee};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Public view of an employee: id, names and date of birth.
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "first_name": "John",
    "last_name": "Doe",
    "date_of_birth": "1990-05-17"
}))]
pub struct EmployeeResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "1990-05-17", format = "date", value_type = String)]
    pub date_of_birth: NaiveDate,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            date_of_birth: employee.date_of_birth,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq, ToSchema)]
pub struct PatchEmployeeRequest {
    #[schema(example = "Jane")]
    pub first_name: Option<String>,
    #[schema(example = "Smith")]
    pub last_name: Option<String>,
}

impl PatchEmployeeRequest {
    pub fn validate(body: &Value) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        let request = object(body, &mut errors).map(|obj| Self {
            first_name: optional_string(obj, "first_name", &mut errors),
            last_name: optional_string(obj, "last_name", &mut errors),
        });

        match request {
            Some(request) if errors.is_empty() => Ok(request),
            _ => Err(errors),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none()
    }

    /// Blank names get their own message; anything else is generic.
    pub fn rejection_message(errors: &FieldErrors) -> String {
        for field in ["first_name", "last_name"] {
            if errors.has(field, FieldErrorKind::Blank) {
                return format!("{field} cannot be blank");
            }
        }
        REQUEST_NOT_VALID.to_string()
    }
}
