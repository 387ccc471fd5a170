use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

pub const NO_SUCH_EMPLOYEE: &str = "No such employee";
pub const REQUEST_NOT_VALID: &str = "request not valid";

/// Every handler failure ends up here and is rendered as `{"message": ...}`.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "{}", _0)]
    NotFound(String),

    #[display(fmt = "{}", _0)]
    BadRequest(String),

    /// The request reached a handler without a transactional scope attached.
    #[display(fmt = "No database session available for this request")]
    NoScope,

    #[display(fmt = "Internal Server Error")]
    Database(sqlx::Error),
}

impl ApiError {
    pub fn no_such_employee() -> Self {
        ApiError::NotFound(NO_SUCH_EMPLOYEE.to_string())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Database(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NoScope | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Database(e) => tracing::error!(error = %e, "Database error"),
            ApiError::NoScope => tracing::error!("Handler invoked without a database scope"),
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}
