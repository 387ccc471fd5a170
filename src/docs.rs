use crate::schema::{
    application::{
        ApplicationListResponse, ApplicationRequest, ApplicationResponse, ApplicationSearch,
    },
    employee::{EmployeeResponse, PatchEmployeeRequest},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Requests API",
        version = "0.1.0",
        description = r#"
## Leave Requests

Read and update employees, file leave applications and search them.

- **Employee**: fetch a profile, patch first/last name
- **Application**: file a leave request for an employee, search by employee id or name with offset/limit paging
- **Status**: liveness check backed by a database round-trip

Errors are returned as `{"message": "..."}`.
"#,
    ),
    paths(
        crate::api::status::status,

        crate::api::employee::get_employee,
        crate::api::employee::patch_employee,

        crate::api::application::post_application,
        crate::api::application::search_applications
    ),
    components(
        schemas(
            EmployeeResponse,
            PatchEmployeeRequest,
            ApplicationRequest,
            ApplicationResponse,
            ApplicationSearch,
            ApplicationListResponse
        )
    ),
    tags(
        (name = "Status", description = "Liveness"),
        (name = "Employee", description = "Employee APIs"),
        (name = "Application", description = "Leave application APIs"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::{RefOr, Schema};

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        assert_eq!(paths, vec!["/application", "/employee/{id}", "/status"]);

        let employee = &doc.paths.paths["/employee/{id}"];
        assert!(employee.operations.len() == 2);
    }

    #[test]
    fn test_employee_schema_fields() {
        let components = ApiDoc::openapi().components.unwrap();
        let RefOr::T(Schema::Object(employee)) = &components.schemas["EmployeeResponse"] else {
            panic!("EmployeeResponse is not an inline object schema");
        };
        let fields: Vec<&str> = employee.properties.keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["date_of_birth", "first_name", "id", "last_name"]);
    }
}
