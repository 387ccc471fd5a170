//! Request validation and response shapes.
//!
//! Requests are read field by field out of the raw JSON body, so a handler
//! can tell an absent field from a blank one and pick its own message.

pub mod application;
pub mod employee;

use chrono::NaiveDate;
use derive_more::Display;
use serde_json::{Map, Value};
use std::fmt;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FieldErrorKind {
    #[display(fmt = "is missing")]
    Missing,
    #[display(fmt = "cannot be blank")]
    Blank,
    #[display(fmt = "must be a string")]
    NotAString,
    #[display(fmt = "must be an integer")]
    NotAnInteger,
    #[display(fmt = "is not a valid date")]
    NotADate,
    #[display(fmt = "must be a JSON object")]
    NotAnObject,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "{} {}", field, kind)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: FieldErrorKind,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, kind: FieldErrorKind) {
        self.0.push(FieldError { field, kind });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str, kind: FieldErrorKind) -> bool {
        self.0.iter().any(|e| e.field == field && e.kind == kind)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

/// The body as an object, or a `body` error when it is anything else.
fn object<'a>(body: &'a Value, errors: &mut FieldErrors) -> Option<&'a Map<String, Value>> {
    let obj = body.as_object();
    if obj.is_none() {
        errors.push("body", FieldErrorKind::NotAnObject);
    }
    obj
}

/// Absent and null both mean "leave unchanged".
fn optional_string(
    obj: &Map<String, Value>,
    field: &'static str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => {
            errors.push(field, FieldErrorKind::Blank);
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(field, FieldErrorKind::NotAString);
            None
        }
    }
}

fn required_date(
    obj: &Map<String, Value>,
    field: &'static str,
    errors: &mut FieldErrors,
) -> Option<NaiveDate> {
    match obj.get(field) {
        None => {
            errors.push(field, FieldErrorKind::Missing);
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            errors.push(field, FieldErrorKind::Blank);
            None
        }
        Some(Value::String(s)) => match NaiveDate::parse_from_str(s, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(field, FieldErrorKind::NotADate);
                None
            }
        },
        Some(_) => {
            errors.push(field, FieldErrorKind::NotADate);
            None
        }
    }
}

fn required_integer(
    obj: &Map<String, Value>,
    field: &'static str,
    errors: &mut FieldErrors,
) -> Option<i64> {
    match obj.get(field) {
        None | Some(Value::Null) => {
            errors.push(field, FieldErrorKind::Missing);
            None
        }
        Some(Value::Number(n)) => {
            let value = n.as_i64();
            if value.is_none() {
                errors.push(field, FieldErrorKind::NotAnInteger);
            }
            value
        }
        Some(_) => {
            errors.push(field, FieldErrorKind::NotAnInteger);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_errors_join_with_semicolon() {
        let mut errors = FieldErrors::default();
        errors.push("leave_start_date", FieldErrorKind::Missing);
        errors.push("employee_id", FieldErrorKind::NotAnInteger);
        assert_eq!(
            errors.to_string(),
            "leave_start_date is missing;employee_id must be an integer"
        );
    }

    #[test]
    fn test_optional_string() {
        let body = json!({"a": "x", "b": "", "c": null, "d": 3});
        let obj = body.as_object().unwrap();
        let mut errors = FieldErrors::default();

        assert_eq!(optional_string(obj, "a", &mut errors), Some("x".into()));
        assert_eq!(optional_string(obj, "b", &mut errors), None);
        assert_eq!(optional_string(obj, "c", &mut errors), None);
        assert_eq!(optional_string(obj, "d", &mut errors), None);
        assert_eq!(optional_string(obj, "e", &mut errors), None);

        assert!(errors.has("b", FieldErrorKind::Blank));
        assert!(errors.has("d", FieldErrorKind::NotAString));
        assert_eq!(errors.to_string(), "b cannot be blank;d must be a string");
    }

    #[test]
    fn test_required_date() {
        let body = json!({"ok": "2021-01-31", "bad": "2021-02-31", "blank": "", "num": 5});
        let obj = body.as_object().unwrap();
        let mut errors = FieldErrors::default();

        assert_eq!(
            required_date(obj, "ok", &mut errors),
            NaiveDate::from_ymd_opt(2021, 1, 31)
        );
        assert_eq!(required_date(obj, "bad", &mut errors), None);
        assert_eq!(required_date(obj, "blank", &mut errors), None);
        assert_eq!(required_date(obj, "num", &mut errors), None);
        assert_eq!(required_date(obj, "absent", &mut errors), None);

        assert!(errors.has("bad", FieldErrorKind::NotADate));
        assert!(errors.has("blank", FieldErrorKind::Blank));
        assert!(errors.has("num", FieldErrorKind::NotADate));
        assert!(errors.has("absent", FieldErrorKind::Missing));
    }

    #[test]
    fn test_required_integer() {
        let body = json!({"ok": 10, "float": 1.5, "text": "10", "null": null});
        let obj = body.as_object().unwrap();
        let mut errors = FieldErrors::default();

        assert_eq!(required_integer(obj, "ok", &mut errors), Some(10));
        assert_eq!(required_integer(obj, "float", &mut errors), None);
        assert_eq!(required_integer(obj, "text", &mut errors), None);
        assert_eq!(required_integer(obj, "null", &mut errors), None);

        assert!(errors.has("float", FieldErrorKind::NotAnInteger));
        assert!(errors.has("text", FieldErrorKind::NotAnInteger));
        assert!(errors.has("null", FieldErrorKind::Missing));
    }

    #[test]
    fn test_object() {
        let mut errors = FieldErrors::default();
        assert!(object(&json!({}), &mut errors).is_some());
        assert!(errors.is_empty());
        assert!(object(&json!([1, 2]), &mut errors).is_none());
        assert!(errors.has("body", FieldErrorKind::NotAnObject));
    }
}
