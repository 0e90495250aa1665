use bcdev_core::BcdevError;
use rmcp::ErrorData;
use serde_json::{Value, json};
use std::fmt::Display;

// Machine-readable codes carried in `data.code`
pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

pub fn internal_error(message: impl Into<String>) -> ErrorData {
    error_with_code(INTERNAL_ERROR, message)
}

pub fn error_with_code(code: &str, message: impl Into<String>) -> ErrorData {
    ErrorData::internal_error(
        message.into(),
        Some(json!({
            "code": code
        })),
    )
}

pub fn error_with_data(code: &str, message: impl Into<String>, data: Value) -> ErrorData {
    let mut payload = json!({
        "code": code
    });
    if let Some(obj) = payload.as_object_mut() {
        obj.insert("details".to_string(), data);
    }
    ErrorData::invalid_params(message.into(), Some(payload))
}

pub fn from_core_error(error: BcdevError) -> ErrorData {
    match error {
        BcdevError::InvalidRequest { ref field, .. } => error_with_data(
            INVALID_INPUT,
            error.to_string(),
            json!({ "field": field }),
        ),
        _ => internal_error(error.to_string()),
    }
}

pub fn from_display(error: impl Display) -> ErrorData {
    internal_error(format!("{}", error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;

    #[test]
    fn test_invalid_request_maps_to_invalid_params() {
        let err = from_core_error(BcdevError::InvalidRequest {
            field: "projectPath".to_string(),
            reason: "must not be empty".to_string(),
        });
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        let data = err.data.unwrap();
        assert_eq!(data["code"], INVALID_INPUT);
        assert_eq!(data["details"]["field"], "projectPath");
    }

    #[test]
    fn test_other_errors_are_internal() {
        let err = from_core_error(BcdevError::Generic("boom".to_string()));
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(err.data.unwrap()["code"], INTERNAL_ERROR);
        assert!(err.message.contains("boom"));
    }
}
