use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Envelope shared by every feature endpoint: `{ success, data, error? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_envelope_shape() {
        let value = serde_json::to_value(ApiResponse::ok(json!({"languages": []}))).unwrap();
        assert_eq!(value, json!({"success": true, "data": {"languages": []}}));
    }

    #[test]
    fn error_envelope_keeps_data_key() {
        let value = serde_json::to_value(ApiResponse::<()>::error("boom")).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("data").is_some());
        assert_eq!(value["error"], "boom");
    }
}
