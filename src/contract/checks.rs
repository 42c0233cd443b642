use serde_json::Value;
use std::fmt;

use super::probe::ProbeResponse;

/// What the response body of a check must look like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyExpectation {
    /// Body is not inspected
    Any,
    /// Body is a JSON object containing the key (any value)
    HasKey(&'static str),
    /// Body is a JSON object with `success == true` and a `data` key
    SuccessEnvelope,
}

/// A single GET request and the status and body shape it must produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointCheck {
    pub name: &'static str,
    pub path: &'static str,
    pub expected_status: u16,
    pub body: BodyExpectation,
}

impl EndpointCheck {
    pub const fn new(
        name: &'static str,
        path: &'static str,
        expected_status: u16,
        body: BodyExpectation,
    ) -> Self {
        Self {
            name,
            path,
            expected_status,
            body,
        }
    }

    /// Compare an observed response against this check
    pub fn evaluate(&self, response: &ProbeResponse) -> Result<(), String> {
        if response.status != self.expected_status {
            return Err(format!(
                "expected status {} but got {}",
                self.expected_status, response.status
            ));
        }

        match self.body {
            BodyExpectation::Any => Ok(()),
            BodyExpectation::HasKey(key) => {
                let obj = json_object(response)?;
                if obj.contains_key(key) {
                    Ok(())
                } else {
                    Err(format!("response body has no \"{}\" field", key))
                }
            }
            BodyExpectation::SuccessEnvelope => {
                let obj = json_object(response)?;
                match obj.get("success") {
                    Some(Value::Bool(true)) => {}
                    Some(other) => return Err(format!("expected \"success\": true but got {}", other)),
                    None => return Err("response body has no \"success\" field".to_string()),
                }
                if obj.contains_key("data") {
                    Ok(())
                } else {
                    Err("response body has no \"data\" field".to_string())
                }
            }
        }
    }
}

fn json_object(response: &ProbeResponse) -> Result<&serde_json::Map<String, Value>, String> {
    match &response.body {
        Some(Value::Object(obj)) => Ok(obj),
        Some(other) => Err(format!("expected a JSON object but got {}", json_kind(other))),
        None => Err("response body is not JSON".to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl fmt::Display for EndpointCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (GET {} -> {})", self.name, self.path, self.expected_status)
    }
}

/// The HTTP contract the service must honour
pub fn contract_checks() -> Vec<EndpointCheck> {
    vec![
        EndpointCheck::new("health check", "/health", 200, BodyExpectation::HasKey("status")),
        EndpointCheck::new(
            "translation languages",
            "/translation/languages",
            200,
            BodyExpectation::SuccessEnvelope,
        ),
        EndpointCheck::new(
            "chatbot categories",
            "/chatbot/categories",
            200,
            BodyExpectation::SuccessEnvelope,
        ),
        EndpointCheck::new("invalid endpoint", "/invalid-endpoint", 404, BodyExpectation::Any),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, body: Option<Value>) -> ProbeResponse {
        ProbeResponse { status, body }
    }

    #[test]
    fn contract_has_four_routes() {
        let paths: Vec<_> = contract_checks().iter().map(|c| c.path).collect();
        assert_eq!(
            paths,
            vec!["/health", "/translation/languages", "/chatbot/categories", "/invalid-endpoint"]
        );
    }

    #[test]
    fn health_accepts_any_status_value() {
        let check = &contract_checks()[0];
        assert!(check.evaluate(&response(200, Some(json!({"status": "ok"})))).is_ok());
        assert!(check.evaluate(&response(200, Some(json!({"status": {"db": "up"}})))).is_ok());
        assert!(check.evaluate(&response(200, Some(json!({"state": "ok"})))).is_err());
        assert!(check.evaluate(&response(503, Some(json!({"status": "down"})))).is_err());
    }

    #[test]
    fn envelope_requires_true_and_data() {
        let check = &contract_checks()[1];
        assert!(check
            .evaluate(&response(200, Some(json!({"success": true, "data": null}))))
            .is_ok());

        let err = check
            .evaluate(&response(200, Some(json!({"success": "true", "data": []}))))
            .unwrap_err();
        assert!(err.contains("\"success\": true"));

        let err = check.evaluate(&response(200, Some(json!({"success": true})))).unwrap_err();
        assert!(err.contains("data"));

        let err = check.evaluate(&response(200, Some(json!([1, 2])))).unwrap_err();
        assert!(err.contains("an array"));

        assert!(check.evaluate(&response(200, None)).is_err());
    }

    #[test]
    fn not_found_ignores_body() {
        let check = &contract_checks()[3];
        assert!(check.evaluate(&response(404, None)).is_ok());
        let err = check.evaluate(&response(200, Some(json!({})))).unwrap_err();
        assert_eq!(err, "expected status 404 but got 200");
    }
}
