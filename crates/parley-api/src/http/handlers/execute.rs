//! POST /execute_code - placeholder code execution endpoint.
//!
//! Validates the request shape but delegates actual execution to the
//! client (Pyodide). Kept server-side so the route contract is stable once
//! sandboxed execution lands.

use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::http::error::AppError;

fn default_language() -> String {
    "python".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

pub async fn execute_code(Json(request): Json<ExecuteRequest>) -> Result<Json<Value>, AppError> {
    let code = request.code.as_deref().unwrap_or_default();
    if code.is_empty() {
        return Err(AppError::Validation("No code provided"));
    }
    if request.language != "python" {
        return Err(AppError::Validation(
            "Only Python execution is supported currently",
        ));
    }

    Ok(Json(json!({
        "output": "Code execution is not fully implemented server-side. Use client-side Pyodide for now."
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_code_rejected() {
        let request: ExecuteRequest = serde_json::from_str("{}").unwrap();
        let result = execute_code(Json(request)).await;
        assert!(matches!(
            result,
            Err(AppError::Validation("No code provided"))
        ));
    }

    #[tokio::test]
    async fn test_non_python_rejected() {
        let request: ExecuteRequest =
            serde_json::from_str(r#"{"code":"1+1","language":"ruby"}"#).unwrap();
        let result = execute_code(Json(request)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_python_returns_placeholder_output() {
        let request: ExecuteRequest = serde_json::from_str(r#"{"code":"print(1)"}"#).unwrap();
        let Json(value) = execute_code(Json(request)).await.unwrap();
        assert!(value["output"].as_str().unwrap().contains("Pyodide"));
    }
}
