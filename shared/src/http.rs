//! API Gateway proxy types and response helpers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// API Gateway proxy request (the fields this service reads).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiGatewayRequest {
    pub http_method: String,
    pub query_string_parameters: Option<HashMap<String, String>>,
    pub body: Option<String>,
}

/// API Gateway proxy response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ApiGatewayResponse {
    fn new(status_code: u16, body: String, content_type: &str, cors: Option<&str>) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), content_type.to_string());
        if let Some(origin) = cors {
            headers.insert("access-control-allow-origin".to_string(), origin.to_string());
        }
        Self {
            status_code,
            headers,
            body,
            is_base64_encoded: false,
        }
    }

    /// 200 response with a JSON body and the configured cross-origin header.
    pub fn json<T: Serialize>(data: &T, cors: Option<&str>) -> Result<Self> {
        let body = serde_json::to_string(data)?;
        Ok(Self::new(200, body, "application/json", cors))
    }

    /// 200 response carrying base64-encoded bytes, flagged so the
    /// transport decodes them before delivery.
    pub fn binary(bytes: &[u8], content_type: &str, cors: Option<&str>) -> Self {
        let body = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, bytes);
        let mut response = Self::new(200, body, content_type, cors);
        response.is_base64_encoded = true;
        response
    }

    /// Failure response whose body is the status line text, no extra headers.
    pub fn status_text(status_code: u16) -> Self {
        Self {
            status_code,
            headers: HashMap::new(),
            body: reason_phrase(status_code).to_string(),
            is_base64_encoded: false,
        }
    }
}

/// Canonical reason phrase for the status codes this service emits.
fn reason_phrase(status_code: u16) -> &'static str {
    match status_code {
        400 => "Bad Request",
        405 => "Method Not Allowed",
        _ => "Internal Server Error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_bodies() {
        assert_eq!(ApiGatewayResponse::status_text(400).body, "Bad Request");
        assert_eq!(ApiGatewayResponse::status_text(405).body, "Method Not Allowed");
        assert_eq!(ApiGatewayResponse::status_text(500).body, "Internal Server Error");
        assert!(ApiGatewayResponse::status_text(400).headers.is_empty());
    }

    #[test]
    fn test_binary_response_round_trips() {
        let payload: Vec<u8> = (0u8..=255).collect();
        let response = ApiGatewayResponse::binary(&payload, "image/png", Some("*"));

        assert_eq!(response.status_code, 200);
        assert!(response.is_base64_encoded);
        assert_eq!(response.headers["content-type"], "image/png");

        let decoded =
            base64::Engine::decode(&base64::engine::general_purpose::STANDARD, &response.body)
                .unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_json_response_headers_follow_cors_config() {
        let with_cors =
            ApiGatewayResponse::json(&serde_json::json!({"ok": true}), Some("*")).unwrap();
        assert_eq!(with_cors.headers["access-control-allow-origin"], "*");

        let without_cors = ApiGatewayResponse::json(&serde_json::json!({"ok": true}), None).unwrap();
        assert!(!without_cors.headers.contains_key("access-control-allow-origin"));
    }
}
