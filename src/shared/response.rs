use serde::Serialize;

/// Success/error envelope wrapped around every response body.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, response: T) -> Self {
        Self {
            success: true,
            code: 200,
            message: message.into(),
            status: "SUCCESS",
            response: Some(response),
        }
    }

    pub fn created(message: impl Into<String>, response: T) -> Self {
        Self {
            success: true,
            code: 201,
            message: message.into(),
            status: "SUCCESS",
            response: Some(response),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: 200,
            message: message.into(),
            status: "SUCCESS",
            response: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_skips_absent_payload() {
        let body = serde_json::to_value(ApiResponse::message("cart deleted")).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["status"], "SUCCESS");
        assert!(body.get("response").is_none());
    }

    #[test]
    fn envelope_carries_payload() {
        let body = serde_json::to_value(ApiResponse::ok("ok", 42)).unwrap();
        assert_eq!(body["response"], 42);
        assert_eq!(body["code"], 200);
    }
}
