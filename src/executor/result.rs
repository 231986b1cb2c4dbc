//! Raw engine response

/// Engine response passed through to the caller unmodified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status returned by the engine
    pub status: u16,
    /// Response body, untouched
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body as JSON
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(RawResponse::new(200, "{}").is_success());
        assert!(!RawResponse::new(404, "{}").is_success());
    }

    #[test]
    fn test_body_untouched() {
        let body = r#"{"hits":{"total":{"value":3}},  "took":1}"#;
        let response = RawResponse::new(200, body);
        assert_eq!(response.body, body);
        assert_eq!(response.json().unwrap()["hits"]["total"]["value"], 3);
    }
}
