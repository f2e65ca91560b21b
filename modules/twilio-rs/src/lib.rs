// Minimal Twilio REST client: outbound SMS through the 2010-04-01 Messages API.

use std::collections::HashMap;

pub mod error;
pub mod models;

pub use error::{Result, TwilioError};
pub use models::{ApiErrorBody, MessageResponse};

use reqwest::{header, Client};

const BASE_URL: &str = "https://api.twilio.com/2010-04-01";

/// Check if a string is a valid phone number (E.164 format)
fn is_phone_number(identifier: &str) -> bool {
    identifier.starts_with('+') && identifier.len() >= 10
}

#[derive(Debug, Clone)]
pub struct TwilioOptions {
    pub account_sid: String,
    pub auth_token: String,
}

#[derive(Debug, Clone)]
pub struct TwilioService {
    options: TwilioOptions,
    client: Client,
}

impl TwilioService {
    pub fn new(options: TwilioOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    /// Send a single SMS. Returns the created Message resource.
    pub async fn send_sms(&self, from: &str, to: &str, body: &str) -> Result<MessageResponse> {
        for number in [from, to] {
            if !is_phone_number(number) {
                return Err(TwilioError::InvalidNumber(number.to_string()));
            }
        }

        let url = format!(
            "{BASE_URL}/Accounts/{sid}/Messages.json",
            sid = self.options.account_sid
        );

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/x-www-form-urlencoded"),
        );

        let mut form_body: HashMap<&str, &str> = HashMap::new();
        form_body.insert("To", to);
        form_body.insert("From", from);
        form_body.insert("Body", body);

        let response = self
            .client
            .post(url)
            .basic_auth(&self.options.account_sid, Some(&self.options.auth_token))
            .headers(headers)
            .form(&form_body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text));
        }

        let message: MessageResponse = serde_json::from_str(&text)?;
        tracing::debug!(sid = %message.sid, status = ?message.status, "Twilio accepted message");
        Ok(message)
    }
}

/// Turn a non-success response body into a `TwilioError::Api`, with a hint
/// for the error codes that usually mean misconfiguration.
fn api_error(status: u16, body: &str) -> TwilioError {
    let parsed = serde_json::from_str::<ApiErrorBody>(body).ok();
    let code = parsed.as_ref().and_then(|e| e.code);
    let detail = parsed
        .and_then(|e| e.message)
        .unwrap_or_else(|| body.to_string());

    let message = match code {
        Some(20003) => format!("{detail} (check account SID and auth token)"),
        Some(21211) => format!("{detail} (invalid 'To' number)"),
        Some(21606) | Some(21659) => format!("{detail} ('From' number cannot send SMS)"),
        Some(21608) => format!("{detail} (trial accounts can only send to verified numbers)"),
        Some(21610) => format!("{detail} (recipient has unsubscribed)"),
        _ => detail,
    };

    tracing::warn!(status, code = ?code, "Twilio returned an error");
    TwilioError::Api {
        status,
        code,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_phone_number() {
        // Valid E.164 phone numbers
        assert!(is_phone_number("+1234567890"));
        assert!(is_phone_number("+15551234567"));
        assert!(is_phone_number("+44123456789"));

        // Invalid phone numbers
        assert!(!is_phone_number("1234567890")); // Missing +
        assert!(!is_phone_number("+123")); // Too short
        assert!(!is_phone_number("user@example.com"));
    }

    #[tokio::test]
    async fn send_sms_rejects_bad_numbers_before_network() {
        let service = TwilioService::new(TwilioOptions {
            account_sid: "AC123".to_string(),
            auth_token: "token".to_string(),
        });

        let err = service
            .send_sms("+15551234567", "5551234567", "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, TwilioError::InvalidNumber(n) if n == "5551234567"));
    }

    #[test]
    fn api_error_maps_known_codes() {
        let body = r#"{"code": 21608, "message": "The number is unverified.", "more_info": "https://www.twilio.com/docs/errors/21608", "status": 400}"#;
        match api_error(400, body) {
            TwilioError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 400);
                assert_eq!(code, Some(21608));
                assert!(message.contains("unverified"));
                assert!(message.contains("verified numbers"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn api_error_falls_back_to_raw_body() {
        match api_error(502, "Bad Gateway") {
            TwilioError::Api { code, message, .. } => {
                assert_eq!(code, None);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn message_response_parses() {
        let json = r#"{
            "sid": "SM1234567890abcdef1234567890abcdef",
            "status": "queued",
            "to": "+15557654321",
            "from": "+15551234567",
            "body": "hello",
            "error_code": null,
            "error_message": null
        }"#;
        let msg: MessageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(msg.sid, "SM1234567890abcdef1234567890abcdef");
        assert_eq!(msg.status.as_deref(), Some("queued"));
        assert_eq!(msg.error_code, None);
    }
}
