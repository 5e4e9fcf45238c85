//! Flash message utilities for server-to-client communication.
//!
//! Flash messages are short-lived messages stored in cookies that get displayed
//! once by the next page render and then cleared. Used to report form errors
//! and completed actions across redirects.

use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};

/// Name of the flash cookie.
pub const FLASH_COOKIE: &str = "flash_message";

/// Flash message structure stored in cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashMessage {
    /// Message type ("error" or "success"), used as a CSS class suffix
    #[serde(rename = "type")]
    pub message_type: String,
    /// The message content to display
    pub message: String,
}

impl FlashMessage {
    /// Create an error flash message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message_type: "error".to_string(),
            message: message.into(),
        }
    }

    /// Create a success flash message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message_type: "success".to_string(),
            message: message.into(),
        }
    }

    /// Serialize to JSON for cookie storage.
    pub fn to_cookie_value(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse a cookie value. `CookieJar` hands it over already decoded; a raw
    /// header value is decoded first. Garbage yields `None`.
    pub fn from_cookie_value(value: &str) -> Option<Self> {
        serde_json::from_str(value).ok().or_else(|| {
            let decoded = urlencoding::decode(value).ok()?;
            serde_json::from_str(&decoded).ok()
        })
    }

    /// Build a Set-Cookie header value for the flash message.
    ///
    /// Cookie properties:
    /// - Path: / (accessible from any page)
    /// - SameSite: Lax (sent on navigation, not cross-site requests)
    /// - Max-Age: 60 (expires after 60 seconds as a safety net)
    pub fn to_set_cookie_header(&self) -> String {
        let cookie_value = self.to_cookie_value();
        let encoded = urlencoding::encode(&cookie_value);
        format!("{FLASH_COOKIE}={encoded}; Path=/; SameSite=Lax; Max-Age=60")
    }
}

/// Create a redirect response with a flash message cookie.
pub fn redirect_with_flash(url: &str, flash: FlashMessage) -> Response {
    let cookie_header = flash.to_set_cookie_header();

    ([(SET_COOKIE, cookie_header)], Redirect::to(url)).into_response()
}

/// Read the pending flash message, if any, and clear its cookie.
///
/// Return the jar alongside the page so the removal reaches the browser.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<FlashMessage>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };

    let flash = FlashMessage::from_cookie_value(cookie.value());
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, flash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, HeaderMap, HeaderValue, StatusCode};

    #[test]
    fn test_error_flash_message() {
        let flash = FlashMessage::error("Student number cannot be empty");
        assert_eq!(flash.message_type, "error");
        assert_eq!(flash.message, "Student number cannot be empty");
    }

    #[test]
    fn test_success_flash_message() {
        let flash = FlashMessage::success("Student created");
        assert_eq!(flash.message_type, "success");
    }

    #[test]
    fn test_to_cookie_value() {
        let flash = FlashMessage::error("Test message");
        let json = flash.to_cookie_value();
        assert!(json.contains("\"type\":\"error\""));
        assert!(json.contains("\"message\":\"Test message\""));
    }

    #[test]
    fn test_to_set_cookie_header() {
        let flash = FlashMessage::error("Test");
        let header = flash.to_set_cookie_header();
        assert!(header.starts_with("flash_message="));
        assert!(header.contains("Path=/"));
        assert!(header.contains("SameSite=Lax"));
        assert!(header.contains("Max-Age=60"));
    }

    #[test]
    fn test_from_cookie_value_decodes_header_value() {
        let flash = FlashMessage::error("Course finish date cannot be before the start date");
        let encoded = urlencoding::encode(&flash.to_cookie_value()).into_owned();

        assert_eq!(FlashMessage::from_cookie_value(&encoded), Some(flash));
        assert_eq!(FlashMessage::from_cookie_value("not json"), None);
    }

    #[test]
    fn test_redirect_with_flash_sets_cookie() {
        let response = redirect_with_flash("/students/new", FlashMessage::error("Nope"));

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/students/new");
        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("flash_message="));
    }

    #[test]
    fn test_take_flash_reads_and_clears() {
        let flash = FlashMessage::success("Teacher updated");
        let mut headers = HeaderMap::new();
        let value = format!(
            "{FLASH_COOKIE}={}",
            urlencoding::encode(&flash.to_cookie_value())
        );
        headers.insert(COOKIE, HeaderValue::from_str(&value).unwrap());
        let jar = CookieJar::from_headers(&headers);

        let (jar, taken) = take_flash(jar);

        assert_eq!(taken, Some(flash));
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[test]
    fn test_take_flash_keeps_percent_sequences_in_message() {
        let flash = FlashMessage::error("Course start date is not a valid date: 2018%41");
        let mut headers = HeaderMap::new();
        let value = format!(
            "{FLASH_COOKIE}={}",
            urlencoding::encode(&flash.to_cookie_value())
        );
        headers.insert(COOKIE, HeaderValue::from_str(&value).unwrap());

        let (_, taken) = take_flash(CookieJar::from_headers(&headers));

        assert_eq!(taken, Some(flash));
    }

    #[test]
    fn test_take_flash_without_cookie() {
        let (_, taken) = take_flash(CookieJar::new());
        assert_eq!(taken, None);
    }
}
