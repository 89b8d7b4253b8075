use ::http::Method;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Picks the content type for a body, when none has been set explicitly.
///
/// Only requests which usually carry a body (`POST`, `PUT`, and `PATCH`) get one.
pub fn infer_content_type(method: &Method, body: &[u8]) -> Option<&'static str> {
    if method != Method::POST && method != Method::PUT && method != Method::PATCH {
        return None;
    }

    if is_json_content(body) {
        Some(JSON_CONTENT_TYPE)
    } else {
        Some(FORM_CONTENT_TYPE)
    }
}

/// Bodies wrapped in `{ }` or `[ ]`, ignoring surrounding whitespace, are treated as Json.
pub fn is_json_content(body: &[u8]) -> bool {
    let trimmed = body.trim_ascii();

    (trimmed.starts_with(b"{") && trimmed.ends_with(b"}"))
        || (trimmed.starts_with(b"[") && trimmed.ends_with(b"]"))
}
