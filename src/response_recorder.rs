use ::bytes::BytesMut;
use ::http::HeaderMap;
use ::http::HeaderName;
use ::http::HeaderValue;
use ::http::StatusCode;
use ::http::response::Parts;
use ::http::Response;

///
/// The response sink a [`Handler`](crate::Handler) writes into.
///
/// It starts as an empty `200 OK` response.
/// The status can be set once, and is locked in by the first write to the body,
/// matching how a real connection sends the status line before any content.
///
#[derive(Debug, Default)]
pub struct ResponseRecorder {
    status_code: Option<StatusCode>,
    is_status_sent: bool,
    headers: HeaderMap,
    body: BytesMut,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status code of the response.
    ///
    /// Calls after the status was already set, or after the body was written to, are ignored.
    pub fn set_status(&mut self, status_code: StatusCode) {
        if self.is_status_sent {
            ::tracing::warn!(
                ignored = %status_code,
                status = %self.status_code(),
                "superfluous set_status call on ResponseRecorder"
            );
            return;
        }

        self.status_code = Some(status_code);
        self.is_status_sent = true;
    }

    /// Returns the status code so far, which is 200 if none was set.
    pub fn status_code(&self) -> StatusCode {
        self.status_code.unwrap_or(StatusCode::OK)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Sets a header, replacing any existing headers of the same name.
    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Appends the bytes given onto the body.
    pub fn write(&mut self, bytes: &[u8]) {
        self.is_status_sent = true;
        self.body.extend_from_slice(bytes);
    }

    /// Appends the text given onto the body.
    pub fn write_str(&mut self, text: &str) {
        self.write(text.as_bytes());
    }

    /// The body written so far.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub(crate) fn into_parts(self) -> (Parts, bytes::Bytes) {
        let mut response = Response::new(());
        *response.status_mut() = self.status_code();
        *response.headers_mut() = self.headers;

        let (parts, ()) = response.into_parts();
        (parts, self.body.freeze())
    }
}
