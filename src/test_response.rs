use ::anyhow::Context;
use ::bytes::Bytes;
use ::cookie::Cookie;
use ::cookie::CookieJar;
use ::http::header;
use ::http::header::AsHeaderName;
use ::http::header::HeaderName;
use ::http::response::Parts;
use ::http::HeaderMap;
use ::http::HeaderValue;
use ::http::StatusCode;
use ::serde::de::DeserializeOwned;
use ::std::fmt::Debug;
use ::std::fmt::Display;

#[cfg(feature = "pretty-assertions")]
use ::pretty_assertions::assert_eq;
#[cfg(feature = "pretty-assertions")]
use ::pretty_assertions::assert_ne;

use crate::internals::DebugBody;

///
/// The `TestResponse` is what the handler wrote, when running a [`RequestConfig`](crate::RequestConfig).
/// It is passed to the callback, alongside the [`TestRequest`](crate::TestRequest) that was sent.
///
/// ```rust
/// use ::axum_fight::RequestConfig;
/// use ::axum_fight::ResponseRecorder;
/// use ::axum_fight::TestRequest;
///
/// let handler = |_request: &TestRequest, recorder: &mut ResponseRecorder| {
///     recorder.write_str("hello!");
/// };
///
/// RequestConfig::new()
///     .get("/test")
///     .run(handler, |response, _request| {
///         // These assertions will panic if they are not fullfilled by the response.
///         response.assert_status_ok();
///         response.assert_text("hello!");
///     });
/// ```
///
/// # Extracting Response
///
/// The functions [`TestResponse::json()`](crate::TestResponse::json()), [`TestResponse::text()`](crate::TestResponse::text()), and [`TestResponse::form()`](crate::TestResponse::form()),
/// allow you to extract the underlying response content in different formats.
///
/// [`TestResponse::as_bytes()`](crate::TestResponse::as_bytes()) and [`TestResponse::into_bytes()`](crate::TestResponse::into_bytes()) offer the
/// underlying raw bytes, to allow custom decoding.
///
#[derive(Clone, Debug)]
pub struct TestResponse {
    request_format: String,
    headers: HeaderMap<HeaderValue>,
    status_code: StatusCode,
    response_body: Bytes,
}

impl TestResponse {
    pub(crate) fn new(request_format: String, parts: Parts, response_body: Bytes) -> Self {
        Self {
            request_format,
            headers: parts.headers,
            status_code: parts.status,
            response_body,
        }
    }

    /// Returns the underlying response, extracted as a UTF-8 string.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(self.as_bytes()).to_string()
    }

    /// Deserializes the response, as JSON, into the type given.
    ///
    /// If deserialization fails then this will panic.
    #[must_use]
    pub fn json<T>(&self) -> T
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice::<T>(self.as_bytes())
            .with_context(|| {
                format!(
                    "Deserializing response from JSON for request {}",
                    self.request_format
                )
            })
            .unwrap()
    }

    /// Deserializes the response, as an urlencoded Form, into the type given.
    ///
    /// If deserialization fails then this will panic.
    #[must_use]
    pub fn form<T>(&self) -> T
    where
        T: DeserializeOwned,
    {
        serde_urlencoded::from_bytes::<T>(self.as_bytes())
            .with_context(|| {
                format!(
                    "Deserializing response from Form for request {}",
                    self.request_format
                )
            })
            .unwrap()
    }

    /// Returns the raw underlying response as `Bytes`.
    #[must_use]
    pub fn as_bytes(&self) -> &Bytes {
        &self.response_body
    }

    /// Consumes this returning the underlying `Bytes`
    /// in the response.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.response_body
    }

    /// The status_code of the response.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    /// The method and path of the request that produced this response,
    /// such as `GET /users?page=2`.
    #[must_use]
    pub fn request_format(&self) -> &str {
        &self.request_format
    }

    /// Finds a header with the given name.
    /// If there are multiple headers with the same name,
    /// then only the first [`http::HeaderValue`] will be returned.
    ///
    /// `None` is returned when no header was found.
    #[must_use]
    pub fn maybe_header<N>(&self, header_name: N) -> Option<HeaderValue>
    where
        N: AsHeaderName,
    {
        self.headers.get(header_name).map(|h| h.to_owned())
    }

    /// Returns the headers returned from the response.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap<HeaderValue> {
        &self.headers
    }

    /// Returns the content type of the response, if it has one that is valid text.
    #[must_use]
    pub fn maybe_content_type(&self) -> Option<String> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string())
    }

    /// Finds a header with the given name.
    /// If there are multiple headers with the same name,
    /// then only the first will be returned.
    ///
    /// If no header is found, then this will panic.
    #[must_use]
    pub fn header<N>(&self, header_name: N) -> HeaderValue
    where
        N: AsHeaderName + Display + Clone,
    {
        let debug_header = header_name.clone();
        self.headers
            .get(header_name)
            .map(|h| h.to_owned())
            .with_context(|| {
                format!(
                    "Cannot find header {} for response {}",
                    debug_header, self.request_format
                )
            })
            .unwrap()
    }

    /// Iterates over all of the headers contained in the response.
    pub fn iter_headers(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.headers.iter()
    }

    /// Iterates over all of the headers for a specific name, contained in the response.
    pub fn iter_headers_by_name<N>(&self, header_name: N) -> impl Iterator<Item = &HeaderValue>
    where
        N: AsHeaderName,
    {
        self.headers.get_all(header_name).iter()
    }

    /// Finds a [`Cookie`] set by the response, with the given name.
    /// If there are multiple matching cookies,
    /// then only the first will be returned.
    ///
    /// `None` is returned if no Cookie is found.
    #[must_use]
    pub fn maybe_cookie(&self, cookie_name: &str) -> Option<Cookie<'static>> {
        self.iter_cookies()
            .find(|cookie| cookie.name() == cookie_name)
            .map(Cookie::into_owned)
    }

    /// Finds a [`Cookie`] set by the response, with the given name.
    ///
    /// If no `Cookie` is found, then this will panic.
    #[must_use]
    pub fn cookie(&self, cookie_name: &str) -> Cookie<'static> {
        self.maybe_cookie(cookie_name)
            .with_context(|| {
                format!(
                    "Cannot find cookie {} for response {}",
                    cookie_name, self.request_format
                )
            })
            .unwrap()
    }

    /// Returns all of the cookies set by the response,
    /// within a [`cookie::CookieJar`] object.
    #[must_use]
    pub fn cookies(&self) -> CookieJar {
        let mut cookies = CookieJar::new();

        for cookie in self.iter_cookies() {
            cookies.add(cookie.into_owned());
        }

        cookies
    }

    /// Iterate over all of the cookies in the response.
    ///
    /// `Set-Cookie` headers which cannot be parsed are skipped.
    pub fn iter_cookies(&self) -> impl Iterator<Item = Cookie<'_>> {
        self.iter_headers_by_name(header::SET_COOKIE)
            .filter_map(|header| header.to_str().ok())
            .filter_map(|header_str| Cookie::parse(header_str).ok())
    }

    /// This performs an assertion comparing the whole body of the response,
    /// against the text provided.
    #[track_caller]
    pub fn assert_text<C>(&self, other: C)
    where
        C: AsRef<str>,
    {
        let other_contents = other.as_ref();
        assert_eq!(
            self.text(),
            other_contents,
            "Response body differs, for request {}",
            self.request_format
        );
    }

    /// Asserts the body of the response contains the text provided.
    #[track_caller]
    pub fn assert_text_contains<C>(&self, expected: C)
    where
        C: AsRef<str>,
    {
        let expected_contents = expected.as_ref();
        let received = self.text();

        assert!(
            received.contains(expected_contents),
            "Failed to find '{expected_contents}', received '{received}', for request {}",
            self.request_format
        );
    }

    /// Deserializes the contents of the request as JSON,
    /// and asserts it matches the value given.
    ///
    /// If `other` does not match, or the response is not JSON,
    /// then this will panic.
    #[track_caller]
    pub fn assert_json<T>(&self, other: &T)
    where
        T: DeserializeOwned + PartialEq<T> + Debug,
    {
        let own_json: T = self.json();
        assert_eq!(own_json, *other);
    }

    /// Deserializes the contents of the request as an url encoded form,
    /// and asserts it matches the value given.
    ///
    /// If `other` does not match, or the response cannot be deserialized,
    /// then this will panic.
    #[track_caller]
    pub fn assert_form<T>(&self, other: &T)
    where
        T: DeserializeOwned + PartialEq<T> + Debug,
    {
        let own_form: T = self.form();
        assert_eq!(own_form, *other);
    }

    /// Asserts the header named is present, and matches the value given.
    #[track_caller]
    pub fn assert_header<N, V>(&self, header_name: N, expected: V)
    where
        N: AsHeaderName + Display + Clone,
        V: AsRef<str>,
    {
        let debug_header = header_name.clone();
        let received = self.header(header_name);
        let received_str = received.to_str().unwrap_or("<non-text header value>");

        assert_eq!(
            received_str,
            expected.as_ref(),
            "Header '{debug_header}' differs, for request {}",
            self.request_format
        );
    }

    /// This will panic if the status code is **outside** the 2xx range.
    /// i.e. The range from 200-299.
    #[track_caller]
    pub fn assert_status_success(&self) {
        assert!(
            self.status_code.is_success(),
            "Expect status code within 2xx range, received {}, for request {}, with body {}",
            self.status_code,
            self.request_format,
            self.debug_body()
        );
    }

    /// This will panic if the status code is **within** the 2xx range.
    /// i.e. A status code less than 200, or 300 or more.
    #[track_caller]
    pub fn assert_status_failure(&self) {
        assert!(
            !self.status_code.is_success(),
            "Expect status code outside 2xx range, received {}, for request {}, with body {}",
            self.status_code,
            self.request_format,
            self.debug_body()
        );
    }

    /// Assert the response status code is 400.
    #[track_caller]
    pub fn assert_status_bad_request(&self) {
        self.assert_status(StatusCode::BAD_REQUEST)
    }

    /// Assert the response status code is 404.
    #[track_caller]
    pub fn assert_status_not_found(&self) {
        self.assert_status(StatusCode::NOT_FOUND)
    }

    /// Assert the response status code is 200.
    #[track_caller]
    pub fn assert_status_ok(&self) {
        self.assert_status(StatusCode::OK)
    }

    /// Assert the response status code is **not** 200.
    #[track_caller]
    pub fn assert_status_not_ok(&self) {
        self.assert_not_status(StatusCode::OK)
    }

    /// Assert the response status code matches the one given.
    #[track_caller]
    pub fn assert_status(&self, status_code: StatusCode) {
        assert_eq!(
            self.status_code(),
            status_code,
            "Expected status code {status_code}, for request {}, with body {}",
            self.request_format,
            self.debug_body()
        );
    }

    /// Assert the response status code does **not** match the one given.
    #[track_caller]
    pub fn assert_not_status(&self, status_code: StatusCode) {
        assert_ne!(
            self.status_code(),
            status_code,
            "Expected status code to not be {status_code}, for request {}",
            self.request_format
        );
    }

    fn debug_body(&self) -> String {
        let content_type = self.maybe_content_type();
        DebugBody::new(content_type.as_deref(), self.as_bytes()).to_string()
    }
}

impl From<TestResponse> for Bytes {
    fn from(response: TestResponse) -> Self {
        response.into_bytes()
    }
}

#[cfg(test)]
mod test_assert_success {
    use crate::RequestConfig;
    use crate::ResponseRecorder;
    use crate::TestRequest;
    use ::http::StatusCode;

    fn route_status(request: &TestRequest, recorder: &mut ResponseRecorder) {
        if request.path() == "/fail" {
            recorder.set_status(StatusCode::SERVICE_UNAVAILABLE);
        }
    }

    #[test]
    fn it_should_pass_when_200() {
        RequestConfig::new()
            .get("/pass")
            .run(route_status, |response, _| response.assert_status_success());
    }

    #[test]
    #[should_panic]
    fn it_should_panic_when_not_200() {
        RequestConfig::new()
            .get("/fail")
            .run(route_status, |response, _| response.assert_status_success());
    }

    #[test]
    fn it_should_pass_failure_when_not_200() {
        RequestConfig::new()
            .get("/fail")
            .run(route_status, |response, _| response.assert_status_failure());
    }

    #[test]
    #[should_panic]
    fn it_should_panic_failure_when_200() {
        RequestConfig::new()
            .get("/pass")
            .run(route_status, |response, _| response.assert_status_failure());
    }
}


#[cfg(test)]
mod test_header {
    use crate::RequestConfig;
    use crate::ResponseRecorder;
    use crate::TestRequest;
    use ::http::HeaderName;
    use ::http::HeaderValue;

    fn route_with_header(_request: &TestRequest, recorder: &mut ResponseRecorder) {
        recorder.insert_header(
            HeaderName::from_static("x-version"),
            HeaderValue::from_static("0.0.1"),
        );
    }

    #[test]
    fn it_should_find_header() {
        RequestConfig::new().get("/").run(route_with_header, |response, _| {
            assert_eq!(response.header("x-version"), "0.0.1");
            assert_eq!(response.maybe_header("x-missing"), None);
            response.assert_header("x-version", "0.0.1");
        });
    }

    #[test]
    #[should_panic]
    fn it_should_panic_when_header_is_missing() {
        RequestConfig::new().get("/").run(route_with_header, |response, _| {
            let _ = response.header("x-missing");
        });
    }

    #[test]
    #[should_panic]
    fn it_should_panic_when_header_differs() {
        RequestConfig::new().get("/").run(route_with_header, |response, _| {
            response.assert_header("x-version", "9.9.9");
        });
    }
}

#[cfg(test)]
mod test_cookies {
    use crate::RequestConfig;
    use crate::ResponseRecorder;
    use crate::TestRequest;
    use ::http::header;
    use ::http::HeaderValue;

    fn route_set_cookies(_request: &TestRequest, recorder: &mut ResponseRecorder) {
        let headers = recorder.headers_mut();
        headers.append(
            header::SET_COOKIE,
            HeaderValue::from_static("session=abc123; HttpOnly"),
        );
        headers.append(header::SET_COOKIE, HeaderValue::from_static("theme=dark"));
    }

    #[test]
    fn it_should_return_cookies_set() {
        RequestConfig::new().get("/").run(route_set_cookies, |response, _| {
            assert_eq!(response.cookie("session").value(), "abc123");
            assert_eq!(response.cookie("session").http_only(), Some(true));
            assert_eq!(response.cookie("theme").value(), "dark");
            assert!(response.maybe_cookie("missing").is_none());
            assert_eq!(response.cookies().iter().count(), 2);
        });
    }
}

#[cfg(test)]
mod test_text {
    use crate::RequestConfig;
    use crate::ResponseRecorder;
    use crate::TestRequest;

    fn route_get_text(_request: &TestRequest, recorder: &mut ResponseRecorder) {
        recorder.write_str("hello world!");
    }

    #[test]
    fn it_should_return_text() {
        RequestConfig::new().get("/text").run(route_get_text, |response, _| {
            assert_eq!(response.text(), "hello world!");
            assert_eq!(response.clone().into_bytes(), "hello world!");
        });
    }

    #[test]
    fn it_should_assert_text_contains() {
        RequestConfig::new().get("/text").run(route_get_text, |response, _| {
            response.assert_text_contains("world");
        });
    }

    #[test]
    #[should_panic]
    fn it_should_panic_when_text_not_contained() {
        RequestConfig::new().get("/text").run(route_get_text, |response, _| {
            response.assert_text_contains("goodbye");
        });
    }

    #[test]
    fn it_should_include_request_in_format() {
        RequestConfig::new()
            .get("/text?page=2")
            .run(route_get_text, |response, _| {
                assert_eq!(response.request_format(), "GET /text?page=2");
            });
    }
}
