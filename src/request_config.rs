use ::anyhow::anyhow;
use ::anyhow::Context;
use ::anyhow::Error as AnyhowError;
use ::anyhow::Result;
use ::axum::body::Body as AxumBody;
use ::axum::response::IntoResponse;
use ::bytes::Bytes;
use ::cookie::Cookie;
use ::cookie::CookieJar;
use ::cookie::SameSite;
use ::http::header;
use ::http::HeaderName;
use ::http::HeaderValue;
use ::http::Method;
use ::http::Request;
use ::serde::Serialize;
use ::std::fmt::Write;
use ::tower::Service;
use ::tower::ServiceExt;

use crate::internals::infer_content_type;
use crate::internals::DebugBody;
use crate::internals::QueryParamsStore;
use crate::internals::RequestPathFormatter;
use crate::multipart::MultipartForm;
use crate::FightConfig;
use crate::Handler;
use crate::QueryValue;
use crate::RequestContext;
use crate::ResponseRecorder;
use crate::TestRequest;
use crate::TestResponse;
use crate::UploadFile;

///
/// A `RequestConfig` describes a single request to send to a handler.
///
/// It is built up by chaining calls, starting with a method and path.
/// Such as [`RequestConfig::get()`] or [`RequestConfig::post()`].
/// Then it is run against a handler, passing what was sent and received to a callback.
///
/// ```rust
/// use ::axum_fight::RequestConfig;
/// use ::axum_fight::ResponseRecorder;
/// use ::axum_fight::TestRequest;
///
/// fn version_handler(request: &TestRequest, recorder: &mut ResponseRecorder) {
///     let version = request.header("x-version").unwrap_or_default();
///     recorder.write_str(version);
/// }
///
/// RequestConfig::new()
///     .get("/")
///     .set_header([("X-Version", "0.0.1")])
///     .run(version_handler, |response, request| {
///         assert_eq!(request.header("x-version"), Some("0.0.1"));
///         response.assert_status_ok();
///         response.assert_text("0.0.1");
///     });
/// ```
///
/// # Mistakes in the request
///
/// Setting up the request never panics.
/// Bad input, such as an invalid header name or a file that cannot be read,
/// is logged as a warning and otherwise skipped.
/// Those errors are kept, and can be checked with [`RequestConfig::errors()`]
/// or [`RequestConfig::assert_no_errors()`] before running.
///
/// # Running more than once
///
/// Running borrows the `RequestConfig`, and leaves it unchanged.
/// The same request can be run again, and will be built the same way.
///
#[derive(Debug)]
pub struct RequestConfig {
    method: Method,
    path: String,
    query_params: QueryParamsStore,
    body: Bytes,
    headers: Vec<(HeaderName, HeaderValue)>,
    cookies: CookieJar,
    is_debug: bool,
    content_type: Option<String>,
    context: RequestContext,
    config: FightConfig,
    errors: Vec<AnyhowError>,
}

impl RequestConfig {
    /// A new request, defaulting to `GET /`.
    pub fn new() -> Self {
        Self::new_with_config(FightConfig::default())
    }

    /// A new request, using the defaults in the config given.
    ///
    /// See [`FightConfig`] for the settings available.
    pub fn new_with_config(config: FightConfig) -> Self {
        Self {
            method: Method::GET,
            path: "/".to_string(),
            query_params: QueryParamsStore::new(),
            body: Bytes::new(),
            headers: vec![],
            cookies: CookieJar::new(),
            is_debug: config.debug,
            content_type: None,
            context: RequestContext::new(),
            config,
            errors: vec![],
        }
    }

    /// Sets the request to be a HTTP GET to the path.
    pub fn get(self, path: &str) -> Self {
        self.method(Method::GET, path)
    }

    /// Sets the request to be a HTTP POST to the path.
    pub fn post(self, path: &str) -> Self {
        self.method(Method::POST, path)
    }

    /// Sets the request to be a HTTP PUT to the path.
    pub fn put(self, path: &str) -> Self {
        self.method(Method::PUT, path)
    }

    /// Sets the request to be a HTTP DELETE to the path.
    pub fn delete(self, path: &str) -> Self {
        self.method(Method::DELETE, path)
    }

    /// Sets the request to be a HTTP PATCH to the path.
    pub fn patch(self, path: &str) -> Self {
        self.method(Method::PATCH, path)
    }

    /// Sets the request to be a HTTP HEAD to the path.
    pub fn head(self, path: &str) -> Self {
        self.method(Method::HEAD, path)
    }

    /// Sets the request to be a HTTP OPTIONS to the path.
    pub fn options(self, path: &str) -> Self {
        self.method(Method::OPTIONS, path)
    }

    /// Sets the method and path of the request, replacing what was there before.
    ///
    /// The path may include a query, such as `/users?page=2`.
    /// Only the first `?` splits the path from the query.
    /// A path without a leading `/` is sent as if it had one.
    pub fn method(mut self, method: Method, path: &str) -> Self {
        self.method = method;
        self.path = path.to_string();
        self
    }

    /// Replaces the headers to send.
    ///
    /// Headers set here take priority over those added automatically,
    /// such as the `User-Agent` or `Content-Type`.
    /// If a name is given more than once, the last value is used.
    ///
    /// Passing no headers leaves the existing headers in place.
    pub fn set_header<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut new_headers = vec![];
        let mut is_empty = true;

        for (name, value) in headers {
            is_empty = false;

            let (name, value) = (name.as_ref(), value.as_ref());
            match parse_header(name, value) {
                Ok(header) => new_headers.push(header),
                Err(err) => self.record_error(err),
            }
        }

        if !is_empty {
            self.headers = new_headers;
        }

        self
    }

    /// Replaces the cookies to send.
    ///
    /// Passing no cookies leaves the existing cookies in place.
    pub fn set_cookie<I, K, V>(mut self, cookies: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut new_cookies = CookieJar::new();
        let mut is_empty = true;

        for (name, value) in cookies {
            is_empty = false;

            let (name, value) = (name.as_ref(), value.as_ref());
            match self.build_cookie(name, value) {
                Ok(cookie) => new_cookies.add(cookie),
                Err(err) => self.record_error(err),
            }
        }

        if !is_empty {
            self.cookies = new_cookies;
        }

        self
    }

    /// Sets the raw body to send.
    ///
    /// An empty body is ignored, leaving any existing body in place.
    pub fn set_body<B>(mut self, body: B) -> Self
    where
        B: AsRef<[u8]>,
    {
        let body = body.as_ref();
        if !body.is_empty() {
            self.body = Bytes::copy_from_slice(body);
        }

        self
    }

    /// Sets the body to the form given, url encoded.
    ///
    /// The form can be anything which serializes to key value pairs,
    /// such as a `HashMap`, a list of tuples, or a struct.
    pub fn set_form<F>(mut self, form: &F) -> Self
    where
        F: ?Sized + Serialize,
    {
        match serde_urlencoded::to_string(form) {
            Ok(encoded) => self.body = encoded.into(),
            Err(err) => {
                let err = AnyhowError::new(err).context(format!(
                    "Failed to serialize form body, for request {}",
                    self.debug_request_format()
                ));
                self.record_error(err);
            }
        }

        self
    }

    /// Sets the body to the value given, serialized as JSON.
    ///
    /// This accepts anything serializable.
    /// Such as a `serde_json::json!` object, a `HashMap`, a list, or your own types.
    ///
    /// If serialization fails the previous body is kept,
    /// and the error is recorded.
    pub fn set_json<J>(mut self, body: &J) -> Self
    where
        J: ?Sized + Serialize,
    {
        match serde_json::to_vec(body) {
            Ok(encoded) => self.body = encoded.into(),
            Err(err) => {
                let err = AnyhowError::new(err).context(format!(
                    "Failed to serialize JSON body, for request {}",
                    self.debug_request_format()
                ));
                self.record_error(err);
            }
        }

        self
    }

    /// Adds query parameters to send, url encoded.
    ///
    /// Any query already in the path is sent first,
    /// followed by parameters from each call in order.
    pub fn set_query<Q>(mut self, query: &Q) -> Self
    where
        Q: ?Sized + Serialize,
    {
        if let Err(err) = self.query_params.add(query) {
            let err = err.context(format!(
                "Failed to serialize query parameters, for request {}",
                self.debug_request_format()
            ));
            self.record_error(err);
        }

        self
    }

    /// Adds query parameters, where a value can be a list.
    ///
    /// A list repeats the key for each value, in order.
    /// i.e. `("ids", vec!["1", "2"])` sends `ids=1&ids=2`.
    pub fn set_query_d<I, K, V>(mut self, query: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<QueryValue>,
    {
        for (key, value) in query {
            let key = key.into();
            self.query_params.add_values(&key, value.into().values());
        }

        self
    }

    /// Appends text onto the end of the path, as is.
    ///
    /// This is for building up paths with parameters,
    /// such as `post("/books/").set_path("123/chapters")`.
    pub fn set_path(mut self, suffix: &str) -> Self {
        self.path.push_str(suffix);
        self
    }

    /// Sets the body to a multipart form, uploading the files given.
    ///
    /// See [`RequestConfig::set_file_from_path_with_fields()`] for details.
    pub fn set_file_from_path<U>(self, uploads: U) -> Self
    where
        U: IntoIterator<Item = UploadFile>,
    {
        self.set_file_from_path_with_fields(uploads, Vec::<(String, String)>::new())
    }

    /// Sets the body to a multipart form, uploading the files given,
    /// with the extra text fields added after them.
    ///
    /// Files without in memory content are read from their path.
    /// A file which cannot be read is skipped, and the error recorded.
    /// The rest of the form is still sent.
    ///
    /// This also sets the content type, including the boundary used.
    pub fn set_file_from_path_with_fields<U, F, K, V>(mut self, uploads: U, fields: F) -> Self
    where
        U: IntoIterator<Item = UploadFile>,
        F: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut form = MultipartForm::new();

        for upload in uploads {
            match upload.read_content() {
                Ok(content) => form = form.add_file(&upload, content),
                Err(err) => {
                    let err = err.context(format!(
                        "Failed to add upload '{}', for request {}",
                        upload.name,
                        self.debug_request_format()
                    ));
                    self.record_error(err);
                }
            }
        }

        for (key, value) in fields {
            form = form.add_text(key.as_ref(), value.as_ref());
        }

        self.set_multipart(form)
    }

    /// Sets the body to the multipart form given,
    /// and the content type to match it.
    pub fn set_multipart(mut self, form: MultipartForm) -> Self {
        let content_type = form.content_type();

        match form.into_bytes() {
            Ok(body) => {
                self.body = body;
                self.content_type = Some(content_type);
            }
            Err(err) => {
                let err = err.context(format!(
                    "Failed to build multipart body, for request {}",
                    self.debug_request_format()
                ));
                self.record_error(err);
            }
        }

        self
    }

    /// Sets the content type to send.
    ///
    /// This is used over the content type guessed from the body.
    /// Though a `Content-Type` given to [`RequestConfig::set_header()`] still takes priority.
    pub fn set_content_type(mut self, content_type: &str) -> Self {
        match HeaderValue::from_str(content_type) {
            Ok(_) => self.content_type = Some(content_type.to_string()),
            Err(err) => {
                let err = AnyhowError::new(err).context(format!(
                    "Invalid content type '{content_type}', for request {}",
                    self.debug_request_format()
                ));
                self.record_error(err);
            }
        }

        self
    }

    /// When enabled, the full request is logged at `debug` level when it is built.
    pub fn set_debug(mut self, is_debug: bool) -> Self {
        self.is_debug = is_debug;
        self
    }

    /// Sets the context the request is built with.
    ///
    /// The handler can read it back using [`TestRequest::context()`],
    /// or from the request extensions when running a `tower::Service`.
    pub fn set_context(mut self, context: RequestContext) -> Self {
        self.context = context;
        self
    }

    /// The HTTP method the request will be sent with.
    pub fn method_type(&self) -> &Method {
        &self.method
    }

    /// The path as it was set, including any query given with it.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn is_debug(&self) -> bool {
        self.is_debug
    }

    /// All of the mistakes found while setting up this request.
    pub fn errors(&self) -> &[AnyhowError] {
        &self.errors
    }

    /// Panics if any mistakes were found while setting up this request.
    #[track_caller]
    pub fn assert_no_errors(&self) {
        if self.errors.is_empty() {
            return;
        }

        let mut message = format!(
            "Found {} error(s) building request {}",
            self.errors.len(),
            self.debug_request_format()
        );
        for err in &self.errors {
            let _ = write!(message, "\n  - {err:#}");
        }

        panic!("{message}");
    }

    /// Builds the request that will be sent, without running it.
    ///
    /// This is what [`RequestConfig::run()`] and [`RequestConfig::run_service()`] send.
    pub fn materialize(&self) -> TestRequest {
        let (path, path_query) = match self.path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (self.path.as_str(), None),
        };
        let query = self.query_params.to_query_string(path_query);

        let mut path_and_query = String::with_capacity(self.path.len() + 1);
        if !path.starts_with('/') {
            path_and_query.push('/');
        }
        path_and_query.push_str(path);
        if let Some(query) = &query {
            path_and_query.push('?');
            path_and_query.push_str(query);
        }

        let mut request = Request::builder()
            .method(self.method.clone())
            .uri(&path_and_query)
            .body(self.body.clone())
            .unwrap_or_else(|err| {
                ::tracing::error!(
                    error = %err,
                    method = %self.method,
                    path = %path_and_query,
                    "Failed to build request, falling back to GET /"
                );
                Request::new(self.body.clone())
            });

        let headers = request.headers_mut();

        match HeaderValue::from_str(&self.config.user_agent) {
            Ok(user_agent) => {
                headers.insert(header::USER_AGENT, user_agent);
            }
            Err(err) => ::tracing::warn!(
                error = %err,
                user_agent = %self.config.user_agent,
                "Skipping invalid user agent"
            ),
        }

        if let Some(content_type) = self.resolve_content_type() {
            match HeaderValue::from_str(content_type) {
                Ok(value) => {
                    headers.insert(header::CONTENT_TYPE, value);
                }
                Err(err) => ::tracing::warn!(
                    error = %err,
                    content_type,
                    "Skipping invalid content type"
                ),
            }
        }

        for (name, value) in &self.headers {
            headers.insert(name.clone(), value.clone());
        }

        if let Some(cookie_header) = self.build_cookie_header(headers.get(header::COOKIE)) {
            headers.insert(header::COOKIE, cookie_header);
        }

        request.extensions_mut().insert(self.context.clone());

        if self.is_debug {
            self.log_request(&request, query.as_deref());
        }

        TestRequest::new(request, self.context.clone())
    }

    /// Builds the request, and sends it to the handler given.
    /// What was sent and received is then passed to the callback.
    ///
    /// ```rust
    /// use ::axum_fight::RequestConfig;
    /// use ::axum_fight::ResponseRecorder;
    /// use ::axum_fight::TestRequest;
    ///
    /// let query_handler = |request: &TestRequest, recorder: &mut ResponseRecorder| {
    ///     let foo = request.query_param("foo").unwrap_or_default();
    ///     recorder.write_str(&foo);
    /// };
    ///
    /// RequestConfig::new()
    ///     .get("/query")
    ///     .set_query(&[("foo", "bar")])
    ///     .run(query_handler, |response, request| {
    ///         assert_eq!(request.query_param("foo"), Some("bar".to_string()));
    ///         response.assert_text("bar");
    ///     });
    /// ```
    pub fn run<H, F>(&self, handler: H, callback: F)
    where
        H: Handler,
        F: FnOnce(&TestResponse, &TestRequest),
    {
        let request = self.materialize();
        let mut recorder = ResponseRecorder::new();

        handler.serve(&request, &mut recorder);

        let (parts, body) = recorder.into_parts();
        let response = TestResponse::new(format_request(&request), parts, body);

        callback(&response, &request);
    }

    /// Builds the request, and sends it to the `tower::Service` given.
    /// Such as an Axum [`Router`](::axum::Router).
    /// What was sent and received is then passed to the callback.
    ///
    /// An error is returned if the service fails, or it's response body cannot be read.
    /// In that case the callback is not called.
    ///
    /// ```rust
    /// # async fn test() -> Result<(), Box<dyn ::std::error::Error>> {
    /// #
    /// use ::axum::Router;
    /// use ::axum::routing::get;
    /// use ::axum_fight::RequestConfig;
    ///
    /// let app = Router::new()
    ///     .route("/ping", get(|| async { "pong!" }));
    ///
    /// RequestConfig::new()
    ///     .get("/ping")
    ///     .run_service(app, |response, _request| {
    ///         response.assert_text("pong!");
    ///     })
    ///     .await?;
    /// #
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_service<S, F>(&self, service: S, callback: F) -> Result<()>
    where
        S: Service<Request<AxumBody>>,
        S::Response: IntoResponse,
        AnyhowError: From<S::Error>,
        F: FnOnce(&TestResponse, &TestRequest),
    {
        let request = self.materialize();
        let request_format = format_request(&request);
        let outgoing = request.clone().into_inner().map(AxumBody::from);

        let response = service
            .oneshot(outgoing)
            .await
            .map_err(AnyhowError::from)
            .with_context(|| format!("Service failed to handle request {request_format}"))?
            .into_response();

        let (parts, response_body) = response.into_parts();
        let response_bytes = axum::body::to_bytes(response_body, usize::MAX)
            .await
            .with_context(|| format!("Failed to read response body, for request {request_format}"))?;

        let response = TestResponse::new(request_format, parts, response_bytes);
        callback(&response, &request);

        Ok(())
    }

    fn resolve_content_type(&self) -> Option<&str> {
        self.content_type
            .as_deref()
            .or(self.config.default_content_type.as_deref())
            .or_else(|| infer_content_type(&self.method, &self.body))
    }

    fn build_cookie(&self, name: &str, value: &str) -> Result<Cookie<'static>> {
        let is_valid_name = !name.is_empty()
            && !name
                .chars()
                .any(|c| c == '=' || c == ';' || c == ',' || c.is_whitespace() || c.is_control());
        if !is_valid_name {
            return Err(anyhow!(
                "Invalid cookie name '{name}', for request {}",
                self.debug_request_format()
            ));
        }

        let is_valid_value = !value.contains(';') && HeaderValue::from_str(value).is_ok();
        if !is_valid_value {
            return Err(anyhow!(
                "Invalid value for cookie '{name}', for request {}",
                self.debug_request_format()
            ));
        }

        let cookie = Cookie::build((name.to_string(), value.to_string()))
            .http_only(true)
            .secure(self.config.secure_cookies)
            .same_site(SameSite::Strict)
            .build();

        Ok(cookie)
    }

    /// Only the name and value are sent, as a browser would.
    fn build_cookie_header(&self, existing: Option<&HeaderValue>) -> Option<HeaderValue> {
        let mut cookie_header = existing
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let has_existing = !cookie_header.is_empty();

        for cookie in self.cookies.iter() {
            if !cookie_header.is_empty() {
                cookie_header.push_str("; ");
            }
            let _ = write!(cookie_header, "{}", cookie.stripped());
        }

        if cookie_header.is_empty() || (has_existing && self.cookies.iter().next().is_none()) {
            return None;
        }

        match HeaderValue::from_str(&cookie_header) {
            Ok(value) => Some(value),
            Err(err) => {
                ::tracing::warn!(error = %err, "Skipping invalid cookie header");
                None
            }
        }
    }

    fn log_request(&self, request: &Request<Bytes>, query: Option<&str>) {
        let body = DebugBody::new(
            request
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            request.body(),
        );
        let cookies = self
            .cookies
            .iter()
            .map(|cookie| cookie.to_string())
            .collect::<Vec<_>>();

        ::tracing::debug!(
            method = %request.method(),
            path = %request.uri().path(),
            query = query.unwrap_or_default(),
            body = %body,
            headers = ?self.headers,
            cookies = ?cookies,
            request_headers = ?request.headers(),
            "Request built"
        );
    }

    fn record_error(&mut self, err: AnyhowError) {
        ::tracing::warn!(error = %format!("{err:#}"), "Ignoring invalid request setup");
        self.errors.push(err);
    }

    fn debug_request_format(&self) -> RequestPathFormatter<'_> {
        RequestPathFormatter::new(&self.method, &self.path, None)
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .with_context(|| format!("Invalid header name '{name}'"))?;
    let header_value = HeaderValue::from_str(value)
        .with_context(|| format!("Invalid value for header '{name}'"))?;

    Ok((header_name, header_value))
}

fn format_request(request: &TestRequest) -> String {
    RequestPathFormatter::new(request.method(), request.path(), request.query_string()).to_string()
}



#[cfg(test)]
mod test_set_header {
    use super::*;
    use ::std::collections::HashMap;

    #[test]
    fn it_should_send_headers_set() {
        let request = RequestConfig::new()
            .set_header([("X-Version", "0.0.1"), ("X-Other", "abc")])
            .materialize();

        assert_eq!(request.header("x-version"), Some("0.0.1"));
        assert_eq!(request.header("x-other"), Some("abc"));
    }

    #[test]
    fn it_should_override_automatic_headers() {
        let request = RequestConfig::new()
            .post("/")
            .set_body(r#"{"a":1}"#)
            .set_header([("User-Agent", "custom"), ("Content-Type", "text/plain")])
            .materialize();

        assert_eq!(request.header(header::USER_AGENT), Some("custom"));
        assert_eq!(request.header(header::CONTENT_TYPE), Some("text/plain"));
    }

    #[test]
    fn it_should_replace_previous_headers() {
        let request = RequestConfig::new()
            .set_header([("X-First", "1")])
            .set_header([("X-Second", "2")])
            .materialize();

        assert_eq!(request.header("x-first"), None);
        assert_eq!(request.header("x-second"), Some("2"));
    }

    #[test]
    fn it_should_keep_headers_when_given_none() {
        let request = RequestConfig::new()
            .set_header([("X-First", "1")])
            .set_header(HashMap::<String, String>::new())
            .materialize();

        assert_eq!(request.header("x-first"), Some("1"));
    }

    #[test]
    fn it_should_use_last_value_for_repeated_names() {
        let request = RequestConfig::new()
            .set_header([("X-Version", "1"), ("x-version", "2")])
            .materialize();

        assert_eq!(request.header("x-version"), Some("2"));
        assert_eq!(request.headers().get_all("x-version").iter().count(), 1);
    }

    #[test]
    fn it_should_record_invalid_headers() {
        let config = RequestConfig::new().set_header([("Bad Name", "1"), ("X-Good", "2")]);
        let request = config.materialize();

        assert_eq!(config.errors().len(), 1);
        assert_eq!(request.header("x-good"), Some("2"));
    }
}

#[cfg(test)]
mod test_set_cookie {
    use super::*;

    #[test]
    fn it_should_send_cookies_set() {
        let request = RequestConfig::new()
            .set_cookie([("foo", "bar"), ("baz", "qux")])
            .materialize();

        assert_eq!(request.cookie("foo").unwrap().value(), "bar");
        assert_eq!(request.cookie("baz").unwrap().value(), "qux");
    }

    #[test]
    fn it_should_send_name_and_value_only() {
        let config = FightConfig::builder().secure_cookies().build();
        let request = RequestConfig::new_with_config(config)
            .set_cookie([("foo", "bar")])
            .materialize();

        assert_eq!(request.header(header::COOKIE), Some("foo=bar"));
    }

    #[test]
    fn it_should_keep_cookies_when_given_none() {
        let request = RequestConfig::new()
            .set_cookie([("foo", "bar")])
            .set_cookie(Vec::<(&str, &str)>::new())
            .materialize();

        assert_eq!(request.cookie("foo").unwrap().value(), "bar");
    }

    #[test]
    fn it_should_replace_previous_cookies() {
        let request = RequestConfig::new()
            .set_cookie([("foo", "bar")])
            .set_cookie([("baz", "qux")])
            .materialize();

        assert!(request.cookie("foo").is_none());
        assert_eq!(request.cookie("baz").unwrap().value(), "qux");
    }

    #[test]
    fn it_should_append_to_cookie_header_set() {
        let request = RequestConfig::new()
            .set_header([("Cookie", "session=abc")])
            .set_cookie([("foo", "bar")])
            .materialize();

        assert_eq!(request.header(header::COOKIE), Some("session=abc; foo=bar"));
    }

    #[test]
    fn it_should_send_no_cookie_header_without_cookies() {
        let request = RequestConfig::new().materialize();

        assert_eq!(request.header(header::COOKIE), None);
    }

    #[test]
    fn it_should_record_invalid_cookies() {
        let config = RequestConfig::new().set_cookie([("bad name", "1"), ("ok", "a;b")]);

        assert_eq!(config.errors().len(), 2);
        assert_eq!(config.materialize().header(header::COOKIE), None);
    }
}

#[cfg(test)]
mod test_set_body {
    use super::*;

    #[test]
    fn it_should_send_body_set() {
        let request = RequestConfig::new()
            .post("/")
            .set_body("a=1&b=2")
            .materialize();

        assert_eq!(request.text(), "a=1&b=2");
    }

    #[test]
    fn it_should_ignore_empty_body() {
        let request = RequestConfig::new()
            .post("/")
            .set_body("a=1")
            .set_body("")
            .materialize();

        assert_eq!(request.text(), "a=1");
    }

    #[test]
    fn it_should_replace_previous_body() {
        let config = RequestConfig::new()
            .post("/")
            .set_json(&serde_json::json!({ "a": 1 }))
            .set_body("raw");

        assert_eq!(config.body(), "raw");
    }
}





#[cfg(test)]
mod test_set_query_d {
    use super::*;

    #[test]
    fn it_should_repeat_keys_for_lists() {
        let request = RequestConfig::new()
            .get("/items")
            .set_query_d([("ids", vec!["1", "2"])])
            .materialize();

        assert_eq!(request.query_string(), Some("ids=1&ids=2"));
        assert_eq!(request.query_params("ids"), vec!["1", "2"]);
    }

    #[test]
    fn it_should_mix_single_and_list_values() {
        let request = RequestConfig::new()
            .get("/items")
            .set_query_d([
                ("Ids[]", QueryValue::from(["E", "M"])),
                ("page", QueryValue::from("2")),
            ])
            .materialize();

        assert_eq!(request.query_params("Ids[]"), vec!["E", "M"]);
        assert_eq!(request.query_param("page"), Some("2".to_string()));
    }

    #[test]
    fn it_should_append_after_existing_query() {
        let request = RequestConfig::new()
            .get("/items?sort=asc")
            .set_query_d([("ids", vec!["1", "2"])])
            .materialize();

        assert_eq!(request.query_string(), Some("sort=asc&ids=1&ids=2"));
    }

    #[test]
    fn it_should_do_nothing_for_empty_query() {
        let request = RequestConfig::new()
            .get("/items")
            .set_query_d(Vec::<(String, QueryValue)>::new())
            .materialize();

        assert_eq!(request.uri(), "/items");
    }
}

#[cfg(test)]
mod test_set_path {
    use super::*;

    #[test]
    fn it_should_append_to_path() {
        let request = RequestConfig::new()
            .post("/books/")
            .set_path("book1/apple2")
            .materialize();

        assert_eq!(request.path(), "/books/book1/apple2");
    }

    #[test]
    fn it_should_keep_query_after_path() {
        let request = RequestConfig::new()
            .get("/books/")
            .set_query(&[("page", "2")])
            .set_path("123")
            .materialize();

        assert_eq!(request.uri(), "/books/123?page=2");
    }
}
