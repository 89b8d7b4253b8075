use ::anyhow::Context;
use ::bytes::Bytes;
use ::cookie::Cookie;
use ::cookie::CookieJar;
use ::http::header;
use ::http::header::AsHeaderName;
use ::http::Request;
use ::serde::de::DeserializeOwned;
use ::std::ops::Deref;

use crate::RequestContext;

///
/// The request as it was built and sent to the handler.
///
/// This is handed to handlers given to [`RequestConfig::run()`](crate::RequestConfig::run()),
/// and to the callback after every run, to allow asserting on what was sent.
///
/// It derefs to the underlying [`http::Request`], so the method, uri, headers,
/// and extensions are all available directly. On top of that are helpers for reading
/// the query, cookies, and body, in the same way a handler would.
///
#[derive(Debug, Clone)]
pub struct TestRequest {
    inner: Request<Bytes>,
    context: RequestContext,
}

impl TestRequest {
    pub(crate) fn new(inner: Request<Bytes>, context: RequestContext) -> Self {
        Self { inner, context }
    }

    /// The path of the request, without the query.
    pub fn path(&self) -> &str {
        self.inner.uri().path()
    }

    /// The raw query string, if there is one.
    pub fn query_string(&self) -> Option<&str> {
        self.inner.uri().query()
    }

    /// Returns the first value in the query for the key given, decoded.
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.query_params(key).into_iter().next()
    }

    /// Returns all of the values in the query for the key given, in order.
    pub fn query_params(&self, key: &str) -> Vec<String> {
        decode_pairs(self.query_string().unwrap_or_default())
            .into_iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v)
            .collect()
    }

    /// Returns the value of a header as a string.
    ///
    /// `None` is returned if the header is missing, or it's value isn't valid text.
    pub fn header<N>(&self, header_name: N) -> Option<&str>
    where
        N: AsHeaderName,
    {
        self.inner
            .headers()
            .get(header_name)
            .and_then(|value| value.to_str().ok())
    }

    /// Finds a cookie sent with this request, by name.
    pub fn cookie(&self, cookie_name: &str) -> Option<Cookie<'static>> {
        self.iter_cookies()
            .find(|cookie| cookie.name() == cookie_name)
    }

    /// Returns all of the cookies sent with this request.
    pub fn cookies(&self) -> CookieJar {
        let mut cookies = CookieJar::new();
        for cookie in self.iter_cookies() {
            cookies.add_original(cookie);
        }

        cookies
    }

    fn iter_cookies(&self) -> impl Iterator<Item = Cookie<'static>> + '_ {
        self.inner
            .headers()
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(Cookie::split_parse)
            .filter_map(|cookie| cookie.ok())
            .map(Cookie::into_owned)
    }

    /// The body sent, as raw bytes.
    pub fn as_bytes(&self) -> &Bytes {
        self.inner.body()
    }

    /// The body sent, as a UTF-8 string.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(self.inner.body()).to_string()
    }

    /// Deserializes the body sent from JSON.
    ///
    /// This will panic if the body is not valid JSON for the type given.
    #[must_use]
    pub fn json<T>(&self) -> T
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice::<T>(self.inner.body())
            .with_context(|| format!("Deserializing request body from JSON, for {}", self.uri()))
            .unwrap()
    }

    /// Deserializes the body sent from an url encoded form.
    ///
    /// This will panic if the body is not a valid form for the type given.
    #[must_use]
    pub fn form<T>(&self) -> T
    where
        T: DeserializeOwned,
    {
        serde_urlencoded::from_bytes::<T>(self.inner.body())
            .with_context(|| format!("Deserializing request body from Form, for {}", self.uri()))
            .unwrap()
    }

    /// The context the request was built with.
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    pub fn into_inner(self) -> Request<Bytes> {
        self.inner
    }
}

impl Deref for TestRequest {
    type Target = Request<Bytes>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

fn decode_pairs(query: &str) -> Vec<(String, String)> {
    serde_urlencoded::from_str::<Vec<(String, String)>>(query).unwrap_or_default()
}
