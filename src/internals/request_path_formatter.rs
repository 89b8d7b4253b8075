use ::http::Method;
use ::std::fmt;

/// Formats a request as `METHOD /path?query`, for use in logs and error messages.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPathFormatter<'a> {
    method: &'a Method,
    path: &'a str,
    query: Option<&'a str>,
}

impl<'a> RequestPathFormatter<'a> {
    pub fn new(method: &'a Method, path: &'a str, query: Option<&'a str>) -> Self {
        Self {
            method,
            path,
            query,
        }
    }
}

impl fmt::Display for RequestPathFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = &self.method;
        let path = &self.path;

        match self.query {
            Some(query) if !query.is_empty() => write!(f, "{method} {path}?{query}"),
            _ => write!(f, "{method} {path}"),
        }
    }
}
