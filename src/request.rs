//! Incoming request type.

use http::header::{HeaderMap, HeaderValue, IntoHeaderName};
use http::{Extensions, Method};

use crate::path::normalize;

/// A request travelling through a pipeline.
///
/// Path rewrites follow value semantics: [`Request::with_path`] consumes the
/// request and returns a new one, so no two pipeline branches ever observe
/// each other's rewrites. The path the request carried before its first
/// rewrite stays available through [`Request::original_path`].
#[derive(Debug)]
pub struct Request {
    method: Method,
    path: String,
    original_path: Option<String>,
    headers: HeaderMap,
    body: Vec<u8>,
    extensions: Extensions,
}

impl Request {
    /// Builds a request. An empty path is treated as `/`.
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: normalize(path),
            original_path: None,
            headers: HeaderMap::new(),
            body: Vec::new(),
            extensions: Extensions::new(),
        }
    }

    /// Shortcut for a `GET` request.
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn headers_mut(&mut self) -> &mut HeaderMap { &mut self.headers }
    pub fn body(&self) -> &[u8] { &self.body }
    pub fn extensions(&self) -> &Extensions { &self.extensions }
    pub fn extensions_mut(&mut self) -> &mut Extensions { &mut self.extensions }

    /// The path before any pipeline rewrote it.
    pub fn original_path(&self) -> &str {
        self.original_path.as_deref().unwrap_or(&self.path)
    }

    /// Header lookup; `None` when absent or not visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Returns a request carrying `path` instead of the current one.
    pub fn with_path(mut self, path: &str) -> Self {
        let path = normalize(path);
        if self.original_path.is_none() {
            self.original_path = Some(std::mem::replace(&mut self.path, path));
        } else {
            self.path = path;
        }
        self
    }

    pub fn with_header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Attaches a typed attribute, replacing any previous value of that type.
    pub fn with_extension<T: Clone + Send + Sync + 'static>(mut self, value: T) -> Self {
        self.extensions.insert(value);
        self
    }
}

impl<B: Into<Vec<u8>>> From<http::Request<B>> for Request {
    fn from(req: http::Request<B>) -> Self {
        let (parts, body) = req.into_parts();
        Self {
            method: parts.method,
            path: normalize(parts.uri.path()),
            original_path: None,
            headers: parts.headers,
            body: body.into(),
            extensions: parts.extensions,
        }
    }
}
