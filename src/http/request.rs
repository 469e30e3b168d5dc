use std::collections::HashMap;

use bytes::Bytes;

/// Header map keyed by lowercased field name.
///
/// A later header line with the same name replaces the earlier value.
pub type HeaderMap = HashMap<String, String>;

/// Request methods.
///
/// `BREW` is the protocol's own verb; it is routed exactly like `POST`.
/// Any other valid token is kept verbatim as an extension method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Submit a brew command
    POST,
    /// BREW - Submit a brew command
    BREW,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
    /// Any other token, e.g. `WHEN` or `PROPFIND`
    Extension(String),
}

impl Method {
    /// Maps a method token to a `Method`.
    ///
    /// Matching is case-sensitive, as methods are. The caller is expected to
    /// have checked that `s` is a token.
    ///
    /// # Example
    ///
    /// ```
    /// # use htcpcp::http::request::Method;
    /// assert_eq!(Method::from_token("BREW"), Method::BREW);
    /// assert_eq!(Method::from_token("brew"), Method::Extension("brew".into()));
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "BREW" => Method::BREW,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            other => Method::Extension(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::BREW => "BREW",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Extension(s) => s,
        }
    }

    /// Whether this method carries a brew command (`POST` or `BREW`).
    pub fn is_brew_command(&self) -> bool {
        matches!(self, Method::POST | Method::BREW)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The parsed first line of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    /// `*`, an absolute path, or an absolute URI
    pub request_uri: String,
    /// e.g. `HTTP/1.1`
    pub http_version: String,
}

impl RequestLine {
    /// Resolves the request target to its path component.
    ///
    /// An absolute path is resolved against a throwaway `coffee:` scheme so
    /// that both forms go through the same URL parser. Query and fragment are
    /// dropped. Fails for `*`, which has no path.
    pub fn path(&self) -> Result<String, url::ParseError> {
        let url = if self.request_uri.starts_with('/') {
            url::Url::parse(&format!("coffee:{}", self.request_uri))?
        } else {
            url::Url::parse(&self.request_uri)?
        };
        Ok(url.path().to_string())
    }
}

/// A complete request cut out of the connection's byte stream.
///
/// `body` always has exactly the length declared by `content-length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub line: RequestLine,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    request_uri: Option<String>,
    http_version: Option<String>,
    headers: HeaderMap,
    body: Bytes,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            request_uri: None,
            http_version: None,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.request_uri = Some(uri.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.http_version = Some(version.into());
        self
    }

    /// Adds a header; the name is lowercased like the framer does.
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            line: RequestLine {
                method: self.method.ok_or("method missing")?,
                request_uri: self.request_uri.ok_or("request uri missing")?,
                http_version: self.http_version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            },
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// Looks up a header by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    pub fn method(&self) -> &Method {
        &self.line.method
    }

    /// The body decoded as text with surrounding white space removed.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).trim().to_string()
    }

    /// Splits `Accept-Additions` into its items.
    ///
    /// Items are separated by commas; leading white space of each item is
    /// dropped and empty items are skipped.
    pub fn accept_additions(&self) -> Vec<String> {
        self.header("accept-additions")
            .map(|v| {
                v.split(',')
                    .map(str::trim_start)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
