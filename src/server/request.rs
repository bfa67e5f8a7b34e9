use may_minihttp::Request;
use std::collections::HashMap;
use tracing::debug;

/// Parsed HTTP request data used by `AppService`.
#[derive(Debug, PartialEq)]
pub struct ParsedRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request path without the query string
    pub path: String,
    /// Parsed query string parameters
    pub query_params: HashMap<String, String>,
    /// Value of the `X-Request-Id` header, if sent
    pub request_id: Option<String>,
}

impl ParsedRequest {
    /// Build from a method and a raw request target (`/path?query`).
    pub fn from_target(method: &str, raw_path: &str, request_id: Option<String>) -> Self {
        Self {
            method: method.to_string(),
            path: strip_query(raw_path).to_string(),
            query_params: parse_query_params(raw_path),
            request_id,
        }
    }
}

/// Parse query string parameters from a URL path
///
/// Extracts everything after the `?` character and URL-decodes parameter names
/// and values. Repeated keys keep the last value.
///
/// # Arguments
///
/// * `path` - The full URL path (e.g., `/hello2?count=3&name=Bob`)
pub fn parse_query_params(path: &str) -> HashMap<String, String> {
    match path.split_once('?') {
        Some((_, query_str)) => url::form_urlencoded::parse(query_str.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
        None => HashMap::new(),
    }
}

/// Strip the query string from a raw request target.
pub fn strip_query(raw_path: &str) -> &str {
    raw_path.split('?').next().unwrap_or("/")
}

/// Extract method, path and query from a `may_minihttp::Request`.
///
/// Request bodies are ignored; every generated route is a `GET`.
pub fn parse_request(req: &Request) -> ParsedRequest {
    let request_id = req
        .headers()
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case("x-request-id"))
        .map(|h| String::from_utf8_lossy(h.value).into_owned());
    let parsed = ParsedRequest::from_target(req.method(), req.path(), request_id);

    debug!(
        method = %parsed.method,
        path = %parsed.path,
        param_count = parsed.query_params.len(),
        "HTTP request parsed"
    );

    parsed
}
