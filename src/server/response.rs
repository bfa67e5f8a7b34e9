use crate::dispatcher::HandlerResponse;
use may_minihttp::Response;

fn content_type_header(content_type: &str) -> &'static str {
    match content_type {
        "application/json" => "Content-Type: application/json",
        "text/plain" => "Content-Type: text/plain; charset=utf-8",
        "text/html" => "Content-Type: text/html; charset=utf-8",
        _ => "Content-Type: application/octet-stream",
    }
}

/// Write a `HandlerResponse` plus any extra header lines.
pub fn write_handler_response(res: &mut Response, hr: HandlerResponse, extra_headers: &[&'static str]) {
    let reason = hr.status.canonical_reason().unwrap_or("OK");
    res.status_code(hr.status.as_u16() as usize, reason);
    res.header(content_type_header(hr.content_type));
    for &header in extra_headers {
        res.header(header);
    }
    res.body_vec(hr.body);
}
