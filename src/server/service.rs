use super::docs::DocService;
use super::request::{parse_request, ParsedRequest};
use super::response::write_handler_response;
use crate::dispatcher::{dispatch, HandlerResponse};
use crate::ids::RequestId;
use crate::router::Router;
use http::{Method, StatusCode};
use may_minihttp::{HttpService, Request, Response};
use serde_json::json;
use std::io;
use std::sync::Arc;
use tracing::{debug, warn};

/// Request handler shared by every connection coroutine.
///
/// The route table and the rendered documentation are immutable once the
/// application is built, so clones share them without locking.
#[derive(Clone)]
pub struct AppService {
    router: Arc<Router>,
    docs: Arc<DocService>,
}

impl AppService {
    pub fn new(router: Router, docs: DocService) -> Self {
        Self {
            router: Arc::new(router),
            docs: Arc::new(docs),
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn docs(&self) -> &DocService {
        &self.docs
    }

    /// Resolve one request target to a response.
    ///
    /// Documentation endpoints are checked first, then the route table.
    /// A registered path requested with another method yields `405`,
    /// anything else unknown yields `404`.
    pub fn handle(&self, method: &str, raw_path: &str) -> HandlerResponse {
        self.handle_with_id(method, raw_path, None)
    }

    /// Like [`AppService::handle`], reusing a caller supplied request id.
    pub fn handle_with_id(
        &self,
        method: &str,
        raw_path: &str,
        request_id: Option<&str>,
    ) -> HandlerResponse {
        self.handle_parsed(ParsedRequest::from_target(
            method,
            raw_path,
            request_id.map(str::to_string),
        ))
    }

    /// Resolve an already parsed request; the query is not parsed again.
    pub fn handle_parsed(&self, request: ParsedRequest) -> HandlerResponse {
        let ParsedRequest {
            method,
            path,
            query_params,
            request_id,
        } = request;
        let path = path.as_str();
        let Ok(method) = Method::from_bytes(method.as_bytes()) else {
            return HandlerResponse::json(
                StatusCode::BAD_REQUEST,
                &json!({"error": "Bad Request", "method": method, "path": path}),
            );
        };

        if method == Method::GET {
            if let Some(hr) = self.docs.handle(path) {
                debug!(path = %path, status = hr.status.as_u16(), "Documentation endpoint");
                return hr;
            }
        }

        match self.router.route(&method, path) {
            Some(mut route_match) => {
                route_match.query_params = query_params;
                route_match.request_id = RequestId::from_header_or_new(request_id.as_deref());
                dispatch(&route_match)
            }
            None if self.router.has_path(path) => {
                warn!(method = %method, path = %path, "Method not allowed");
                HandlerResponse::json(
                    StatusCode::METHOD_NOT_ALLOWED,
                    &json!({"error": "Method Not Allowed", "method": method.as_str(), "path": path}),
                )
            }
            None => {
                warn!(method = %method, path = %path, "No route matched");
                HandlerResponse::json(
                    StatusCode::NOT_FOUND,
                    &json!({"error": "Not Found", "method": method.as_str(), "path": path}),
                )
            }
        }
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let hr = self.handle_parsed(parse_request(&req));
        if hr.location.is_some() {
            write_handler_response(res, hr, &[self.docs.location_header()]);
        } else {
            write_handler_response(res, hr, &[]);
        }
        Ok(())
    }
}
