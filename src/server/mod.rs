//! # Server Module
//!
//! HTTP surface of the application on top of `may_minihttp`.
//!
//! - [`AppService`] resolves requests against the route table and the
//!   documentation service and writes the response.
//! - [`App`] assembles an `AppService` from one or more command trees.
//! - [`HttpServer`] / [`ServerHandle`] start and stop the coroutine server.

pub mod app;
pub mod docs;
pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use app::{App, AppBuilder};
pub use docs::DocService;
pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_query_params, parse_request, ParsedRequest};
pub use service::AppService;
