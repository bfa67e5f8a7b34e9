//! # clirest
//!
//! **clirest** exposes a tree of command-line commands as an HTTP API, with an
//! OpenAPI document and a Swagger UI page generated from the same tree.
//!
//! ## Overview
//!
//! Each leaf command becomes a `GET` route whose path mirrors the command
//! hierarchy (`/{prefix}/{group…}/{leaf}`). Query parameters are converted to
//! the declared parameter types, the command callback runs with a fresh
//! output recorder, and the recorded output comes back as a JSON envelope or
//! as a raw text/HTML body.
//!
//! ## Architecture
//!
//! - **[`command`]** - command tree model: groups, leaves, parameters, keyword arguments
//! - **[`echo`]** - per-invocation output recorder (plain or HTML)
//! - **[`bridge`]** - parameter type to schema type mapping and query value coercion
//! - **[`spec`]** - per-command OpenAPI fragments and the full document
//! - **[`router`]** - route table built from command trees
//! - **[`dispatcher`]** - runs a matched command and assembles the response
//! - **[`server`]** - `may_minihttp` service, documentation endpoints and app assembly
//! - **[`runtime_config`]** / **[`logging`]** - configuration and tracing setup
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Service as AppService
//!     participant Router
//!     participant Dispatcher
//!     participant Callback as Command callback
//!
//!     Client->>Service: GET /api/hello2?count=3&name=Bob
//!     Service->>Router: route(GET, /api/hello2)
//!     Router-->>Service: RouteMatch
//!     Service->>Dispatcher: dispatch(match)
//!     Dispatcher->>Dispatcher: coerce query values
//!     Dispatcher->>Callback: call(kwargs, recorder)
//!     Callback-->>Dispatcher: Ok(None)
//!     Dispatcher-->>Client: {"status":"success","stdout":"Hello Bob!\n…"}
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use clirest::{create_app, Command, Param, RestConfig};
//!
//! let hello2 = Command::leaf("hello2", |kwargs, out| {
//!     for _ in 0..kwargs.i64("count")? {
//!         out.echo(format!("Hello {}!", kwargs.str("name")?));
//!     }
//!     Ok(None)
//! })
//! .help("Simple program that greets NAME for a total of COUNT times.")
//! .param(Param::option_int("count", 1).help("Number of greetings."))
//! .param(Param::option_str("name").help("The person to greet."));
//!
//! let service = create_app(hello2, RestConfig::default().url_prefix("api")).unwrap();
//! let res = service.handle("GET", "/api/hello2?count=2&name=Bob");
//! assert_eq!(res.body_json()["stdout"], "Hello Bob!\nHello Bob!");
//! ```
//!
//! To serve over HTTP use [`run_app`], which also applies the coroutine
//! stack size from [`RuntimeConfig`].

pub mod bridge;
pub mod cli;
pub mod command;
pub mod demo;
pub mod dispatcher;
pub mod echo;
pub mod error;
pub mod ids;
pub mod logging;
pub mod router;
pub mod runtime_config;
pub mod server;
pub mod spec;

pub use command::{Command, CommandError, CommandKind, Kwargs, Param, ParamKind, ParamType};
pub use dispatcher::HandlerResponse;
pub use echo::{EchoOptions, OutputRecorder, OutputStyle, Passthrough};
pub use error::{Error, Result};
pub use router::{MountOptions, Router};
pub use runtime_config::{RestConfig, RuntimeConfig};
pub use server::{App, AppBuilder, AppService, HttpServer, ServerHandle};

use std::net::ToSocketAddrs;
use tracing::info;

/// Assemble an application from a single command tree.
///
/// # Errors
///
/// Fails when the tree cannot be registered (see [`AppBuilder::build`]).
pub fn create_app(command: Command, config: RestConfig) -> Result<AppService> {
    App::builder(config).command(command).build()
}

/// Assemble an application and start serving it on `addr`.
///
/// # Errors
///
/// Fails on registration errors or when the address cannot be bound.
pub fn run_app<A: ToSocketAddrs>(
    command: Command,
    config: RestConfig,
    addr: A,
) -> anyhow::Result<ServerHandle> {
    let runtime = RuntimeConfig::from_env(&config.config_prefix);
    may::config().set_stack_size(runtime.stack_size);

    let service = create_app(command, config)?;
    let handle = HttpServer(service).start(addr)?;
    info!(addr = %handle.addr(), stack_size = runtime.stack_size, "Server started");
    Ok(handle)
}
