//! # CLI Module
//!
//! Command-line interface of the `clirest` binary, which serves the demo
//! command tree from [`crate::demo`].
//!
//! ## Commands
//!
//! ### `serve`
//!
//! ```bash
//! clirest serve --port 5000 --prefix api
//! ```
//!
//! Options:
//! - `--host <HOST>` - interface to bind (`CLIREST_HOST`, default `127.0.0.1`)
//! - `--port <PORT>` - port to bind (`CLIREST_PORT`, default `5000`)
//! - `--prefix <PREFIX>` - URL prefix (`CLIREST_URL_PREFIX`)
//! - `--raw` - raw bodies instead of the JSON envelope
//! - `--style <plain|html>` - rendering of recorded output
//!
//! ### `routes` / `openapi`
//!
//! Print the route table with documentation strings, or the OpenAPI document.
//!
//! ### `call`
//!
//! ```bash
//! clirest call /hello2 count=3 name=Bob
//! ```
//!
//! Runs the route in-process. Command output is echoed to the console as it
//! is produced and the response body is printed afterwards.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{demo_app, request_target, run_cli, Cli, Commands};
