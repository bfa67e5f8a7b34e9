//! # Router Module
//!
//! Turns command trees into a route table and resolves request paths to leaf
//! commands.
//!
//! ## Path layout
//!
//! Every leaf is served at `{prefix}/{group}/…/{leaf}`: the optional
//! application-wide prefix, then the name of each ancestor group, then the
//! leaf's own name. A group `cli` with leaves `initdb` and `dropdb` yields
//! `/cli/initdb` and `/cli/dropdb`; a top-level leaf `hello` yields `/hello`.
//!
//! ## Example
//!
//! ```rust
//! use clirest::command::Command;
//! use clirest::router::{MountOptions, Router};
//! use http::Method;
//!
//! let cli = Command::group("cli")
//!     .subcommand(Command::leaf("initdb", |_, out| { out.echo("Initialized"); Ok(None) }))
//!     .subcommand(Command::leaf("dropdb", |_, out| { out.echo("Dropped"); Ok(None) }));
//!
//! let mut router = Router::new("/api");
//! router.mount(&cli, MountOptions::default()).unwrap();
//!
//! let matched = router.route(&Method::GET, "/api/cli/initdb/").unwrap();
//! assert_eq!(matched.route.command.name, "initdb");
//! ```
//!
//! Route entries are built once and shared behind `Arc`; lookups are a single
//! hash lookup on the normalized path.

mod core;
#[cfg(test)]
mod tests;

pub use core::{normalize_prefix, MountOptions, RouteEntry, RouteMatch, Router, SPEC_FILE, UI_DIR};
