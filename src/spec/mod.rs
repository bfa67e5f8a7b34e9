//! # Specification Module
//!
//! Builds the OpenAPI description of every generated route.
//!
//! - [`build_spec`] turns a leaf command into a [`SpecFragment`] (tags, summary,
//!   query parameters, fixed response schema).
//! - [`render`] serializes a fragment to YAML, prefixed with the command help
//!   and a `---` separator, producing the route's documentation string.
//! - [`ApiDocument`] collects fragments into the document served at
//!   `{prefix}/apispec.json`.
//!
//! Everything here is a pure function of static command metadata; fragments are
//! computed once at registration and cached on the route entry.

mod document;
mod fragment;

pub use document::{ApiDocument, Info, Operation, PathItem, OPENAPI_VERSION};
pub use fragment::{
    build_spec, render, response_schema, to_param, ParameterSchema, ParameterSpec, SpecFragment,
};
