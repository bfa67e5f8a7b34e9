//! # Dispatcher Module
//!
//! Runs a matched leaf command for one request and turns the outcome into a
//! response.
//!
//! ## Request Flow
//!
//! 1. Every declared parameter starts at its default (JSON null when absent).
//! 2. Query values for declared parameters are coerced through
//!    [`crate::bridge::coerce`]; unknown keys are merged in verbatim.
//! 3. A fresh [`crate::echo::OutputRecorder`] is created and handed to the
//!    callback. The recording ends on every exit path, including panics.
//! 4. [`assemble`] builds the JSON envelope or raw body.
//!
//! ## Error Handling
//!
//! - Coercion failures become `400` responses (`TypeMismatch`).
//! - Callback errors and panics become `500` responses (`CallbackFailure`)
//!   carrying the output recorded before the failure.
//!
//! Invocations share no mutable state, so concurrent requests need no locking.

mod core;

pub use core::{assemble, build_kwargs, dispatch, invoke, HandlerResponse, Invocation};
