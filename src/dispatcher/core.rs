//! Dispatcher core: argument decoding, invocation and response assembly.

use crate::bridge::coerce;
use crate::command::{Kwargs, Param};
use crate::echo::{OutputRecord, OutputRecorder, Passthrough};
use crate::error::{Error, Result};
use crate::router::{RouteEntry, RouteMatch};
use http::StatusCode;
use serde_json::{json, Value};
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::{debug, error, info, info_span};

/// Response produced for a request, before it is written to the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    pub status: StatusCode,
    pub content_type: &'static str,
    /// `Location` target for redirects.
    pub location: Option<&'static str>,
    pub body: Vec<u8>,
}

impl HandlerResponse {
    pub fn json(status: StatusCode, body: &Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            location: None,
            body: body.to_string().into_bytes(),
        }
    }

    pub fn text(content_type: &'static str, body: String) -> Self {
        Self {
            status: StatusCode::OK,
            content_type,
            location: None,
            body: body.into_bytes(),
        }
    }

    /// `302 Found` pointing at `location`.
    pub fn redirect(location: &'static str) -> Self {
        Self {
            status: StatusCode::FOUND,
            content_type: "text/plain",
            location: Some(location),
            body: Vec::new(),
        }
    }

    /// JSON error body with the error's status.
    pub fn error(err: &Error) -> Self {
        Self::json(err.status(), &err.to_json())
    }

    pub fn body_str(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap_or_default()
    }

    /// Parse the body as JSON, `Value::Null` when it is not JSON.
    pub fn body_json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

/// Successful outcome of running a callback.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Return value, `None` when the callback returned nothing or null.
    pub value: Option<Value>,
    pub record: OutputRecord,
}

/// Working argument set for a request.
///
/// # Errors
///
/// `TypeMismatch` when a query value cannot be coerced.
pub fn build_kwargs(params: &[Param], query: &HashMap<String, String>) -> Result<Kwargs> {
    let mut kwargs: Kwargs = params
        .iter()
        .map(|p| (p.name.clone(), p.default.clone().unwrap_or(Value::Null)))
        .collect();

    // Sorted so the first reported mismatch does not depend on hash order.
    let mut keys: Vec<&String> = query.keys().collect();
    keys.sort();
    for key in keys {
        let raw = &query[key];
        match params.iter().find(|p| &p.name == key) {
            Some(param) => {
                let value = coerce(raw, param)?;
                debug!(param = %key, raw = %raw, value = %value, "Query value coerced");
                kwargs.insert(key.clone(), value);
            }
            None => {
                debug!(param = %key, "Unknown query parameter passed through");
                kwargs.insert(key.clone(), Value::String(raw.clone()));
            }
        }
    }
    Ok(kwargs)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "callback panicked".to_string()
    }
}

/// Run the leaf command of `entry` with the given query.
///
/// # Errors
///
/// - `TypeMismatch` from argument decoding (the callback is not run).
/// - `CallbackFailure` when the callback returns an error or panics.
pub fn invoke(
    entry: &RouteEntry,
    query: &HashMap<String, String>,
    passthrough: Passthrough,
) -> Result<Invocation> {
    let command = &entry.command;
    let callback = command
        .callback()
        .ok_or_else(|| Error::InvalidCommand(format!("{} is not invocable", entry.path)))?;
    let kwargs = build_kwargs(command.params(), query)?;

    let mut recorder = OutputRecorder::begin(entry.options.style, passthrough);
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| (**callback)(&kwargs, &mut recorder)));
    let record = recorder.end();

    match outcome {
        Ok(Ok(value)) => Ok(Invocation {
            value: value.filter(|v| !v.is_null()),
            record,
        }),
        Ok(Err(err)) => {
            error!(command = %command.name, error = %err, "Command failed");
            Err(Error::CallbackFailure {
                command: command.name.clone(),
                message: format!("{err:#}"),
                stdout: record.buffer,
            })
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(command = %command.name, panic = %message, "Command panicked");
            Err(Error::CallbackFailure {
                command: command.name.clone(),
                message,
                stdout: record.buffer,
            })
        }
    }
}

/// Build the response for a successful invocation.
///
/// - JSON mode: `{"status": "success", "stdout": …}` plus `return` when a
///   value was returned.
/// - Raw mode with a value: the value's string form as `text/plain`.
/// - Raw mode without a value: the recording as `text/{style}`.
pub fn assemble(value: Option<Value>, record: &OutputRecord, json: bool) -> HandlerResponse {
    let value = value.filter(|v| !v.is_null());
    if json {
        let mut body = json!({
            "status": "success",
            "stdout": record.buffer,
        });
        if let Some(value) = value {
            body["return"] = value;
        }
        HandlerResponse::json(StatusCode::OK, &body)
    } else if let Some(value) = value {
        let text = match value {
            Value::String(s) => s,
            other => other.to_string(),
        };
        HandlerResponse::text("text/plain", text)
    } else {
        HandlerResponse::text(record.style.content_type(), record.buffer.clone())
    }
}

/// Invoke a matched route and produce its response, errors included.
pub fn dispatch(route_match: &RouteMatch) -> HandlerResponse {
    let entry = &route_match.route;
    let span = info_span!("invoke", request_id = %route_match.request_id, path = %entry.path);
    let _guard = span.enter();

    info!(
        command = %entry.command.name,
        query_params = ?route_match.query_params,
        "Command invocation start"
    );
    let started = Instant::now();
    let passthrough = Passthrough::for_silent(entry.options.silent);
    let response = match invoke(entry, &route_match.query_params, passthrough) {
        Ok(inv) => assemble(inv.value, &inv.record, entry.options.json),
        Err(err) => HandlerResponse::error(&err),
    };
    info!(
        status = response.status.as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "Command invocation complete"
    );
    response
}
