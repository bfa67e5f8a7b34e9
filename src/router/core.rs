//! Router core: route table construction and lookup.

use crate::command::{Command, CommandKind};
use crate::echo::OutputStyle;
use crate::error::{Error, Result};
use crate::ids::RequestId;
use crate::spec::{build_spec, render, SpecFragment};
use http::Method;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// File name of the OpenAPI document under the prefix.
pub const SPEC_FILE: &str = "apispec.json";
/// Directory of the Swagger UI page under the prefix.
pub const UI_DIR: &str = "apidocs";

/// Response options of one mounted command set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountOptions {
    /// JSON envelope (`true`) or raw body (`false`).
    pub json: bool,
    /// Rendering of recorded output.
    pub style: OutputStyle,
    /// Keep command output off the real console.
    pub silent: bool,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            json: true,
            style: OutputStyle::Plain,
            silent: true,
        }
    }
}

/// One routable leaf command.
#[derive(Debug)]
pub struct RouteEntry {
    pub method: Method,
    /// Full path including the prefix, e.g. `/api/cli/initdb`.
    pub path: String,
    /// The leaf command served at `path`.
    pub command: Command,
    /// Names of the enclosing groups, outermost first.
    pub groups: Vec<String>,
    /// Cached specification fragment.
    pub fragment: SpecFragment,
    /// Rendered documentation string (help, `---`, YAML).
    pub doc: String,
    pub options: MountOptions,
}

/// Result of resolving a request path.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub route: Arc<RouteEntry>,
    /// Query string parameters (populated by the server).
    pub query_params: HashMap<String, String>,
    /// Correlation id for the invocation span.
    pub request_id: RequestId,
}

impl RouteMatch {
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(String::as_str)
    }
}

/// Normalize a user supplied prefix to `""` or `/segment[/segment…]`.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn normalize_path(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidCommand("command name is empty".into()));
    }
    if name.contains('/') || name.contains('?') || name.chars().any(char::is_whitespace) {
        return Err(Error::InvalidCommand(format!(
            "command name {name:?} is not a valid path segment"
        )));
    }
    Ok(())
}

/// Depth-first walk collecting `(group path, leaf)` pairs.
fn collect_leaves<'a>(
    command: &'a Command,
    groups: &mut Vec<String>,
    out: &mut Vec<(Vec<String>, &'a Command)>,
) -> Result<()> {
    validate_name(&command.name)?;
    match &command.kind {
        CommandKind::Leaf { .. } => out.push((groups.clone(), command)),
        CommandKind::Group { children } => {
            if children.is_empty() {
                warn!(group = %command.name, "Command group has no subcommands");
            }
            let mut seen = HashSet::new();
            for child in children {
                if !seen.insert(child.name.as_str()) {
                    return Err(Error::InvalidCommand(format!(
                        "group {:?} has two subcommands named {:?}",
                        command.name, child.name
                    )));
                }
            }
            groups.push(command.name.clone());
            for child in children {
                collect_leaves(child, groups, out)?;
            }
            groups.pop();
        }
    }
    Ok(())
}

/// Route table for every mounted command tree.
#[derive(Debug, Clone, Default)]
pub struct Router {
    prefix: String,
    routes: Vec<Arc<RouteEntry>>,
    by_path: HashMap<String, Arc<RouteEntry>>,
}

impl Router {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: normalize_prefix(prefix),
            routes: Vec::new(),
            by_path: HashMap::new(),
        }
    }

    /// Normalized prefix (`""` when unset).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Paths served by the documentation endpoints.
    fn is_reserved(&self, path: &str) -> bool {
        path.strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .is_some_and(|rest| rest == SPEC_FILE || rest == UI_DIR)
    }

    /// Register one route per leaf of `command`.
    ///
    /// Nothing is registered when an error is returned.
    ///
    /// # Errors
    ///
    /// - `InvalidCommand` for bad names, duplicate siblings, a path that is
    ///   already registered, or a path owned by the documentation endpoints
    ///   (`{prefix}/apispec.json`, `{prefix}/apidocs`).
    /// - `UnsupportedType` when a parameter type has no schema mapping.
    pub fn mount(&mut self, command: &Command, options: MountOptions) -> Result<usize> {
        let mut leaves = Vec::new();
        collect_leaves(command, &mut Vec::new(), &mut leaves)?;

        let mut entries = Vec::with_capacity(leaves.len());
        for (groups, leaf) in leaves {
            let mut path = self.prefix.clone();
            for segment in groups.iter().chain(std::iter::once(&leaf.name)) {
                path.push('/');
                path.push_str(segment);
            }
            if self.is_reserved(&path) {
                return Err(Error::InvalidCommand(format!(
                    "route {path} is reserved for the API documentation"
                )));
            }
            if self.by_path.contains_key(&path) || entries.iter().any(|e: &RouteEntry| e.path == path) {
                return Err(Error::InvalidCommand(format!("route {path} is already registered")));
            }
            let fragment = build_spec(leaf)?;
            let doc = render(&fragment, leaf.help_text())?;
            debug!(path = %path, params = leaf.params().len(), "Route described");
            entries.push(RouteEntry {
                method: Method::GET,
                path,
                command: leaf.clone(),
                groups,
                fragment,
                doc,
                options,
            });
        }

        let count = entries.len();
        for entry in entries {
            info!(
                path = %entry.path,
                command = %entry.command.name,
                json = entry.options.json,
                style = %entry.options.style,
                "Route registered"
            );
            let entry = Arc::new(entry);
            self.by_path.insert(entry.path.clone(), Arc::clone(&entry));
            self.routes.push(entry);
        }
        Ok(count)
    }

    /// Registered routes in registration order.
    pub fn routes(&self) -> &[Arc<RouteEntry>] {
        &self.routes
    }

    /// Whether any method is registered for `path`.
    pub fn has_path(&self, path: &str) -> bool {
        self.by_path.contains_key(normalize_path(path))
    }

    /// Resolve a request. A single trailing slash is ignored.
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let entry = self.by_path.get(normalize_path(path))?;
        if entry.method != *method {
            return None;
        }
        Some(RouteMatch {
            route: Arc::clone(entry),
            query_params: HashMap::new(),
            request_id: RequestId::new(),
        })
    }
}
