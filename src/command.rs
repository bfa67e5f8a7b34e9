//! # Command Model
//!
//! A small, strongly typed description of a command tree.
//!
//! A [`Command`] is either a leaf (parameters + callback) or a group (ordered
//! children). Only leaves are invocable; groups contribute a path segment.
//!
//! ```rust
//! use clirest::command::{Command, Param};
//!
//! let hello = Command::leaf("hello", |kwargs, out| {
//!     for _ in 0..kwargs.i64("count")? {
//!         out.echo(format!("Hello {}!", kwargs.str("name")?));
//!     }
//!     Ok(None)
//! })
//! .help("Simple program that greets NAME for a total of COUNT times.")
//! .param(Param::option_int("count", 1).help("Number of greetings."))
//! .param(Param::option_str("name").help("The person to greet."));
//!
//! let cli = Command::group("cli").subcommand(hello);
//! assert_eq!(cli.leaf_count(), 1);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::echo::OutputRecorder;

/// Declared type of a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Float,
    Boolean,
    /// Opaque identifier, carried as a string.
    Uuid,
    /// Filesystem path. Not mapped to a schema type.
    Path,
    /// One of a fixed set of strings. Not mapped to a schema type.
    Choice(Vec<String>),
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::String => write!(f, "STRING"),
            ParamType::Integer => write!(f, "INT"),
            ParamType::Float => write!(f, "FLOAT"),
            ParamType::Boolean => write!(f, "BOOL"),
            ParamType::Uuid => write!(f, "UUID"),
            ParamType::Path => write!(f, "PATH"),
            ParamType::Choice(options) => write!(f, "CHOICE[{}]", options.join("|")),
        }
    }
}

/// Option (`--name`, documented with help) or positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Option,
    Argument,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: ParamType,
    pub default: Option<Value>,
    pub help: Option<String>,
    pub kind: ParamKind,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: ParamType, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            help: None,
            kind,
        }
    }

    pub fn option(name: impl Into<String>, ty: ParamType) -> Self {
        Self::new(name, ty, ParamKind::Option)
    }

    pub fn argument(name: impl Into<String>, ty: ParamType) -> Self {
        Self::new(name, ty, ParamKind::Argument)
    }

    /// String option without a default.
    pub fn option_str(name: impl Into<String>) -> Self {
        Self::option(name, ParamType::String)
    }

    pub fn option_int(name: impl Into<String>, default: i64) -> Self {
        Self::option(name, ParamType::Integer).default(default)
    }

    pub fn option_float(name: impl Into<String>, default: f64) -> Self {
        Self::option(name, ParamType::Float).default(default)
    }

    pub fn flag(name: impl Into<String>, default: bool) -> Self {
        Self::option(name, ParamType::Boolean).default(default)
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Default value, treating JSON null as absent.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref().filter(|v| !v.is_null())
    }

    pub fn is_option(&self) -> bool {
        self.kind == ParamKind::Option
    }
}

/// Errors raised by [`Kwargs`] accessors inside a callback.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("missing value for '{0}'")]
    Missing(String),
    #[error("'{name}' is not a {expected}: {found}")]
    WrongType {
        name: String,
        expected: &'static str,
        found: Value,
    },
}

/// Named arguments handed to a callback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kwargs(BTreeMap<String, Value>);

impl Kwargs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    /// Raw value; `None` when the key is absent.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    fn present(&self, name: &str) -> Result<&Value, CommandError> {
        self.0
            .get(name)
            .filter(|v| !v.is_null())
            .ok_or_else(|| CommandError::Missing(name.to_string()))
    }

    fn wrong(name: &str, expected: &'static str, found: &Value) -> CommandError {
        CommandError::WrongType {
            name: name.to_string(),
            expected,
            found: found.clone(),
        }
    }

    pub fn str(&self, name: &str) -> Result<&str, CommandError> {
        let v = self.present(name)?;
        v.as_str().ok_or_else(|| Self::wrong(name, "string", v))
    }

    /// `None` when absent or null.
    pub fn opt_str(&self, name: &str) -> Result<Option<&str>, CommandError> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => v
                .as_str()
                .map(Some)
                .ok_or_else(|| Self::wrong(name, "string", v)),
        }
    }

    pub fn i64(&self, name: &str) -> Result<i64, CommandError> {
        let v = self.present(name)?;
        v.as_i64().ok_or_else(|| Self::wrong(name, "integer", v))
    }

    pub fn f64(&self, name: &str) -> Result<f64, CommandError> {
        let v = self.present(name)?;
        v.as_f64().ok_or_else(|| Self::wrong(name, "number", v))
    }

    pub fn bool(&self, name: &str) -> Result<bool, CommandError> {
        let v = self.present(name)?;
        v.as_bool().ok_or_else(|| Self::wrong(name, "boolean", v))
    }
}

impl FromIterator<(String, Value)> for Kwargs {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Command callback: named arguments in, optional return value out.
pub type Callback =
    Arc<dyn Fn(&Kwargs, &mut OutputRecorder) -> anyhow::Result<Option<Value>> + Send + Sync>;

#[derive(Clone)]
pub enum CommandKind {
    Leaf { params: Vec<Param>, callback: Callback },
    Group { children: Vec<Command> },
}

#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub help: Option<String>,
    pub kind: CommandKind,
}

impl Command {
    pub fn leaf<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&Kwargs, &mut OutputRecorder) -> anyhow::Result<Option<Value>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            help: None,
            kind: CommandKind::Leaf {
                params: Vec::new(),
                callback: Arc::new(callback),
            },
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: None,
            kind: CommandKind::Group {
                children: Vec::new(),
            },
        }
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Add a parameter. Ignored on groups, with a warning.
    pub fn param(mut self, param: Param) -> Self {
        match &mut self.kind {
            CommandKind::Leaf { params, .. } => params.push(param),
            CommandKind::Group { .. } => {
                warn!(group = %self.name, param = %param.name, "Parameter on a command group ignored");
            }
        }
        self
    }

    /// Add a child. Ignored on leaves, with a warning.
    pub fn subcommand(mut self, child: Command) -> Self {
        match &mut self.kind {
            CommandKind::Group { children } => children.push(child),
            CommandKind::Leaf { .. } => {
                warn!(leaf = %self.name, child = %child.name, "Subcommand on a leaf command ignored");
            }
        }
        self
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, CommandKind::Group { .. })
    }

    /// Parameters of a leaf; empty for groups.
    pub fn params(&self) -> &[Param] {
        match &self.kind {
            CommandKind::Leaf { params, .. } => params,
            CommandKind::Group { .. } => &[],
        }
    }

    pub fn callback(&self) -> Option<&Callback> {
        match &self.kind {
            CommandKind::Leaf { callback, .. } => Some(callback),
            CommandKind::Group { .. } => None,
        }
    }

    pub fn children(&self) -> &[Command] {
        match &self.kind {
            CommandKind::Leaf { .. } => &[],
            CommandKind::Group { children } => children,
        }
    }

    pub fn child(&self, name: &str) -> Option<&Command> {
        self.children().iter().find(|c| c.name == name)
    }

    /// Help text, or `""`.
    pub fn help_text(&self) -> &str {
        self.help.as_deref().unwrap_or("")
    }

    /// Number of invocable leaves in this tree.
    pub fn leaf_count(&self) -> usize {
        match &self.kind {
            CommandKind::Leaf { .. } => 1,
            CommandKind::Group { children } => children.iter().map(Command::leaf_count).sum(),
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Command");
        s.field("name", &self.name).field("help", &self.help);
        match &self.kind {
            CommandKind::Leaf { params, .. } => s.field("params", params),
            CommandKind::Group { children } => s.field("children", children),
        };
        s.finish()
    }
}
