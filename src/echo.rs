//! # Output Recorder
//!
//! Records every `echo` call a command makes during one invocation.
//!
//! A fresh [`OutputRecorder`] is handed to each callback, so recordings never
//! leak between concurrent requests and nothing global is rebound. The recorder
//! is consumed by [`OutputRecorder::end`], which yields the finished
//! [`OutputRecord`].
//!
//! ## Styles
//!
//! - [`OutputStyle::Plain`]: messages joined by a single `\n`, no trailing newline.
//! - [`OutputStyle::Html`]: one `<p>` element per message, with an inline color
//!   style when a color is given.
//!
//! ## Known limitations
//!
//! ANSI escape sequences are not interpreted and flushes are not modelled.
//! Error-stream output is recorded exactly like normal output; only the
//! pass-through write and [`OutputRecord::stderr_calls`] see the difference.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use tracing::warn;

use crate::error::Error;

/// Rendering of the recorded buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    #[default]
    Plain,
    Html,
}

impl OutputStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputStyle::Plain => "plain",
            OutputStyle::Html => "html",
        }
    }

    /// `text/plain` or `text/html`.
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputStyle::Plain => "text/plain",
            OutputStyle::Html => "text/html",
        }
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(OutputStyle::Plain),
            "html" => Ok(OutputStyle::Html),
            other => Err(Error::InvalidStyle(other.to_string())),
        }
    }
}

/// Flags of a single output call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoOptions {
    /// Append a newline on pass-through (default `true`).
    pub nl: bool,
    /// Target the error stream.
    pub err: bool,
    /// Color name, e.g. `"red"`.
    pub color: Option<String>,
}

impl Default for EchoOptions {
    fn default() -> Self {
        Self {
            nl: true,
            err: false,
            color: None,
        }
    }
}

impl EchoOptions {
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn err() -> Self {
        Self {
            err: true,
            ..Self::default()
        }
    }

    pub fn no_newline() -> Self {
        Self {
            nl: false,
            ..Self::default()
        }
    }
}

/// Where output goes besides the recording.
#[derive(Default)]
pub enum Passthrough {
    /// Silent mode: nothing reaches the real console.
    #[default]
    Discard,
    /// Real stdout, or stderr for error-stream calls.
    Console,
    /// Any writer; error-stream calls go to the same writer.
    Writer(Box<dyn Write + Send>),
}

impl Passthrough {
    /// `Discard` when silent, `Console` otherwise.
    pub fn for_silent(silent: bool) -> Self {
        if silent {
            Passthrough::Discard
        } else {
            Passthrough::Console
        }
    }

    fn write(&mut self, message: &str, opts: &EchoOptions) -> io::Result<()> {
        let newline: &[u8] = if opts.nl { b"\n" } else { b"" };
        match self {
            Passthrough::Discard => Ok(()),
            Passthrough::Console if opts.err => {
                let mut stderr = io::stderr().lock();
                stderr.write_all(message.as_bytes())?;
                stderr.write_all(newline)?;
                stderr.flush()
            }
            Passthrough::Console => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(message.as_bytes())?;
                stdout.write_all(newline)?;
                stdout.flush()
            }
            Passthrough::Writer(w) => {
                w.write_all(message.as_bytes())?;
                w.write_all(newline)?;
                w.flush()
            }
        }
    }
}

impl fmt::Debug for Passthrough {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Passthrough::Discard => f.write_str("Discard"),
            Passthrough::Console => f.write_str("Console"),
            Passthrough::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

/// Finished recording of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputRecord {
    pub buffer: String,
    pub style: OutputStyle,
    /// Number of calls that targeted the error stream.
    pub stderr_calls: usize,
}

/// Recording sink handed to a command callback.
#[derive(Debug)]
pub struct OutputRecorder {
    buffer: String,
    style: OutputStyle,
    calls: usize,
    stderr_calls: usize,
    passthrough: Passthrough,
}

impl OutputRecorder {
    /// Start a recording for one invocation.
    pub fn begin(style: OutputStyle, passthrough: Passthrough) -> Self {
        Self {
            buffer: String::new(),
            style,
            calls: 0,
            stderr_calls: 0,
            passthrough,
        }
    }

    /// Recording with no pass-through.
    pub fn silent(style: OutputStyle) -> Self {
        Self::begin(style, Passthrough::Discard)
    }

    /// Echo a line of output.
    pub fn echo(&mut self, message: impl AsRef<str>) {
        self.echo_with(message, EchoOptions::default());
    }

    /// Echo colored output.
    pub fn secho(&mut self, message: impl AsRef<str>, color: impl Into<String>) {
        self.echo_with(message, EchoOptions::color(color));
    }

    /// Echo with explicit flags.
    pub fn echo_with(&mut self, message: impl AsRef<str>, opts: EchoOptions) {
        let message = message.as_ref();
        match self.style {
            OutputStyle::Plain => self.record_plain(message),
            OutputStyle::Html => self.record_html(message, opts.color.as_deref()),
        }
        self.calls += 1;
        if opts.err {
            self.stderr_calls += 1;
        }
        if let Err(e) = self.passthrough.write(message, &opts) {
            warn!(error = %e, "Output pass-through write failed");
        }
    }

    fn record_plain(&mut self, message: &str) {
        if self.calls > 0 {
            self.buffer.push('\n');
        }
        self.buffer.push_str(message);
    }

    fn record_html(&mut self, message: &str, color: Option<&str>) {
        match color {
            Some(color) => {
                self.buffer.push_str("<p style=\"color:");
                self.buffer.push_str(color);
                self.buffer.push_str(";\">");
            }
            None => self.buffer.push_str("<p>"),
        }
        self.buffer.push_str(message);
        self.buffer.push_str("</p>");
    }

    /// Text recorded so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn style(&self) -> OutputStyle {
        self.style
    }

    /// Finish the recording.
    pub fn end(self) -> OutputRecord {
        OutputRecord {
            buffer: self.buffer,
            style: self.style,
            stderr_calls: self.stderr_calls,
        }
    }
}
