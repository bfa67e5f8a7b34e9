//! # Runtime Configuration Module
//!
//! Two layers of configuration:
//!
//! - [`RestConfig`] is built in code and describes how a command tree is
//!   exposed: URL prefix, JSON or raw responses, output style, console
//!   silence and the document title/version.
//! - [`RuntimeConfig`] is loaded from environment variables named with the
//!   configured prefix (`CLIREST_` by default) and tunes the coroutine runtime.
//!
//! ## Environment Variables
//!
//! ### `{prefix}STACK_SIZE`
//!
//! Stack size for the coroutines that serve requests. Accepts decimal
//! (`65536`) or hexadecimal (`0x10000`). Command callbacks run inline on the
//! request coroutine, so the default is larger than a bare router needs.
//!
//! Default: `0x10000` (64 KB)
//!
//! ## Usage
//!
//! ```rust
//! use clirest::runtime_config::{RestConfig, RuntimeConfig};
//! use clirest::echo::OutputStyle;
//!
//! let config = RestConfig::default().url_prefix("api").style(OutputStyle::Html);
//! assert_eq!(config.url_prefix, "api");
//! assert!(config.json);
//!
//! let runtime = RuntimeConfig::from_env(&config.config_prefix);
//! assert!(runtime.stack_size > 0);
//! ```

use crate::echo::OutputStyle;
use crate::router::MountOptions;
use std::env;

/// Prefix of every environment variable read by the crate.
pub const DEFAULT_CONFIG_PREFIX: &str = "CLIREST_";

const DEFAULT_STACK_SIZE: usize = 0x10000;

/// How a command tree is exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestConfig {
    /// Prepended to every generated route and to the documentation routes.
    pub url_prefix: String,
    /// JSON envelope (`true`) or raw body (`false`).
    pub json: bool,
    pub style: OutputStyle,
    /// Keep command output off the real console.
    pub silent: bool,
    /// `info.title` of the OpenAPI document.
    pub title: String,
    /// `info.version` of the OpenAPI document.
    pub version: String,
    /// Prefix for environment-driven settings.
    pub config_prefix: String,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            url_prefix: String::new(),
            json: true,
            style: OutputStyle::Plain,
            silent: true,
            title: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            config_prefix: DEFAULT_CONFIG_PREFIX.to_string(),
        }
    }
}

impl RestConfig {
    pub fn url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into();
        self
    }

    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn config_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config_prefix = prefix.into();
        self
    }

    /// Response options applied to command trees mounted without overrides.
    pub fn mount_options(&self) -> MountOptions {
        MountOptions {
            json: self.json,
            style: self.style,
            silent: self.silent,
        }
    }
}

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes (default: 64 KB / 0x10000)
    pub stack_size: usize,
}

fn parse_size(val: &str) -> Option<usize> {
    let val = val.trim();
    match val.strip_prefix("0x").or_else(|| val.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    }
}

impl RuntimeConfig {
    /// Load configuration from `{prefix}*` environment variables.
    pub fn from_env(prefix: &str) -> Self {
        let stack_size = env::var(format!("{prefix}STACK_SIZE"))
            .ok()
            .and_then(|v| parse_size(&v))
            .filter(|&size| size > 0)
            .unwrap_or(DEFAULT_STACK_SIZE);
        RuntimeConfig { stack_size }
    }
}
