use crate::demo;
use crate::echo::OutputStyle;
use crate::runtime_config::{RestConfig, RuntimeConfig};
use crate::server::{App, AppService, HttpServer};
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

/// Command-line interface for clirest
///
/// Serves the demonstration command tree over HTTP and inspects the routes
/// and the OpenAPI document it produces.
#[derive(Parser)]
#[command(name = "clirest")]
#[command(about = "Expose a command tree as an HTTP API", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Serve the demo commands over HTTP
    Serve {
        /// Interface to bind
        #[arg(long, env = "CLIREST_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to bind
        #[arg(short, long, env = "CLIREST_PORT", default_value_t = 5000)]
        port: u16,

        /// URL prefix for every route and the documentation
        #[arg(long, env = "CLIREST_URL_PREFIX", default_value = "")]
        prefix: String,

        /// Return raw output instead of the JSON envelope
        #[arg(long, default_value_t = false)]
        raw: bool,

        /// Output style: plain or html
        #[arg(long, default_value = "plain")]
        style: OutputStyle,
    },
    /// Print every route with its documentation string
    Routes {
        /// URL prefix for every route
        #[arg(long, env = "CLIREST_URL_PREFIX", default_value = "")]
        prefix: String,
    },
    /// Print the OpenAPI document as JSON
    Openapi {
        /// URL prefix for every route
        #[arg(long, env = "CLIREST_URL_PREFIX", default_value = "")]
        prefix: String,
    },
    /// Invoke a route in-process, echoing command output to the console
    Call {
        /// Route path, e.g. `/hello2`
        path: String,

        /// Query parameters as `key=value`
        #[arg(value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {s:?}"))
}

/// Build the demo application.
pub fn demo_app(config: RestConfig) -> crate::Result<AppService> {
    demo::commands()
        .into_iter()
        .fold(App::builder(config), |builder, cmd| builder.command(cmd))
        .build()
}

/// Request target for `call`: path plus URL-encoded query.
pub fn request_target(path: &str, params: &[(String, String)]) -> String {
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    if params.is_empty() {
        return path;
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{path}?{query}")
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if the demo tree cannot be registered, the server fails
/// to start, or a `call` does not succeed.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve {
            host,
            port,
            prefix,
            raw,
            style,
        } => {
            let config = RestConfig::default()
                .url_prefix(prefix)
                .json(!raw)
                .style(style);
            let runtime = RuntimeConfig::from_env(&config.config_prefix);
            may::config().set_stack_size(runtime.stack_size);

            let service = demo_app(config)?;
            let docs = service.docs().ui_path.clone();
            let handle = HttpServer(service)
                .start((host.as_str(), port))
                .with_context(|| format!("failed to bind {host}:{port}"))?;
            info!(addr = %handle.addr(), docs = %docs, "Serving demo commands");
            handle
                .join()
                .map_err(|e| anyhow::anyhow!("server coroutine panicked: {e:?}"))?;
            Ok(())
        }
        Commands::Routes { prefix } => {
            let service = demo_app(RestConfig::default().url_prefix(prefix))?;
            for route in service.router().routes() {
                println!("{} {}", route.method, route.path);
                println!("{}\n", route.doc);
            }
            Ok(())
        }
        Commands::Openapi { prefix } => {
            let service = demo_app(RestConfig::default().url_prefix(prefix))?;
            let json = serde_json::to_string_pretty(service.docs().document())?;
            println!("{json}");
            Ok(())
        }
        Commands::Call { path, params } => {
            let service = demo_app(RestConfig::default().silent(false))?;
            let target = request_target(&path, &params);
            let res = service.handle("GET", &target);
            println!("{}", res.body_str());
            if res.status.is_success() {
                Ok(())
            } else {
                anyhow::bail!("{target} returned {}", res.status)
            }
        }
    }
}

