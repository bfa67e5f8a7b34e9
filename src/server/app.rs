use super::docs::DocService;
use super::service::AppService;
use crate::command::Command;
use crate::error::Result;
use crate::router::{MountOptions, Router};
use crate::runtime_config::RestConfig;
use tracing::info;

/// Entry point for assembling an application from command trees.
pub struct App;

impl App {
    pub fn builder(config: RestConfig) -> AppBuilder {
        AppBuilder {
            config,
            commands: Vec::new(),
        }
    }
}

/// Collects command trees and their response options.
///
/// ```
/// use clirest::{App, Command, MountOptions, RestConfig};
///
/// let service = App::builder(RestConfig::default().url_prefix("api"))
///     .command(Command::leaf("hello", |_, out| {
///         out.echo("Hello World!");
///         Ok(None)
///     }))
///     .command_with(
///         Command::leaf("raw", |_, _| Ok(None)),
///         MountOptions { json: false, ..MountOptions::default() },
///     )
///     .build()
///     .unwrap();
/// assert_eq!(service.router().routes().len(), 2);
/// ```
pub struct AppBuilder {
    config: RestConfig,
    commands: Vec<(Command, MountOptions)>,
}

impl AppBuilder {
    /// Mount `command` with the options of the application config.
    pub fn command(mut self, command: Command) -> Self {
        let options = self.config.mount_options();
        self.commands.push((command, options));
        self
    }

    /// Mount `command` with its own response options.
    pub fn command_with(mut self, command: Command, options: MountOptions) -> Self {
        self.commands.push((command, options));
        self
    }

    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    /// Build the route table and the documentation.
    ///
    /// # Errors
    ///
    /// Any registration error (`InvalidCommand`, `UnsupportedType`,
    /// `Serialize`); no partially built application is returned.
    pub fn build(self) -> Result<AppService> {
        let mut router = Router::new(&self.config.url_prefix);
        for (command, options) in &self.commands {
            router.mount(command, *options)?;
        }
        let docs = DocService::new(&router, &self.config.title, &self.config.version)?;
        info!(
            prefix = %router.prefix(),
            routes = router.routes().len(),
            docs = %docs.ui_path,
            "Application assembled"
        );
        Ok(AppService::new(router, docs))
    }
}
