use clap::Parser;
use clirest::cli::{run_cli, Cli};
use clirest::logging::{init_logging_with_config, LogConfig};
use clirest::runtime_config::DEFAULT_CONFIG_PREFIX;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging_with_config(&LogConfig::from_env(DEFAULT_CONFIG_PREFIX))?;
    run_cli(cli)
}
