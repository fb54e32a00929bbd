use crate::{
    demo::demo_router,
    dispatcher::Dispatcher,
    logging::{init_logging_with_config, LogConfig, LogFormat},
    runtime_config::RuntimeConfig,
    server::{AppService, HttpServer, ServerHandle},
};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::sync::Arc;
use tracing::info;

/// Command-line interface for plainrouter
#[derive(Parser, Debug)]
#[command(name = "plainrouter")]
#[command(about = "Exact-match HTTP router demo server", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the demo routes until SIGINT/SIGTERM
    Serve {
        /// Address to bind
        #[arg(long, env = "PLAINROUTER_ADDR", default_value = "0.0.0.0:8080")]
        addr: String,

        /// Log level (overrides PLAINROUTER_LOG_LEVEL)
        #[arg(long)]
        log_level: Option<String>,

        /// Log output format (overrides PLAINROUTER_LOG_FORMAT)
        #[arg(long, value_enum)]
        log_format: Option<LogFormatArg>,
    },
    /// Print the demo route table and exit
    Routes,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Json,
    Pretty,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Pretty => LogFormat::Pretty,
        }
    }
}

/// Execute the parsed command.
///
/// # Errors
///
/// Returns an error if logging cannot be initialized, the address cannot be bound or
/// the server coroutine dies.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve {
            addr,
            log_level,
            log_format,
        } => {
            let mut log_config = LogConfig::from_env();
            if let Some(level) = log_level {
                log_config.log_level = level;
            }
            if let Some(format) = log_format {
                log_config.format = format.into();
            }
            let _log_guard = init_logging_with_config(&log_config)?;

            RuntimeConfig::from_env().apply();

            let dispatcher = Arc::new(Dispatcher::new(demo_router()));
            let service = AppService::new(dispatcher);
            let handle = HttpServer(service)
                .start(addr.as_str())
                .with_context(|| format!("failed to start server on {addr}"))?;
            handle.wait_ready().context("server did not come up")?;

            wait_for_shutdown(handle)
        }
        Commands::Routes => {
            demo_router().dump_routes();
            Ok(())
        }
    }
}

#[cfg(unix)]
fn wait_for_shutdown(handle: ServerHandle) -> anyhow::Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM]).context("failed to install signal handlers")?;
    if let Some(signal) = signals.forever().next() {
        info!(signal, "Shutdown signal received");
    }
    handle.stop();
    Ok(())
}

#[cfg(not(unix))]
fn wait_for_shutdown(handle: ServerHandle) -> anyhow::Result<()> {
    handle
        .join()
        .map_err(|_| anyhow::anyhow!("server coroutine panicked"))
}
