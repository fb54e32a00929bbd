//! # CLI Module
//!
//! The `plainrouter` binary.
//!
//! ## Commands
//!
//! ### `serve`
//!
//! Start the HTTP server with the demo routes (see [`crate::demo`]) and run until
//! SIGINT or SIGTERM:
//!
//! ```bash
//! plainrouter serve --addr 127.0.0.1:8080 --log-format pretty
//! ```
//!
//! Options:
//! - `--addr <ADDR>` - bind address (env `PLAINROUTER_ADDR`, default `0.0.0.0:8080`)
//! - `--log-level <LEVEL>` - overrides `PLAINROUTER_LOG_LEVEL`
//! - `--log-format <json|pretty>` - overrides `PLAINROUTER_LOG_FORMAT`
//!
//! ### `routes`
//!
//! Print the route table:
//!
//! ```bash
//! plainrouter routes
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, Cli, Commands, LogFormatArg};
