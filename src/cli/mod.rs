//! CLI layer: argument parsing, session and command dispatch

pub mod args;
pub mod commands;
pub mod error;
pub mod output;
pub mod session;

pub use args::{Cli, Commands};
pub use error::{CliError, CliResult};
pub use session::{Reply, Session, SessionCommand};
