//! DarkClip command-line front end.
//!
//! Configuration, logging setup and the script/query inputs used by the
//! `darkclip` binary.

pub mod config;
pub mod error;
pub mod input;
pub mod logging;

pub use config::AppConfig;
pub use error::{CliError, CliResult};
