#![forbid(unsafe_code)]

//! Line-mode driver for the dashboard terminal.
//!
//! Each stdin line is submitted to a [`dterm::Console`] as if typed into the
//! overlay; new scrollback records are printed to stdout. Deferred loads and
//! autosave advance on a fixed tick between lines.

pub mod cli;
pub mod error;
pub mod loader;
pub mod session;

pub use cli::{Cli, run, run_from_env};
pub use error::{CliError, Result};
pub use loader::HttpLoader;
pub use session::Session;
