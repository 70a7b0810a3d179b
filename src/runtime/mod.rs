mod commands;
mod config;
mod error;
mod logging;

pub use commands::Commands;
pub use config::*;
pub use error::Error;
pub use logging::*;
