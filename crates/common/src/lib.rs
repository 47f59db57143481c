pub mod config;
pub mod logging;
mod macros;

pub use config::Environment;
pub use logging::setup_logging;
