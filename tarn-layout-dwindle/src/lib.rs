pub mod cli;
pub mod command;
pub mod config;
pub mod controller;
pub mod dwindle;
pub mod output;

/// Namespace this generator registers its layout objects under.
pub const NAMESPACE: &str = "tarn-dwindle";

pub use cli::Args;
pub use config::Config;
pub use controller::Controller;

#[cfg(test)]
mod testing;
