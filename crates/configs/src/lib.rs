//! # Configs
//!
//! Layered settings for the cookbook binaries. Sources, lowest precedence
//! first:
//!
//! 1. built-in defaults
//! 2. `config/default.toml`
//! 3. `config/{COOKBOOK_ENV}.toml`
//! 4. `COOKBOOK__SECTION__KEY` environment variables (a `.env` file is read first)

mod error;
mod settings;

pub use error::ConfigsError;
pub use settings::{
    CorsSettings, DatabaseSettings, LogFormat, LogSettings, ServerSettings, Settings,
};
