mod app_state;
mod config;

pub use app_state::*;
pub use config::RbcConfig;
