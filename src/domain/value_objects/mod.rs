//! Domain value objects

mod config_warning;
mod hash;

pub use config_warning::ConfigWarning;
pub use hash::ContentHash;
