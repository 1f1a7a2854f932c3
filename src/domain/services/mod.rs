//! Domain services

pub mod layout;

pub use layout::{compose, split_shebang};
