//! Build use case
//!
//! Packages apps into self-executing zip applications.

mod options;
mod result;
mod use_case;

#[cfg(test)]
mod tests;

pub use options::BuildOptions;
pub use result::{BuildReport, PackedEntry};
pub use use_case::{output_dir, BuildUseCase};
