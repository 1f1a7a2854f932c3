//! Application layer
//!
//! Use cases orchestrating domain ports: build, clean and inspect.

pub mod build;
pub mod clean;
pub mod inspect;

pub use build::{BuildOptions, BuildReport, BuildUseCase};
pub use clean::{CleanOptions, CleanResult, CleanUseCase};
pub use inspect::{InspectReport, InspectUseCase};
