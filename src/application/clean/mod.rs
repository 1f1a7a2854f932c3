//! Clean use case
//!
//! Removes build intermediates, never artifacts.

mod options;
mod result;
mod use_case;

pub use options::CleanOptions;
pub use result::{CleanFailure, CleanResult, SkipReason, SkippedFile};
pub use use_case::CleanUseCase;
