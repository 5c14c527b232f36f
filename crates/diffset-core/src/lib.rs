//! Core types and error handling for the diffset action.
//!
//! This crate provides the shared foundation used by the other diffset
//! crates:
//! - [`DiffsetError`]: unified error type using `thiserror`
//! - [`ChangeEvent`] / [`CommitRange`]: the trigger model and its resolution
//!   into a comparison range
//! - [`ActionInputs`]: validated action inputs
//! - Wire and result types: [`CompareStatus`], [`CompareResponse`],
//!   [`FileChange`], [`FileStatus`], [`ClassifiedDiff`]

mod error;
mod event;
mod inputs;
mod types;

pub use error::DiffsetError;
pub use event::{ChangeEvent, CommitRange, Repository};
pub use inputs::ActionInputs;
pub use types::{ClassifiedDiff, CompareResponse, CompareStatus, FileChange, FileStatus};

/// A convenience `Result` type for diffset operations.
pub type Result<T> = std::result::Result<T, DiffsetError>;
