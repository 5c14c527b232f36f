//! Commit comparison and change classification.
//!
//! Provides the compare oracle seam, the GitHub-backed client that
//! implements it in production, and the classifier that turns a resolved
//! range into a classified change set.

pub mod classify;
pub mod github;
