//! Shared plumbing for the credential workspace.

pub mod utils;
