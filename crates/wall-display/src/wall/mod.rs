//! The Wall coordinates selection, layout mode, and the stream cache.

mod derive;
mod operations;
mod persist;
mod streams;
mod types;

pub use streams::EnsureReport;
pub use types::*;
