//! Utility modules for common functionality
//!
//! Logging, progress reporting and output file naming shared by the
//! extraction pipeline and the lesson tools.

pub mod logger;
pub mod naming;
pub(crate) mod progress;

pub use progress::ProgressTracker;
