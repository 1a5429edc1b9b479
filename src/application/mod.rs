//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod annotate;
pub mod error;
pub mod error_ext;
pub mod services;

pub use annotate::{annotate_comments, annotate_keys, mark_comments, COMMENT_MARKER};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
