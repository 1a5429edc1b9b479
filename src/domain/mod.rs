//! Domain layer: document model and path classification
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod category;
pub mod classifier;
pub mod error;
pub mod node;
pub mod path;

pub use category::Category;
pub use classifier::{classify, Classifier, RuleTable};
pub use error::DomainError;
pub use node::{Node, NodeKind, ScalarSource, ScalarType};
pub use path::StructuralPath;
