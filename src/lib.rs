//! yamlshade: colorize YAML keys and comments by their structural position
//!
//! A document is parsed into a [`domain::Node`] tree, every mapping key is
//! classified by its dotted path from the root, and the tree is serialized
//! back to YAML with styled keys and comments.

pub mod application;
pub mod cli;
pub mod codec;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod render;
pub mod util;
