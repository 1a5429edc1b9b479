//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use clap_complete::Shell;

use crate::config::ColorChoice;

/// Print YAML with keys and comments colored by their place in the document
#[derive(Parser, Debug)]
#[command(name = "yamlshade")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// YAML file to colorize
    #[arg(
        value_hint = ValueHint::FilePath,
        required_unless_present_any = ["completions", "show_config", "init_config"]
    )]
    pub file: Option<PathBuf>,

    /// Increase log verbosity on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// When to color the output (default from config: auto)
    #[arg(long, value_enum, value_name = "WHEN")]
    pub color: Option<ColorChoice>,

    /// Config file, used instead of ./.yamlshade.toml
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print textual category/comment markers instead of colors
    #[arg(long)]
    pub markers: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub show_config: bool,

    /// Print a commented config template and exit
    #[arg(long, conflicts_with = "show_config")]
    pub init_config: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}
