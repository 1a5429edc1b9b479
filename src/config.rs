//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/yamlshade/yamlshade.toml`
//! 3. Local config: `./.yamlshade.toml`, or the file given with `--config`
//! 4. Environment variables: `YAMLSHADE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::codec::DEFAULT_INDENT;
use crate::domain::{Classifier, RuleTable};
use crate::render::{Palette, Style};

/// File name of the per-directory config.
pub const LOCAL_CONFIG_FILE: &str = ".yamlshade.toml";

const ENV_PREFIX: &str = "YAMLSHADE";

/// Accepted indentation widths.
const INDENT_RANGE: std::ops::RangeInclusive<usize> = 1..=8;

/// When to emit ANSI escapes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

/// Style strings per category, e.g. `"bold red"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PaletteConfig {
    pub emphasis_high: String,
    pub emphasis_medium: String,
    pub emphasis_low: String,
    pub muted: String,
    pub comment: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            emphasis_high: "bold red".into(),
            emphasis_medium: "bold yellow".into(),
            emphasis_low: "bold blue".into(),
            muted: "bright black".into(),
            comment: "bright black".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawPaletteConfig {
    pub emphasis_high: Option<String>,
    pub emphasis_medium: Option<String>,
    pub emphasis_low: Option<String>,
    pub muted: Option<String>,
    pub comment: Option<String>,
}

impl PaletteConfig {
    /// Style strings are scalars: the overlay wins when present.
    fn merge(&self, overlay: &RawPaletteConfig) -> Self {
        let pick = |o: &Option<String>, base: &String| o.clone().unwrap_or_else(|| base.clone());
        Self {
            emphasis_high: pick(&overlay.emphasis_high, &self.emphasis_high),
            emphasis_medium: pick(&overlay.emphasis_medium, &self.emphasis_medium),
            emphasis_low: pick(&overlay.emphasis_low, &self.emphasis_low),
            muted: pick(&overlay.muted, &self.muted),
            comment: pick(&overlay.comment, &self.comment),
        }
    }
}

/// Path classification rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RulesConfig {
    /// Path suffixes styled as emphasis-high (e.g. "metadata.name")
    pub high_suffixes: Vec<String>,
    /// Path prefixes styled as emphasis-medium (e.g. "$root.metadata")
    pub medium_prefixes: Vec<String>,
    pub low_prefixes: Vec<String>,
    pub muted_prefixes: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RuleTable::default().into()
    }
}

impl From<RuleTable> for RulesConfig {
    fn from(table: RuleTable) -> Self {
        Self {
            high_suffixes: table.high_suffixes,
            medium_prefixes: table.medium_prefixes,
            low_prefixes: table.low_prefixes,
            muted_prefixes: table.muted_prefixes,
        }
    }
}

impl From<&RulesConfig> for RuleTable {
    fn from(rules: &RulesConfig) -> Self {
        Self {
            high_suffixes: rules.high_suffixes.clone(),
            medium_prefixes: rules.medium_prefixes.clone(),
            low_prefixes: rules.low_prefixes.clone(),
            muted_prefixes: rules.muted_prefixes.clone(),
        }
    }
}

/// Raw rules for intermediate parsing (arrays are Option to detect "not specified").
///
/// - `None` → field not specified, inherit from base
/// - `Some([])` → explicit empty array
/// - `Some([...])` → explicit values to merge
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRulesConfig {
    pub high_suffixes: Option<Vec<String>>,
    pub medium_prefixes: Option<Vec<String>>,
    pub low_prefixes: Option<Vec<String>>,
    pub muted_prefixes: Option<Vec<String>>,
}

impl RulesConfig {
    /// Merge arrays with union semantics and negation support.
    ///
    /// Order is kept: base items first, then new overlay items. Items
    /// prefixed with `!` remove the corresponding item.
    ///
    /// # Examples
    /// ```ignore
    /// merge_array(&["a", "b"], &["c"])       // → ["a", "b", "c"]
    /// merge_array(&["a", "b"], &["!a", "c"]) // → ["b", "c"]
    /// ```
    pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
        let mut result: Vec<String> = base.to_vec();

        for pattern in overlay {
            if let Some(negated) = pattern.strip_prefix('!') {
                result.retain(|item| item != negated);
            } else if !result.contains(pattern) {
                result.push(pattern.clone());
            }
        }
        result
    }

    /// Union merge used for the local config.
    pub fn merge(&self, overlay: &RawRulesConfig) -> Self {
        let union = |o: &Option<Vec<String>>, base: &Vec<String>| {
            o.as_ref()
                .map(|o| Self::merge_array(base, o))
                .unwrap_or_else(|| base.clone())
        };
        Self {
            high_suffixes: union(&overlay.high_suffixes, &self.high_suffixes),
            medium_prefixes: union(&overlay.medium_prefixes, &self.medium_prefixes),
            low_prefixes: union(&overlay.low_prefixes, &self.low_prefixes),
            muted_prefixes: union(&overlay.muted_prefixes, &self.muted_prefixes),
        }
    }

    /// Replace merge used for the global config: a specified array replaces
    /// the default entirely.
    pub fn apply_global(&self, global: &RawRulesConfig) -> Self {
        let replace = |o: &Option<Vec<String>>, base: &Vec<String>| {
            o.clone().unwrap_or_else(|| base.clone())
        };
        Self {
            high_suffixes: replace(&global.high_suffixes, &self.high_suffixes),
            medium_prefixes: replace(&global.medium_prefixes, &self.medium_prefixes),
            low_prefixes: replace(&global.low_prefixes, &self.low_prefixes),
            muted_prefixes: replace(&global.muted_prefixes, &self.muted_prefixes),
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub color: Option<ColorChoice>,
    pub indent: Option<usize>,
    pub palette: RawPaletteConfig,
    pub rules: RawRulesConfig,
}

/// Unified configuration for yamlshade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// When to color output (default: auto)
    pub color: ColorChoice,
    /// Spaces per nesting level in the output (default: 2)
    pub indent: usize,
    pub palette: PaletteConfig,
    pub rules: RulesConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: ColorChoice::default(),
            indent: DEFAULT_INDENT,
            palette: PaletteConfig::default(),
            rules: RulesConfig::default(),
        }
    }
}

/// Get the XDG config directory for yamlshade.
fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "yamlshade").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("yamlshade.toml"))
}

/// Resolve `--config`, expanding `~` and `$VAR`.
pub fn expand_config_path(path: &Path) -> Result<PathBuf, ApplicationError> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw).map_err(|e| ApplicationError::Config {
        message: format!("expand {raw}: {e}"),
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// `YAMLSHADE_*` variables; `__` separates nested keys, `,` list items.
pub fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("rules.high_suffixes")
        .with_list_parse_key("rules.medium_prefixes")
        .with_list_parse_key("rules.low_prefixes")
        .with_list_parse_key("rules.muted_prefixes")
}

impl Settings {
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            color: overlay.color.unwrap_or(self.color),
            indent: overlay.indent.unwrap_or(self.indent),
            palette: self.palette.merge(&overlay.palette),
            rules: self.rules.merge(&overlay.rules),
        }
    }

    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            color: global.color.unwrap_or(self.color),
            indent: global.indent.unwrap_or(self.indent),
            palette: self.palette.merge(&global.palette),
            rules: self.rules.apply_global(&global.rules),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// `explicit` replaces the local `./.yamlshade.toml` and must exist.
    ///
    /// # Array Merge Semantics
    /// - Defaults → Global: REPLACE
    /// - Global → Local: UNION with `!item` negation
    /// - Any → Env vars: REPLACE
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let local = match explicit {
            Some(path) => {
                let path = expand_config_path(path)?;
                if !path.is_file() {
                    return Err(ApplicationError::Config {
                        message: format!("config file not found: {}", path.display()),
                    });
                }
                Some(path)
            }
            None => Some(PathBuf::from(LOCAL_CONFIG_FILE)).filter(|p| p.is_file()),
        };
        Self::load_layers(global_config_path().as_deref(), local.as_deref(), env_source())
    }

    /// Layered load with explicit sources; missing files are skipped.
    pub fn load_layers(
        global: Option<&Path>,
        local: Option<&Path>,
        env: Environment,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = global.filter(|p| p.exists()) {
            debug!(path = %path.display(), "loading global config");
            current = current.apply_global(&load_raw_settings(path)?);
        }

        if let Some(path) = local.filter(|p| p.exists()) {
            debug!(path = %path.display(), "loading local config");
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current, env)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("color") {
            settings.color = <ColorChoice as clap::ValueEnum>::from_str(&val, true)
                .map_err(|e| ApplicationError::Config {
                    message: format!("color: {e}"),
                })?;
        }
        if let Ok(val) = config.get_int("indent") {
            settings.indent = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("indent: {val} is negative"),
            })?;
        }

        let palette = &mut settings.palette;
        for (key, slot) in [
            ("palette.emphasis_high", &mut palette.emphasis_high),
            ("palette.emphasis_medium", &mut palette.emphasis_medium),
            ("palette.emphasis_low", &mut palette.emphasis_low),
            ("palette.muted", &mut palette.muted),
            ("palette.comment", &mut palette.comment),
        ] {
            if let Ok(val) = config.get_string(key) {
                *slot = val;
            }
        }

        let rules = &mut settings.rules;
        for (key, slot) in [
            ("rules.high_suffixes", &mut rules.high_suffixes),
            ("rules.medium_prefixes", &mut rules.medium_prefixes),
            ("rules.low_prefixes", &mut rules.low_prefixes),
            ("rules.muted_prefixes", &mut rules.muted_prefixes),
        ] {
            if let Ok(val) = config.get::<Vec<String>>(key) {
                *slot = val;
            }
        }

        Ok(settings)
    }

    /// Check value ranges, style strings and rules.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if !INDENT_RANGE.contains(&self.indent) {
            return Err(ApplicationError::Config {
                message: format!(
                    "indent must be between {} and {}, got {}",
                    INDENT_RANGE.start(),
                    INDENT_RANGE.end(),
                    self.indent
                ),
            });
        }
        self.palette()?;
        self.classifier()?;
        Ok(())
    }

    /// Build the color palette from the configured style strings.
    pub fn palette(&self) -> ApplicationResult<Palette> {
        let style = |key: &str, spec: &str| {
            Style::parse(spec).map_err(|reason| ApplicationError::Config {
                message: format!("palette.{key}: {reason}"),
            })
        };
        let p = &self.palette;
        Ok(Palette {
            emphasis_high: style("emphasis_high", &p.emphasis_high)?,
            emphasis_medium: style("emphasis_medium", &p.emphasis_medium)?,
            emphasis_low: style("emphasis_low", &p.emphasis_low)?,
            muted: style("muted", &p.muted)?,
            comment: style("comment", &p.comment)?,
        })
    }

    /// Build the path classifier from the configured rules.
    pub fn classifier(&self) -> ApplicationResult<Classifier> {
        Ok(Classifier::new(RuleTable::from(&self.rules))?)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# yamlshade configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/yamlshade/yamlshade.toml  (defines your baseline)
#   Local:  ./.yamlshade.toml or --config PATH  (per-directory additions)
#   Env:    YAMLSHADE_* environment variables   (explicit overrides)
#
# Array Merge Semantics:
#   Global config REPLACES compiled defaults.
#   Local config UNIONS with global.
#   Use "!item" in local config to REMOVE an inherited item:
#     high_suffixes = ["!spec", "data"]

# auto | always | never
# color = "auto"

# Spaces per nesting level (1-8)
# indent = 2

[palette]
# "[bold ]<color>", colors as understood by terminals: red, bright black, ...
# emphasis_high = "bold red"
# emphasis_medium = "bold yellow"
# emphasis_low = "bold blue"
# muted = "bright black"
# comment = "bright black"

[rules]
# Paths are dotted keys rooted at "$root", e.g. "$root.spec.containers.image".
# Suffixes match whole trailing segments; prefixes match whole leading segments.
# high_suffixes = ["apiVersion", "kind", "metadata.name", "spec", "containers.name", "containers.image"]
# medium_prefixes = ["$root.metadata"]
# low_prefixes = ["$root.spec"]
# muted_prefixes = ["$root.status"]
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
