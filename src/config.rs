//! Configuration: toolchain environment and runner settings.
//!
//! Toolchain variables come from the process environment and are captured
//! once into a [`ToolchainEnv`]. Runner behavior comes from an optional
//! `~/.goscript/config.toml`, with command-line flags applied on top:
//!
//! ```toml
//! mode = "scratch"    # or "in-place" (default)
//! null_stdin = true   # compiler and linker read from /dev/null
//! verbose = false
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variables consulted by the toolchain resolver.
///
/// Empty values are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainEnv {
    pub goroot: Option<String>,
    pub goroot_final: Option<String>,
    pub gobin: Option<String>,
    pub goarch: Option<String>,
}

impl ToolchainEnv {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            goroot: get("GOROOT"),
            goroot_final: get("GOROOT_FINAL"),
            gobin: get("GOBIN"),
            goarch: get("GOARCH"),
        }
    }
}

/// How the compiler is pointed at the script.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BuildMode {
    /// Comment out the interpreter line in the script itself while compiling.
    #[default]
    InPlace,
    /// Compile a commented copy in a temporary directory.
    Scratch,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub mode: BuildMode,
    pub null_stdin: bool,
    pub verbose: bool,
}

/// `~/.goscript/config.toml`, if a home directory exists.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".goscript").join("config.toml"))
}

/// Load settings from the user config file, falling back to defaults.
pub fn load_settings() -> Result<Settings> {
    match config_path() {
        Some(path) => load_settings_from(&path),
        None => Ok(Settings::default()),
    }
}

/// A missing file yields defaults; an unreadable or malformed one is an error.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
