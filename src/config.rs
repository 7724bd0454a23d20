//! REPL configuration.
//!
//! Generalizes the original Python REPL's `configparser`-based `streamql.cfg`
//! (section `StreamQL`, key `main_src`) to the `toml` + `serde` combination
//! used throughout the retrieved corpus, rather than hand-rolling an INI
//! reader. See `DESIGN.md` for the resolved open question on config format.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "streamql.toml";
const TABLE: &str = "streamql";
const MAIN_SRC_KEY: &str = "main_src";

#[derive(Debug, Clone, Deserialize)]
struct RawConfig {
    streamql: Option<RawTable>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawTable {
    main_src: Option<String>,
}

/// Resolved REPL configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the script `run` executes by default.
    pub main_src: String,
}

impl Config {
    /// Load configuration from `path`, a TOML file with a `[streamql]` table
    /// and a `main_src` key.
    pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path_ref = path.as_ref();
        let path_display = path_ref.display().to_string();

        let text = std::fs::read_to_string(path_ref).map_err(|source| ConfigError::Io { path: path_display.clone(), source })?;
        let raw: RawConfig = toml::from_str(&text).map_err(|source| ConfigError::Toml { path: path_display.clone(), source })?;

        let table = raw.streamql.ok_or_else(|| ConfigError::MissingTable { path: path_display.clone(), table: TABLE })?;
        let main_src = table.main_src.ok_or_else(|| ConfigError::MissingKey { path: path_display, table: TABLE, key: MAIN_SRC_KEY })?;

        tracing::debug!(main_src, "loaded config");
        Ok(Config { main_src })
    }
}
