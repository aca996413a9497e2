//! Roster configuration stored in `roster.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::text_order::{DEFAULT_LOCALE, TextOrder};
use crate::core::types::SortKey;
use crate::io::source::escapes_root;

/// Default file name looked up in the working directory.
pub const CONFIG_FILE: &str = "roster.toml";

/// Source path queried for the recipient list.
pub const DEFAULT_FETCH_PATH: &str = "/session/students/response";

/// How a completed load merges with rows already in the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// Drop both partitions before adding the fetched rows.
    #[default]
    Replace,
    /// Keep earlier rows and append the fetched ones.
    Append,
}

/// Roster configuration (TOML).
///
/// Missing fields default to the values the reminder tables use out of the
/// box: English collation, replace-on-load, sorted by response status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RosterConfig {
    /// BCP-47 tag for string collation (e.g. `en`, `sv`, `de`).
    pub locale: String,

    pub load_mode: LoadMode,

    /// Key applied (toggling) to both partitions after every load.
    pub default_sort: SortKey,

    /// Path handed to the recipient source on each load.
    pub fetch_path: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            load_mode: LoadMode::Replace,
            default_sort: SortKey::ResponseStatus,
            fetch_path: DEFAULT_FETCH_PATH.to_string(),
        }
    }
}

impl RosterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.locale.trim().is_empty() {
            return Err(anyhow!("locale must be a non-empty language tag"));
        }
        TextOrder::for_locale(&self.locale).context("locale")?;
        if !self.fetch_path.starts_with('/') {
            return Err(anyhow!("fetch_path must start with '/'"));
        }
        if escapes_root(Path::new(self.fetch_path.trim_start_matches('/'))) {
            return Err(anyhow!("fetch_path must not contain '..' segments"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `RosterConfig::default()`.
pub fn load_config(path: &Path) -> Result<RosterConfig> {
    if !path.exists() {
        let cfg = RosterConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: RosterConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &RosterConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
