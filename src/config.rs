use crate::error::{EsaiError, Result};
use crate::types::config::EsaiConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;
use tracing::debug;

pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/esai/config.toml";

/// Load an assessment file layered over `~/.config/esai/config.toml`.
pub fn load_assessment(path: &Path) -> Result<EsaiConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_assessment_with_global(path, global.as_deref())
}

pub(crate) fn load_assessment_with_global(
    path: &Path,
    global_path: Option<&Path>,
) -> Result<EsaiConfig> {
    if !path.exists() {
        return Err(EsaiError::PathNotFound(path.display().to_string()));
    }

    let mut merged = Value::Table(Map::new());
    if let Some(global) = global_path {
        merge_file_if_exists(&mut merged, global)?;
    }
    merge_file_if_exists(&mut merged, path)?;

    let cfg: EsaiConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| EsaiError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    debug!(path = %path.display(), inputs = cfg.inputs.len(), "assessment loaded");
    Ok(cfg)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    replace_whole_tables(merged, &value);
    merge_toml(merged, value);
    Ok(())
}

/// `[weights]` is either a preset or a full manual vector, so a layer that
/// sets it replaces the lower layer's table instead of merging key by key.
const WHOLE_TABLES: [&str; 1] = ["weights"];

fn replace_whole_tables(merged: &mut Value, overlay: &Value) {
    if let (Value::Table(base), Value::Table(overlay)) = (merged, overlay) {
        for key in WHOLE_TABLES {
            if overlay.contains_key(key) {
                base.remove(key);
            }
        }
    }
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| EsaiError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
