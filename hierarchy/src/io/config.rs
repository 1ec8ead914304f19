//! Hierarchy configuration stored in `hierarchy.toml`.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::options::{CycleGuard, FieldNames, TreeOptions};

/// Default config file name, resolved relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "hierarchy.toml";

/// Hierarchy configuration (TOML).
///
/// Missing fields fall back to the documented defaults: `id`, `parent_id`,
/// `children`, `level`, root value `0`, cycle guard on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HierarchyConfig {
    /// Parent value marking a top-level record. Any TOML scalar.
    pub root: toml::Value,

    /// Fail with a cycle error instead of looping on cyclic input.
    pub cycle_guard: bool,

    pub fields: FieldNames,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            root: toml::Value::Integer(0),
            cycle_guard: true,
            fields: FieldNames::default(),
        }
    }
}

impl HierarchyConfig {
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("fields.id", &self.fields.id),
            ("fields.parent", &self.fields.parent),
            ("fields.children", &self.fields.children),
            ("fields.level", &self.fields.level),
        ];
        let mut seen = HashSet::new();
        for (key, name) in names {
            if name.trim().is_empty() {
                return Err(anyhow!("{} must be a non-empty string", key));
            }
            if !seen.insert(name.as_str()) {
                return Err(anyhow!("{} duplicates another field name '{}'", key, name));
            }
        }
        match self.root {
            toml::Value::Array(_) | toml::Value::Table(_) | toml::Value::Datetime(_) => Err(
                anyhow!("root must be a string, integer, float or boolean"),
            ),
            _ => Ok(()),
        }
    }

    /// Root value converted to JSON for comparison with record fields.
    pub fn root_value(&self) -> Result<Value> {
        serde_json::to_value(&self.root).context("convert root value to json")
    }

    pub fn to_options(&self) -> Result<TreeOptions<Value>> {
        self.validate()?;
        let guard = if self.cycle_guard {
            CycleGuard::Enabled
        } else {
            CycleGuard::Disabled
        };
        Ok(TreeOptions::new(self.root_value()?)
            .with_fields(self.fields.clone())
            .with_cycle_guard(guard))
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `HierarchyConfig::default()`.
pub fn load_config(path: &Path) -> Result<HierarchyConfig> {
    if !path.exists() {
        let cfg = HierarchyConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: HierarchyConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &HierarchyConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
