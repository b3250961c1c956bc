use crate::syncer::FieldHelp;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use transport::{LinkConfig, LinkKind};

/// Tool settings persisted as toml: default port, link kind, and
/// optional field description overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    #[serde(default)]
    pub port: Option<String>,
    #[serde(default = "default_link")]
    pub link: String,
    #[serde(default)]
    pub descriptions: HashMap<String, String>,
}

fn default_link() -> String {
    "loopback".to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            port: None,
            link: default_link(),
            descriptions: HashMap::new(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("toml serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub fn parse_link_kind(kind: &str) -> LinkKind {
    match kind {
        "serial" => LinkKind::Serial,
        "loopback" => LinkKind::Loopback,
        _ => LinkKind::Loopback,
    }
}

impl ToolSettings {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let data = fs::read_to_string(path)?;
        let settings = toml::from_str(&data)?;
        Ok(settings)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let data = toml::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    pub fn link_config(&self) -> LinkConfig {
        LinkConfig {
            kind: parse_link_kind(&self.link),
            port: self.port.clone(),
        }
    }

    pub fn field_help(&self) -> FieldHelp {
        FieldHelp::new(self.descriptions.clone())
    }
}
