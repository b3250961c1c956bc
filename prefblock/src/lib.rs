use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub mod schema;
pub use schema::{
    descriptor, zero_if_blank, FieldDescriptor, FieldError, FieldKind, FieldValue,
    PreferenceSnapshot, SERIAL_PLUGIN_FIELDS,
};

/// Serial-plugin slice of the device's preference message. Absent
/// fields decode as their zero value, matching the wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceBlock {
    #[serde(default)]
    pub serialplugin_enabled: bool,
    #[serde(default)]
    pub serialplugin_echo: bool,
    #[serde(default)]
    pub serialplugin_mode: u32,
    #[serde(default)]
    pub serialplugin_rxd: u32,
    #[serde(default)]
    pub serialplugin_txd: u32,
    #[serde(default)]
    pub serialplugin_timeout: u32,
}

#[derive(thiserror::Error, Debug)]
pub enum PreferenceFileError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PreferenceBlock {
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PreferenceFileError> {
        let data = serde_json::to_vec_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PreferenceFileError> {
        let data = fs::read(path)?;
        let block = serde_json::from_slice(&data)?;
        Ok(block)
    }
}
