use crate::PreferenceBlock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Bool,
    NumericString,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
}

/// The serial-plugin fields, in form order.
pub const SERIAL_PLUGIN_FIELDS: [FieldDescriptor; 6] = [
    FieldDescriptor {
        name: "serialplugin_enabled",
        kind: FieldKind::Bool,
        description: "Enable the serial plugin",
    },
    FieldDescriptor {
        name: "serialplugin_echo",
        kind: FieldKind::Bool,
        description: "Echo received characters back over serial",
    },
    FieldDescriptor {
        name: "serialplugin_mode",
        kind: FieldKind::NumericString,
        description: "Serial plugin operating mode",
    },
    FieldDescriptor {
        name: "serialplugin_rxd",
        kind: FieldKind::NumericString,
        description: "GPIO pin used for RXD",
    },
    FieldDescriptor {
        name: "serialplugin_txd",
        kind: FieldKind::NumericString,
        description: "GPIO pin used for TXD",
    },
    FieldDescriptor {
        name: "serialplugin_timeout",
        kind: FieldKind::NumericString,
        description: "Serial timeout in milliseconds",
    },
];

pub fn descriptor(name: &str) -> Option<&'static FieldDescriptor> {
    SERIAL_PLUGIN_FIELDS.iter().find(|field| field.name == name)
}

pub fn zero_if_blank(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FieldError {
    #[error("unknown preference field: {0}")]
    UnknownField(String),
    #[error("field {field} does not accept a {given} value")]
    KindMismatch { field: String, given: &'static str },
    #[error("field {field}: {value:?} is not a boolean")]
    InvalidBool { field: String, value: String },
    #[error("field {field}: {value:?} is not a number")]
    InvalidNumber { field: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
}

impl FieldValue {
    fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "boolean",
            FieldValue::Text(_) => "text",
        }
    }
}

/// Name to value mapping for one fetch/edit/write interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceSnapshot {
    values: BTreeMap<String, FieldValue>,
}

impl PreferenceSnapshot {
    /// Snapshot every schema field from a preference block. Zero
    /// numeric values render as "0" rather than an empty slot.
    pub fn from_block(block: &PreferenceBlock) -> Self {
        let mut snapshot = Self::default();
        for field in &SERIAL_PLUGIN_FIELDS {
            let value = match field.kind {
                FieldKind::Bool => FieldValue::Bool(bool_field(block, field.name)),
                FieldKind::NumericString => {
                    FieldValue::Text(numeric_field(block, field.name).to_string())
                }
            };
            snapshot.values.insert(field.name.to_string(), value);
        }
        snapshot
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        let Some(field) = descriptor(name) else {
            return Err(FieldError::UnknownField(name.to_string()));
        };
        match (field.kind, &value) {
            (FieldKind::Bool, FieldValue::Bool(_)) => {}
            (FieldKind::NumericString, FieldValue::Text(_)) => {}
            _ => {
                return Err(FieldError::KindMismatch {
                    field: name.to_string(),
                    given: value.kind_name(),
                })
            }
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Schema-driven parse of raw user input, as the device CLI's
    /// setPref does. Blank numeric input becomes "0".
    pub fn set_from_str(&mut self, name: &str, raw: &str) -> Result<(), FieldError> {
        let Some(field) = descriptor(name) else {
            return Err(FieldError::UnknownField(name.to_string()));
        };
        let value = match field.kind {
            FieldKind::Bool => FieldValue::Bool(parse_bool(name, raw)?),
            FieldKind::NumericString => {
                let text = zero_if_blank(raw);
                if text.parse::<u32>().is_err() {
                    return Err(FieldError::InvalidNumber {
                        field: name.to_string(),
                        value: raw.to_string(),
                    });
                }
                FieldValue::Text(text)
            }
        };
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Apply the snapshot onto a block. Fields missing from the
    /// snapshot keep their current value.
    pub fn apply_to(&self, block: &mut PreferenceBlock) -> Result<(), FieldError> {
        for (name, value) in &self.values {
            let Some(field) = descriptor(name) else {
                return Err(FieldError::UnknownField(name.clone()));
            };
            match (field.kind, value) {
                (FieldKind::Bool, FieldValue::Bool(flag)) => {
                    set_bool_field(block, field.name, *flag);
                }
                (FieldKind::NumericString, FieldValue::Text(text)) => {
                    let normalized = zero_if_blank(text);
                    let parsed =
                        normalized
                            .parse::<u32>()
                            .map_err(|_| FieldError::InvalidNumber {
                                field: name.clone(),
                                value: text.clone(),
                            })?;
                    set_numeric_field(block, field.name, parsed);
                }
                _ => {
                    return Err(FieldError::KindMismatch {
                        field: name.clone(),
                        given: value.kind_name(),
                    })
                }
            }
        }
        Ok(())
    }
}

fn parse_bool(field: &str, raw: &str) -> Result<bool, FieldError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(FieldError::InvalidBool {
            field: field.to_string(),
            value: raw.to_string(),
        }),
    }
}

fn bool_field(block: &PreferenceBlock, name: &str) -> bool {
    match name {
        "serialplugin_enabled" => block.serialplugin_enabled,
        "serialplugin_echo" => block.serialplugin_echo,
        _ => false,
    }
}

fn numeric_field(block: &PreferenceBlock, name: &str) -> u32 {
    match name {
        "serialplugin_mode" => block.serialplugin_mode,
        "serialplugin_rxd" => block.serialplugin_rxd,
        "serialplugin_txd" => block.serialplugin_txd,
        "serialplugin_timeout" => block.serialplugin_timeout,
        _ => 0,
    }
}

fn set_bool_field(block: &mut PreferenceBlock, name: &str, value: bool) {
    match name {
        "serialplugin_enabled" => block.serialplugin_enabled = value,
        "serialplugin_echo" => block.serialplugin_echo = value,
        _ => {}
    }
}

fn set_numeric_field(block: &mut PreferenceBlock, name: &str, value: u32) {
    match name {
        "serialplugin_mode" => block.serialplugin_mode = value,
        "serialplugin_rxd" => block.serialplugin_rxd = value,
        "serialplugin_txd" => block.serialplugin_txd = value,
        "serialplugin_timeout" => block.serialplugin_timeout = value,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_if_blank_trims_and_defaults() {
        assert_eq!(zero_if_blank(""), "0");
        assert_eq!(zero_if_blank("   "), "0");
        assert_eq!(zero_if_blank(" 38400 "), "38400");
    }

    #[test]
    fn descriptor_lookup_covers_every_field() {
        for field in &SERIAL_PLUGIN_FIELDS {
            assert!(descriptor(field.name).is_some());
        }
        assert!(descriptor("serialplugin_bogus").is_none());
    }

    #[test]
    fn set_rejects_kind_mismatch() {
        let mut snapshot = PreferenceSnapshot::default();
        let err = snapshot
            .set("serialplugin_enabled", FieldValue::Text("1".to_string()))
            .unwrap_err();
        assert!(matches!(err, FieldError::KindMismatch { .. }));
    }

    #[test]
    fn set_from_str_parses_booleans_loosely() {
        let mut snapshot = PreferenceSnapshot::default();
        for raw in ["true", "TRUE", "1", "yes"] {
            snapshot.set_from_str("serialplugin_echo", raw).unwrap();
            assert_eq!(
                snapshot.get("serialplugin_echo"),
                Some(&FieldValue::Bool(true))
            );
        }
        for raw in ["false", "0", "No"] {
            snapshot.set_from_str("serialplugin_echo", raw).unwrap();
            assert_eq!(
                snapshot.get("serialplugin_echo"),
                Some(&FieldValue::Bool(false))
            );
        }
        assert!(snapshot.set_from_str("serialplugin_echo", "maybe").is_err());
    }

    #[test]
    fn set_from_str_rejects_non_numeric_text() {
        let mut snapshot = PreferenceSnapshot::default();
        let err = snapshot
            .set_from_str("serialplugin_timeout", "fast")
            .unwrap_err();
        assert!(matches!(err, FieldError::InvalidNumber { .. }));
    }

    #[test]
    fn apply_to_leaves_missing_fields_untouched() {
        let mut block = PreferenceBlock {
            serialplugin_mode: 7,
            ..Default::default()
        };
        let mut snapshot = PreferenceSnapshot::default();
        snapshot.set_from_str("serialplugin_rxd", "16").unwrap();
        snapshot.apply_to(&mut block).unwrap();
        assert_eq!(block.serialplugin_mode, 7);
        assert_eq!(block.serialplugin_rxd, 16);
    }
}
