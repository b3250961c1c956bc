use prefblock::schema::descriptor;
use prefblock::{FieldError, PreferenceSnapshot};
use std::collections::HashMap;
use transport::{DeviceLink, LinkConfig, LinkError, LinkFactory, NodeAddr};

/// Field description table passed at construction, replacing tooltip
/// lookups through a widget parent chain. Fields without an override
/// fall back to the schema description.
#[derive(Debug, Clone, Default)]
pub struct FieldHelp {
    overrides: HashMap<String, String>,
}

impl FieldHelp {
    pub fn new(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    pub fn describe(&self, field: &str) -> Option<&str> {
        if let Some(text) = self.overrides.get(field) {
            return Some(text.as_str());
        }
        descriptor(field).map(|d| d.description)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SyncError {
    #[error("connection error: {0}")]
    Connection(LinkError),
    #[error("transmission error: {0}")]
    Transmission(LinkError),
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Fetches the serial-plugin preference block from the broadcast node
/// and commits edited snapshots back in a single write.
pub struct PreferenceSyncer {
    config: LinkConfig,
    help: FieldHelp,
    link: Option<Box<dyn DeviceLink>>,
}

impl PreferenceSyncer {
    pub fn new(config: LinkConfig) -> Self {
        Self::with_help(config, FieldHelp::default())
    }

    pub fn with_help(config: LinkConfig, help: FieldHelp) -> Self {
        Self {
            config,
            help,
            link: None,
        }
    }

    /// Use a caller-supplied device link instead of opening one from
    /// the config.
    pub fn with_link(config: LinkConfig, link: Box<dyn DeviceLink>) -> Self {
        Self {
            config,
            help: FieldHelp::default(),
            link: Some(link),
        }
    }

    pub fn describe(&self, field: &str) -> Option<&str> {
        self.help.describe(field)
    }

    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    fn ensure_link(&mut self) -> Result<&mut dyn DeviceLink, SyncError> {
        if self.link.is_none() {
            let link = LinkFactory::open(&self.config).map_err(SyncError::Connection)?;
            self.link = Some(link);
        }
        match self.link.as_deref_mut() {
            Some(link) => Ok(link),
            None => Err(SyncError::Connection(LinkError::NotConnected)),
        }
    }

    /// Read the current preference block and normalize it into a
    /// snapshot. Opens the link lazily on first use.
    pub fn fetch(&mut self) -> Result<PreferenceSnapshot, SyncError> {
        let link = self.ensure_link()?;
        let block = link
            .read_preferences(NodeAddr::Broadcast)
            .map_err(SyncError::Connection)?;
        Ok(PreferenceSnapshot::from_block(&block))
    }

    /// Apply an edited snapshot onto the device's current block and
    /// commit it with a single configuration write. Fields absent
    /// from the snapshot keep their device-side value.
    pub fn write(&mut self, edited: &PreferenceSnapshot) -> Result<(), SyncError> {
        let link = self.ensure_link()?;
        let mut block = link
            .read_preferences(NodeAddr::Broadcast)
            .map_err(SyncError::Connection)?;
        edited.apply_to(&mut block)?;
        link.write_config(NodeAddr::Broadcast, &block)
            .map_err(SyncError::Transmission)?;
        log::debug!("committed preference block to broadcast node");
        Ok(())
    }
}
