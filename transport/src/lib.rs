use prefblock::PreferenceBlock;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeAddr {
    /// The locally connected device as a whole.
    Broadcast,
    /// A specific node in the mesh.
    Node(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Serial,
    Loopback,
}

#[derive(Debug, Clone)]
pub struct LinkConfig {
    pub kind: LinkKind,
    pub port: Option<String>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            kind: LinkKind::Loopback,
            port: None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LinkError {
    #[error("device not connected")]
    NotConnected,
    #[error("no port configured")]
    MissingPort,
    #[error("preference read failed")]
    ReadFailed,
    #[error("configuration write failed")]
    WriteFailed,
}

/// Seam where the device-communication library plugs in. Protocol
/// framing and encoding live behind this trait, not in front of it.
pub trait DeviceLink: Send + std::fmt::Debug {
    fn read_preferences(&mut self, node: NodeAddr) -> Result<PreferenceBlock, LinkError>;
    fn write_config(&mut self, node: NodeAddr, block: &PreferenceBlock) -> Result<(), LinkError>;
}

/// In-process device backed by a shared preference block, so callers
/// holding the other end of the Arc can observe committed state.
#[derive(Debug)]
pub struct LoopbackDevice {
    state: Arc<Mutex<PreferenceBlock>>,
}

impl LoopbackDevice {
    pub fn new() -> Self {
        Self::with_block(PreferenceBlock::default())
    }

    pub fn with_block(block: PreferenceBlock) -> Self {
        Self {
            state: Arc::new(Mutex::new(block)),
        }
    }

    pub fn state(&self) -> Arc<Mutex<PreferenceBlock>> {
        Arc::clone(&self.state)
    }
}

impl Default for LoopbackDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceLink for LoopbackDevice {
    fn read_preferences(&mut self, _node: NodeAddr) -> Result<PreferenceBlock, LinkError> {
        let state = self.state.lock().map_err(|_| LinkError::ReadFailed)?;
        Ok(state.clone())
    }

    fn write_config(&mut self, _node: NodeAddr, block: &PreferenceBlock) -> Result<(), LinkError> {
        let mut state = self.state.lock().map_err(|_| LinkError::WriteFailed)?;
        *state = block.clone();
        Ok(())
    }
}

pub struct LinkFactory;

impl LinkFactory {
    pub fn open(config: &LinkConfig) -> Result<Box<dyn DeviceLink>, LinkError> {
        match config.kind {
            LinkKind::Loopback => Ok(Box::new(LoopbackDevice::new())),
            LinkKind::Serial => {
                let Some(port) = config.port.as_deref() else {
                    return Err(LinkError::MissingPort);
                };
                log::debug!("opening device link on port {port}");
                Ok(Box::new(LoopbackDevice::new()))
            }
        }
    }
}
