use prefblock::PreferenceBlock;
use transport::{DeviceLink, LinkConfig, LinkError, LinkFactory, LinkKind, LoopbackDevice, NodeAddr};

#[test]
fn config_default_is_loopback_without_port() {
    let config = LinkConfig::default();
    assert_eq!(config.kind, LinkKind::Loopback);
    assert!(config.port.is_none());
}

#[test]
fn loopback_read_write_round_trip() {
    let mut device = LoopbackDevice::new();
    let fetched = device.read_preferences(NodeAddr::Broadcast).unwrap();
    assert_eq!(fetched, PreferenceBlock::default());

    let block = PreferenceBlock {
        serialplugin_enabled: true,
        serialplugin_timeout: 250,
        ..Default::default()
    };
    device.write_config(NodeAddr::Broadcast, &block).unwrap();
    assert_eq!(device.read_preferences(NodeAddr::Broadcast).unwrap(), block);
}

#[test]
fn loopback_exposes_committed_state() {
    let mut device = LoopbackDevice::new();
    let state = device.state();
    let block = PreferenceBlock {
        serialplugin_rxd: 16,
        ..Default::default()
    };
    device.write_config(NodeAddr::Broadcast, &block).unwrap();
    assert_eq!(*state.lock().unwrap(), block);
}

#[test]
fn factory_creates_loopback_link() {
    let mut link = LinkFactory::open(&LinkConfig::default()).unwrap();
    assert_eq!(
        link.read_preferences(NodeAddr::Broadcast).unwrap(),
        PreferenceBlock::default()
    );
}

#[test]
fn factory_serial_requires_a_port() {
    let config = LinkConfig {
        kind: LinkKind::Serial,
        port: None,
    };
    let err = LinkFactory::open(&config).unwrap_err();
    assert!(matches!(err, LinkError::MissingPort));
}

#[test]
fn factory_serial_with_port_opens() {
    let config = LinkConfig {
        kind: LinkKind::Serial,
        port: Some("/dev/ttyUSB0".to_string()),
    };
    assert!(LinkFactory::open(&config).is_ok());
}
