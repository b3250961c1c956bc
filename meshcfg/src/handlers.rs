use crate::commands::{Cli, Commands};
use crate::output::{print_field, print_fields, print_info, print_snapshot};
use meshcfg_core::settings::parse_link_kind;
use meshcfg_core::{PreferenceSyncer, ToolSettings};
use prefblock::{FieldError, PreferenceBlock, PreferenceSnapshot};
use transport::{LinkConfig, LinkKind};

pub fn handle_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = match &cli.settings {
        Some(path) => ToolSettings::load_from_file(path)?,
        None => ToolSettings::default(),
    };
    let config = link_config(&cli, &settings);
    let mut syncer = PreferenceSyncer::with_help(config, settings.field_help());

    match cli.command {
        Commands::Fields => {
            print_fields(&syncer);
        }
        Commands::Get { field } => {
            let snapshot = syncer.fetch()?;
            match field {
                Some(name) => match snapshot.get(&name) {
                    Some(value) => print_field(&name, value),
                    None => return Err(Box::new(FieldError::UnknownField(name))),
                },
                None => print_snapshot(&snapshot),
            }
        }
        Commands::Set { assignments } => {
            let mut snapshot = syncer.fetch()?;
            for assignment in &assignments {
                let (name, value) = parse_assignment(assignment)?;
                snapshot.set_from_str(name, value)?;
            }
            syncer.write(&snapshot)?;
            print_info("Preferences written to device");
        }
        Commands::Export { file } => {
            let snapshot = syncer.fetch()?;
            let mut block = PreferenceBlock::default();
            snapshot.apply_to(&mut block)?;
            block.save_to_file(&file)?;
            print_info(&format!("Preferences exported to {file}"));
        }
        Commands::Import { file } => {
            let block = PreferenceBlock::load_from_file(&file)?;
            let snapshot = PreferenceSnapshot::from_block(&block);
            syncer.write(&snapshot)?;
            print_info("Preferences imported and written to device");
        }
    }
    Ok(())
}

/// A bare --port means a serial device; an explicit --link still wins.
fn link_config(cli: &Cli, settings: &ToolSettings) -> LinkConfig {
    let mut config = settings.link_config();
    if let Some(port) = &cli.port {
        config.port = Some(port.clone());
        config.kind = LinkKind::Serial;
    }
    if let Some(kind) = &cli.link {
        config.kind = parse_link_kind(kind);
    }
    config
}

fn parse_assignment(raw: &str) -> Result<(&str, &str), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => Err(format!("expected FIELD=VALUE, got {raw:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(port: Option<&str>, link: Option<&str>) -> Cli {
        Cli {
            settings: None,
            port: port.map(str::to_string),
            link: link.map(str::to_string),
            command: Commands::Fields,
        }
    }

    #[test]
    fn parse_assignment_splits_on_first_equals() {
        assert_eq!(
            parse_assignment("serialplugin_mode=2").unwrap(),
            ("serialplugin_mode", "2")
        );
        assert_eq!(
            parse_assignment("serialplugin_timeout=").unwrap(),
            ("serialplugin_timeout", "")
        );
        assert!(parse_assignment("no_equals_here").is_err());
        assert!(parse_assignment("=5").is_err());
    }

    #[test]
    fn port_flag_implies_serial_link() {
        let config = link_config(&cli(Some("/dev/ttyUSB0"), None), &ToolSettings::default());
        assert_eq!(config.kind, LinkKind::Serial);
        assert_eq!(config.port.as_deref(), Some("/dev/ttyUSB0"));
    }

    #[test]
    fn explicit_link_flag_wins_over_port() {
        let config = link_config(
            &cli(Some("/dev/ttyUSB0"), Some("loopback")),
            &ToolSettings::default(),
        );
        assert_eq!(config.kind, LinkKind::Loopback);
    }

    #[test]
    fn settings_supply_defaults_when_no_flags() {
        let mut settings = ToolSettings::default();
        settings.port = Some("/dev/ttyACM0".to_string());
        settings.link = "serial".to_string();
        let config = link_config(&cli(None, None), &settings);
        assert_eq!(config.kind, LinkKind::Serial);
        assert_eq!(config.port.as_deref(), Some("/dev/ttyACM0"));
    }
}
