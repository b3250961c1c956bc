use meshcfg_core::PreferenceSyncer;
use prefblock::{FieldKind, FieldValue, PreferenceSnapshot, SERIAL_PLUGIN_FIELDS};

pub fn print_info(message: &str) {
    println!("[meshcfg][INFO] {message}");
}

pub fn print_error(message: &str) {
    eprintln!("[meshcfg][ERROR]: {message}");
}

pub fn print_fields(syncer: &PreferenceSyncer) {
    print_info("Serial plugin preference fields:");
    for field in &SERIAL_PLUGIN_FIELDS {
        let kind = match field.kind {
            FieldKind::Bool => "bool",
            FieldKind::NumericString => "number",
        };
        let description = syncer.describe(field.name).unwrap_or(field.description);
        println!("{} ({kind}) - {description}", field.name);
    }
}

pub fn print_snapshot(snapshot: &PreferenceSnapshot) {
    print_info("Device preferences:");
    for field in &SERIAL_PLUGIN_FIELDS {
        if let Some(value) = snapshot.get(field.name) {
            print_field(field.name, value);
        }
    }
}

pub fn print_field(name: &str, value: &FieldValue) {
    match value {
        FieldValue::Bool(flag) => println!("{name}: {flag}"),
        FieldValue::Text(text) => println!("{name}: {text}"),
    }
}
