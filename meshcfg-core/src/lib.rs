pub mod settings;
pub mod syncer;

pub use settings::{SettingsError, ToolSettings};
pub use syncer::{FieldHelp, PreferenceSyncer, SyncError};
