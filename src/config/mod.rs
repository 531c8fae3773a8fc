mod settings;

pub use settings::{SlackSettings, load_settings, settings_from_lookup};
