mod loader;
mod settings;

pub use loader::{load_config, DownloadConfig, LoadedConfig, CONFIG_FILE_NAME};
pub use settings::{resolve_settings, Overrides, Settings};
