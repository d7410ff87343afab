//! Service adapters: OS specific and in-memory implementations.

pub mod memory_editor;
pub mod paths;
pub mod settings;

pub use memory_editor::{GridMetrics, MemoryEditor};
pub use paths::ensure_log_dir;
pub use settings::{
    ensure_settings_file, ensure_settings_file_at, get_settings_path, load_settings,
    load_settings_from, SettingsError,
};
