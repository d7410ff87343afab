//! Service ports: traits + data contracts.

pub mod editor;
pub mod settings;

pub use editor::{EditorHost, SurfaceRegion};
pub use settings::{MenuMetrics, SettingChange, TouchSettings};
