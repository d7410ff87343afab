//! ztouch - touch gesture and selection handle controller for code editors
//!
//! Module layout:
//! - core: coordinates, events, virtual-time scheduler
//! - models: rope text buffer and selection used by the in-memory editor
//! - kernel: the touch controller, its effects, settings and editor ports

pub mod core;
pub mod kernel;
pub mod models;
