//! Services layer (ports + adapters).
//!
//! - `ports`: contracts the controller is written against.
//! - `adapters`: settings files, user directories and the in-memory editor.

pub mod adapters;
pub mod ports;
