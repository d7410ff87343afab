//! Data models backing the in-memory editor

pub mod selection;
pub mod text_buffer;

pub use selection::{Granularity, Selection};
pub use text_buffer::{slice_to_cow, TextBuffer};
