//! Headless touch core (controller/effect/services).

pub mod effect;
pub mod services;
pub mod touch;

pub use effect::Effect;
pub use touch::{
    ContextMenu, GestureMode, GestureSession, HandleKind, HandleWidget, MenuCommand, MenuItem,
    TouchController,
};
