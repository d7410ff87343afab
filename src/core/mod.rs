//! Core primitives shared by the controller and its hosts:
//! - geom: screen/document coordinates and hit testing
//! - event: touch and editor events
//! - scheduler: virtual-time timers, deferred tasks, animation frames

pub mod event;
pub mod geom;
pub mod scheduler;

pub use event::{ContextMenuEvent, EditorEvent, TouchEvent, TouchPhase};
pub use geom::{DocPos, DocRange, Point, Rect};
pub use scheduler::{Scheduler, TimerId};
