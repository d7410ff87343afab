use serde::Serialize;

/// Side signals the controller asks its host to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// Close any tooltip the gutter is showing.
    DismissTooltip,
    Vibrate { ms: u64 },
    /// A plain tap on a minimal surface.
    Click,
}
