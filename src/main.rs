//! Replays a JSON gesture script against the in-memory editor and prints the
//! resulting controller and editor state.
//!
//! ```text
//! ztouch [--log] [--init-settings] [--script=PATH | PATH]
//! ```
//!
//! Without a path the script is read from stdin.

use serde::Deserialize;
use std::io::{self, Read};
use std::time::{Duration, Instant};
use ztouch::core::event::{ContextMenuEvent, EditorEvent};
use ztouch::core::geom::{Point, Rect};
use ztouch::kernel::services::adapters::{
    ensure_settings_file, load_settings, GridMetrics, MemoryEditor,
};
use ztouch::kernel::services::ports::{EditorHost, SettingChange, TouchSettings};
use ztouch::kernel::touch::{HandleKind, MenuItem};
use ztouch::kernel::{Effect, TouchController};

mod logging;

const FRAME: Duration = Duration::from_millis(16);
const DEFAULT_MAX_FRAMES: usize = 10_000;

#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default)]
    text: String,
    #[serde(default)]
    minimal: bool,
    #[serde(default)]
    read_only: bool,
    settings: Option<TouchSettings>,
    container: Option<Rect>,
    metrics: Option<GridMetrics>,
    /// Replaces the default copy/cut/paste/select-all catalog.
    menu_items: Option<Vec<MenuItem>>,
    #[serde(default)]
    steps: Vec<TimedStep>,
}

#[derive(Debug, Deserialize)]
struct TimedStep {
    #[serde(default)]
    at_ms: u64,
    #[serde(flatten)]
    step: Step,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Step {
    TouchStart {
        x: f32,
        y: f32,
    },
    TouchMove {
        x: f32,
        y: f32,
    },
    TouchEnd {
        x: f32,
        y: f32,
        #[serde(default)]
        shift: bool,
    },
    ContextMenu {
        x: f32,
        y: f32,
    },
    Tick,
    /// Runs animation frames until the flick settles.
    Frames {
        #[serde(default = "default_max_frames")]
        max: usize,
    },
    Editor {
        event: EditorEvent,
    },
    Type {
        text: String,
    },
    Scroll {
        left: f32,
        top: f32,
    },
    Setting {
        change: SettingChange,
    },
    Detach,
}

fn default_max_frames() -> usize {
    DEFAULT_MAX_FRAMES
}

fn main() -> io::Result<()> {
    let mut script_path: Option<String> = None;
    let mut echo_log = false;
    let mut init_settings = false;

    for arg in std::env::args().skip(1) {
        if let Some(value) = arg.strip_prefix("--script=") {
            script_path = Some(value.to_string());
        } else if arg == "--log" {
            echo_log = true;
        } else if arg == "--init-settings" {
            init_settings = true;
        } else {
            script_path = Some(arg);
        }
    }

    let logging_guard = logging::init(echo_log);
    if echo_log {
        if let Some(guard) = &logging_guard {
            eprintln!("logs: {}", guard.log_dir().display());
        }
    }

    if init_settings {
        match ensure_settings_file() {
            Ok(path) => println!("{}", path.display()),
            Err(e) => return Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
        }
        return Ok(());
    }

    let source = match script_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let script: Script = serde_json::from_str(&source)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let snapshot = replay(script);
    let out = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{out}");
    Ok(())
}

fn replay(script: Script) -> serde_json::Value {
    let settings = script.settings.unwrap_or_else(load_settings);
    let mut editor = MemoryEditor::new(&script.text).with_read_only(script.read_only);
    if let Some(container) = script.container {
        editor = editor.with_container(container);
    }
    if let Some(metrics) = script.metrics {
        editor = editor.with_metrics(metrics);
    }

    let origin = Instant::now();
    let mut controller = TouchController::new(settings, script.minimal, origin);
    if let Some(items) = script.menu_items {
        controller = controller.with_menu_items(items);
    }
    let mut effects: Vec<Effect> = Vec::new();
    tracing::info!(steps = script.steps.len(), minimal = script.minimal, "replay started");

    for TimedStep { at_ms, step } in script.steps {
        let now = origin + Duration::from_millis(at_ms);
        run_step(&mut controller, &mut editor, step, now);
        effects.extend(controller.take_effects());
    }

    snapshot(&controller, &editor, &effects, origin)
}

fn run_step(controller: &mut TouchController, editor: &mut MemoryEditor, step: Step, now: Instant) {
    tracing::debug!(?step, "replay step");
    match step {
        Step::TouchStart { x, y } => controller.touch_start(editor, Point::new(x, y), now),
        Step::TouchMove { x, y } => controller.touch_move(editor, Point::new(x, y), now),
        Step::TouchEnd { x, y, shift } => {
            controller.touch_end(editor, Point::new(x, y), shift, now)
        }
        Step::ContextMenu { x, y } => {
            controller.context_menu(editor, ContextMenuEvent::new(Point::new(x, y), now))
        }
        Step::Tick => controller.tick(editor, now),
        Step::Frames { max } => {
            let mut at = now;
            let mut frames = 0;
            while controller.wants_animation_frame() && frames < max {
                controller.animation_frame(editor, at);
                at += FRAME;
                frames += 1;
            }
            tracing::debug!(frames, "animation frames run");
        }
        Step::Editor { event } => controller.editor_event(editor, event, now),
        Step::Type { text } => {
            editor.insert_text(&text);
            controller.sync_editor(editor, now);
        }
        Step::Scroll { left, top } => {
            editor.set_scroll(left, top);
            controller.sync_editor(editor, now);
        }
        Step::Setting { change } => controller.update_setting(editor, change, now),
        Step::Detach => controller.detach(),
    }
}

fn snapshot(
    controller: &TouchController,
    editor: &MemoryEditor,
    effects: &[Effect],
    origin: Instant,
) -> serde_json::Value {
    let session = controller.session();
    let last_tap_ms = session
        .taps()
        .last_time()
        .map(|at| at.saturating_duration_since(origin).as_millis() as u64);
    serde_json::json!({
        "editor": {
            "cursor": editor.cursor(),
            "selection": editor.selection_range(),
            "scroll": { "left": editor.scroll_left(), "top": editor.scroll_top() },
            "focused": editor.is_focused(),
        },
        "session": {
            "mode": session.mode(),
            "taps": session.taps().count(),
            "last_tap_ms": last_tap_ms,
            "start": session.start_point(),
            "frozen_axis": session.frozen_axis(),
            "delta": session.delta(),
        },
        "handles": {
            "caret": controller.handle(HandleKind::Caret),
            "range_start": controller.handle(HandleKind::RangeStart),
            "range_end": controller.handle(HandleKind::RangeEnd),
        },
        "menu": controller.menu(),
        "selection_active": controller.is_selection_active(),
        "menu_active": controller.is_menu_active(),
        "animating": controller.wants_animation_frame(),
        "effects": effects,
    })
}
