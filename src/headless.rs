// ============================================================================
// headless.rs - Glidepan
// Fixed-step batch runner: plays an input script through a controller and
// viewport and reports where the motion ended up.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::HarnessConfig;
use crate::controller::PanController;
use crate::events::{EventKind, MoveKind, ViewportEvent};
use crate::script::InputScript;
use crate::ticker::Ticker;
use crate::trace::TraceRecorder;
use crate::vector::Point;
use crate::viewport::{Viewport, ViewportHandle};

/// Presses per second of script time in generated scripts.
const RANDOM_PRESS_RATE: f32 = 1.5;

#[derive(Clone, Debug)]
pub struct HeadlessConfig {
    pub frames: u32,
    pub frame_ms: f32,
    pub seed: Option<u64>,
    pub script_path: Option<String>,
    pub config_path: Option<String>,
    pub trace: bool,
    pub progress_interval: u32,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_ms: 1000.0 / 60.0,
            seed: None,
            script_path: None,
            config_path: None,
            trace: false,
            progress_interval: 120,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub frames: u32,
    pub duration_ms: f64,
    pub moved_events: u32,
    pub clamp_events: u32,
    pub moved_end_events: u32,
    pub final_position: Point,
    pub final_velocity: Point,
    /// Top-left corner of the visible world when the run ended.
    pub visible_origin: Point,
    pub trace_dir: Option<String>,
}

impl RunReport {
    fn count(&mut self, event: &ViewportEvent) {
        match event {
            ViewportEvent::Moved {
                kind: MoveKind::Animate,
                ..
            } => self.moved_events += 1,
            ViewportEvent::Moved { .. } => self.clamp_events += 1,
            ViewportEvent::MovedEnd => self.moved_end_events += 1,
        }
    }
}

pub fn run_headless(config: &HeadlessConfig) -> Result<RunReport, String> {
    if !config.frame_ms.is_finite() || config.frame_ms <= 0.0 {
        return Err(format!("Frame time must be positive, got {}", config.frame_ms));
    }

    let harness = match &config.config_path {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::default(),
    };
    let duration_ms = config.frames as f32 * config.frame_ms;

    let script = match &config.script_path {
        Some(path) => InputScript::load(path)?,
        None => {
            let seed = config.seed.unwrap_or_else(rand::random);
            log::info!("Generating random script (seed: {})", seed);
            let mut rng = StdRng::seed_from_u64(seed);
            let presses = (duration_ms / 1000.0 * RANDOM_PRESS_RATE).ceil() as usize;
            InputScript::random(&mut rng, duration_ms, presses)
        }
    };

    run_script(config, &harness, &script)
}

/// Play `script` through a fresh viewport and controller.
pub fn run_script(
    config: &HeadlessConfig,
    harness: &HarnessConfig,
    script: &InputScript,
) -> Result<RunReport, String> {
    let controller = PanController::new(harness.pan.resolve());
    let mut ticker = Ticker::new(Viewport::new(harness.viewport), controller);

    let inbox: Rc<RefCell<Vec<ViewportEvent>>> = Rc::new(RefCell::new(Vec::new()));
    for kind in [EventKind::Moved, EventKind::MovedEnd] {
        let sink = inbox.clone();
        ticker
            .viewport_mut()
            .on(kind, move |event| sink.borrow_mut().push(*event));
    }

    let mut recorder = config.trace.then(TraceRecorder::default);
    let mut report = RunReport::default();
    let mut cursor = script.cursor();

    log::info!(
        "Headless run started: {} frames at {:.2}ms, {} script steps",
        config.frames,
        config.frame_ms,
        script.steps.len()
    );
    let started = Instant::now();

    for step in 0..config.frames {
        let time_ms = step as f32 * config.frame_ms;
        for due in cursor.due(time_ms) {
            due.apply(ticker.plugin_mut());
        }

        ticker.update(config.frame_ms);

        let frame = ticker.frame();
        let now_ms = f64::from(time_ms + config.frame_ms);
        for event in inbox.borrow_mut().drain(..) {
            report.count(&event);
            if let Some(recorder) = recorder.as_mut() {
                recorder.record_event(frame, now_ms, event);
            }
        }
        if let Some(recorder) = recorder.as_mut() {
            recorder.record_frame(
                frame,
                now_ms,
                ticker.viewport().position(),
                ticker.plugin().velocity(),
            );
        }

        if config.progress_interval > 0 && (step + 1) % config.progress_interval == 0 {
            let position = ticker.viewport().position();
            let velocity = ticker.plugin().velocity();
            log::info!(
                "Headless progress: {}/{} | pos=({:.1}, {:.1}) vel=({:.1}, {:.1})",
                step + 1,
                config.frames,
                position.x,
                position.y,
                velocity.x,
                velocity.y
            );
        }
    }

    if !cursor.is_done() {
        log::warn!("Run ended before the script finished");
    }

    report.frames = config.frames;
    report.duration_ms = f64::from(config.frames as f32 * config.frame_ms);
    report.final_position = ticker.viewport().position();
    report.final_velocity = ticker.plugin().velocity();
    report.visible_origin = Point::new(ticker.viewport().left(), ticker.viewport().top());

    if let Some(recorder) = &recorder {
        let dir = recorder.export(&report)?;
        report.trace_dir = Some(dir.display().to_string());
    }

    log::info!(
        "Headless run complete in {:.2}s: {} moved, {} clamp, {} moved-end",
        started.elapsed().as_secs_f64(),
        report.moved_events,
        report.clamp_events,
        report.moved_end_events
    );
    Ok(report)
}
