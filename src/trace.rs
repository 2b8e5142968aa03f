// ============================================================================
// trace.rs - Glidepan
// Per-frame motion samples and event log for batch runs, with CSV/JSON export.
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;

use crate::events::ViewportEvent;
use crate::vector::Point;

// ======================== Frame Sample ========================

#[derive(Clone, Debug, Serialize)]
pub struct FrameSample {
    pub frame: u64,
    pub time_ms: f64,
    pub position: Point,
    pub velocity: Point,
}

impl FrameSample {
    pub fn csv_header() -> &'static str {
        "frame,time_ms,x,y,vx,vy"
    }

    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{:.1},{:.3},{:.3},{:.3},{:.3}",
            self.frame,
            self.time_ms,
            self.position.x,
            self.position.y,
            self.velocity.x,
            self.velocity.y,
        )
    }
}

// ======================== Trace Event ========================

#[derive(Clone, Debug, Serialize)]
pub struct TraceEvent {
    pub frame: u64,
    pub time_ms: f64,
    pub event: ViewportEvent,
}

impl TraceEvent {
    pub fn to_log_line(&self) -> String {
        format!(
            "[{:.1}ms] frame={} {}",
            self.time_ms,
            self.frame,
            self.event.describe()
        )
    }
}

// ======================== Recorder ========================

pub struct TraceRecorder {
    pub run_id: String,
    pub run_dir: PathBuf,
    pub start_time: String,
    pub samples: Vec<FrameSample>,
    pub events: Vec<TraceEvent>,
}

impl Default for TraceRecorder {
    fn default() -> Self {
        Self::new("runs")
    }
}

impl TraceRecorder {
    /// Recorder writing under `<root>/<date>/<run_id>`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let now = Local::now();
        let run_id = format!("run_{}", now.format("%Y%m%d_%H%M%S"));
        let run_dir = root
            .as_ref()
            .join(now.format("%Y-%m-%d").to_string())
            .join(&run_id);

        Self {
            run_id,
            run_dir,
            start_time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            samples: Vec::with_capacity(1_000),
            events: Vec::new(),
        }
    }

    pub fn record_frame(&mut self, frame: u64, time_ms: f64, position: Point, velocity: Point) {
        self.samples.push(FrameSample {
            frame,
            time_ms,
            position,
            velocity,
        });
    }

    pub fn record_event(&mut self, frame: u64, time_ms: f64, event: ViewportEvent) {
        self.events.push(TraceEvent {
            frame,
            time_ms,
            event,
        });
    }

    /// Write samples, events and `summary` into the run directory.
    pub fn export<S: Serialize>(&self, summary: &S) -> Result<PathBuf, String> {
        fs::create_dir_all(&self.run_dir)
            .map_err(|e| format!("Failed to create run directory {:?}: {}", self.run_dir, e))?;

        self.export_samples_csv()?;
        self.export_events_log()?;

        let path = self.run_dir.join("summary.json");
        let json = serde_json::json!({
            "run_id": self.run_id,
            "start_time": self.start_time,
            "frames": self.samples.len(),
            "events": self.events.len(),
            "report": summary,
        });
        let content = serde_json::to_string_pretty(&json)
            .map_err(|e| format!("Failed to serialize summary: {}", e))?;
        fs::write(&path, content).map_err(|e| format!("Failed to write summary.json: {}", e))?;

        log::info!("Trace written to {:?}", self.run_dir);
        Ok(self.run_dir.clone())
    }

    fn export_samples_csv(&self) -> Result<PathBuf, String> {
        let path = self.run_dir.join("samples.csv");
        let mut file = fs::File::create(&path)
            .map_err(|e| format!("Failed to create samples.csv: {}", e))?;

        writeln!(file, "{}", FrameSample::csv_header()).map_err(|e| format!("Write error: {}", e))?;
        for sample in &self.samples {
            writeln!(file, "{}", sample.to_csv_line()).map_err(|e| format!("Write error: {}", e))?;
        }

        log::info!("Exported {} samples to {:?}", self.samples.len(), path);
        Ok(path)
    }

    fn export_events_log(&self) -> Result<PathBuf, String> {
        let path = self.run_dir.join("events.log");
        let mut file = fs::File::create(&path)
            .map_err(|e| format!("Failed to create events.log: {}", e))?;

        for event in &self.events {
            writeln!(file, "{}", event.to_log_line()).map_err(|e| format!("Write error: {}", e))?;
        }

        log::info!("Exported {} events to {:?}", self.events.len(), path);
        Ok(path)
    }
}
