// ============================================================================
// main.rs - Glidepan
// Entry point. Initializes logging and runs a headless panning session.
// ============================================================================

use clap::Parser;
use glidepan::headless::{run_headless, HeadlessConfig};

#[derive(Parser, Debug)]
#[command(name = "glidepan")]
#[command(about = "Play a key script through the panning controller and report the motion")]
struct Cli {
    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Frame time in milliseconds
    #[arg(long = "frame-ms", default_value_t = 1000.0 / 60.0)]
    frame_ms: f32,

    /// Seed for the generated script (ignored with --script)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON press/release script
    #[arg(long)]
    script: Option<String>,

    /// JSON harness config (pan tunables and viewport size)
    #[arg(long)]
    config: Option<String>,

    /// Log progress every N frames (0 disables)
    #[arg(long, default_value_t = 120)]
    progress: u32,

    /// Write samples, events and summary under runs/
    #[arg(long)]
    trace: bool,
}

impl Cli {
    fn into_config(self) -> HeadlessConfig {
        HeadlessConfig {
            frames: self.frames,
            frame_ms: self.frame_ms,
            seed: self.seed,
            script_path: self.script,
            config_path: self.config,
            trace: self.trace,
            progress_interval: self.progress,
        }
    }
}

fn main() {
    env_logger::init();

    let config = Cli::parse().into_config();

    let report = match run_headless(&config) {
        Ok(report) => report,
        Err(err) => {
            log::error!("Headless run failed: {}", err);
            std::process::exit(1);
        }
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Failed to serialize report: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_headless_defaults() {
        let config = Cli::try_parse_from(["glidepan"]).unwrap().into_config();
        let defaults = HeadlessConfig::default();
        assert_eq!(config.frames, defaults.frames);
        assert_eq!(config.frame_ms, defaults.frame_ms);
        assert_eq!(config.progress_interval, defaults.progress_interval);
        assert!(config.seed.is_none() && !config.trace);
    }

    #[test]
    fn flags_map_onto_headless_config() {
        let cli = Cli::try_parse_from([
            "glidepan",
            "--frames",
            "90",
            "--frame-ms",
            "8",
            "--seed",
            "3",
            "--script",
            "keys.json",
            "--config",
            "pan.json",
            "--progress",
            "0",
            "--trace",
        ])
        .unwrap();
        let config = cli.into_config();
        assert_eq!(config.frames, 90);
        assert_eq!(config.frame_ms, 8.0);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.script_path.as_deref(), Some("keys.json"));
        assert_eq!(config.config_path.as_deref(), Some("pan.json"));
        assert_eq!(config.progress_interval, 0);
        assert!(config.trace);
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert!(Cli::try_parse_from(["glidepan", "--frames", "lots"]).is_err());
        assert!(Cli::try_parse_from(["glidepan", "--unknown"]).is_err());
    }
}
