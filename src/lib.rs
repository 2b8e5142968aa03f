// ============================================================================
// lib.rs - Glidepan
// Velocity-based keyboard panning for 2D viewports.
// ============================================================================

pub mod config;
pub mod controller;
pub mod events;
pub mod headless;
pub mod input;
pub mod script;
pub mod ticker;
pub mod trace;
pub mod vector;
pub mod viewport;

pub use config::{PanConfig, PanOptions};
pub use controller::PanController;
pub use events::{EventKind, MoveKind, ViewportEvent};
pub use input::Direction;
pub use ticker::Ticker;
pub use vector::Point;
pub use viewport::{Tickable, Viewport, ViewportHandle};
