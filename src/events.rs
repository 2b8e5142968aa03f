// ============================================================================
// events.rs - Glidepan
// Notifications emitted by the viewport and its plugins.
// ============================================================================

use serde::Serialize;

use crate::vector::Point;

/// What caused a `moved` notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveKind {
    /// Position changed by the panning controller's integration step.
    Animate,
    /// The viewport pulled its x position back inside the world bounds.
    ClampX,
    /// The viewport pulled its y position back inside the world bounds.
    ClampY,
}

impl MoveKind {
    pub fn tag(self) -> &'static str {
        match self {
            MoveKind::Animate => "animate",
            MoveKind::ClampX => "clamp-x",
            MoveKind::ClampY => "clamp-y",
        }
    }
}

/// Event names listeners can subscribe to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Moved,
    MovedEnd,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ViewportEvent {
    /// The viewport position changed; `original` is the position before.
    Moved { original: Point, kind: MoveKind },
    /// Animated motion came to rest.
    MovedEnd,
}

impl ViewportEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ViewportEvent::Moved { .. } => EventKind::Moved,
            ViewportEvent::MovedEnd => EventKind::MovedEnd,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ViewportEvent::Moved { original, kind } => format!(
                "moved ({}) from ({:.2}, {:.2})",
                kind.tag(),
                original.x,
                original.y
            ),
            ViewportEvent::MovedEnd => String::from("moved-end"),
        }
    }
}
