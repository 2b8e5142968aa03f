// ============================================================================
// viewport.rs - Glidepan
// Viewport capability, per-frame plugin trait, and a reference viewport with
// world-bounds clamping and event subscription.
// ============================================================================

use std::collections::VecDeque;

use crate::config::ViewportConfig;
use crate::events::{EventKind, MoveKind, ViewportEvent};
use crate::vector::Point;

/// What a plugin may do to the viewport that hosts it.
pub trait ViewportHandle {
    fn position(&self) -> Point;
    fn set_position(&mut self, position: Point);
    fn emit(&mut self, event: ViewportEvent);
}

/// A plugin driven once per frame by the scheduler.
pub trait Tickable {
    /// Advance by `dt_ms` milliseconds.
    fn on_tick(&mut self, viewport: &mut dyn ViewportHandle, dt_ms: f32);

    /// Called for every event the viewport dispatches, before subscribers.
    fn on_event(&mut self, _viewport: &mut dyn ViewportHandle, _event: &ViewportEvent) {}
}

type Listener = Box<dyn FnMut(&ViewportEvent)>;

/// Reference viewport: a screen-sized window onto a larger world.
///
/// `position` is the container offset, so the visible world starts at
/// `(-x, -y)`.
pub struct Viewport {
    position: Point,
    config: ViewportConfig,
    queue: VecDeque<ViewportEvent>,
    listeners: Vec<(EventKind, Listener)>,
}

impl Viewport {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            position: Point::ZERO,
            config,
            queue: VecDeque::new(),
            listeners: Vec::new(),
        }
    }

    /// Left edge of the visible world.
    pub fn left(&self) -> f32 {
        -self.position.x
    }

    /// Top edge of the visible world.
    pub fn top(&self) -> f32 {
        -self.position.y
    }

    /// Subscribe to one kind of event.
    pub fn on(&mut self, kind: EventKind, listener: impl FnMut(&ViewportEvent) + 'static) {
        self.listeners.push((kind, Box::new(listener)));
    }

    /// Keep the world covering the screen on each axis, emitting a clamp
    /// notification for every axis that had to move.
    pub fn clamp(&mut self) {
        if !self.config.clamp {
            return;
        }
        let original = self.position;
        let x = clamp_axis(original.x, self.config.screen_width, self.config.world_width);
        let y = clamp_axis(original.y, self.config.screen_height, self.config.world_height);

        if x != original.x {
            self.position.x = x;
            self.emit(ViewportEvent::Moved {
                original,
                kind: MoveKind::ClampX,
            });
        }
        if y != original.y {
            self.position.y = y;
            self.emit(ViewportEvent::Moved {
                original,
                kind: MoveKind::ClampY,
            });
        }
    }

    pub fn next_event(&mut self) -> Option<ViewportEvent> {
        self.queue.pop_front()
    }

    #[cfg(test)]
    fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Deliver an event to every subscriber of its kind.
    pub fn notify(&mut self, event: &ViewportEvent) {
        let kind = event.kind();
        for (listening_to, listener) in self.listeners.iter_mut() {
            if *listening_to == kind {
                listener(event);
            }
        }
    }
}

impl ViewportHandle for Viewport {
    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn emit(&mut self, event: ViewportEvent) {
        log::trace!("viewport event: {}", event.describe());
        self.queue.push_back(event);
    }
}

/// Clamp one axis of the container offset. A world smaller than the screen
/// is centred instead.
fn clamp_axis(offset: f32, screen: f32, world: f32) -> f32 {
    if world < screen {
        return (screen - world) / 2.0;
    }
    offset.clamp(screen - world, 0.0)
}
