// ============================================================================
// controller.rs - Glidepan
// Velocity-based panning controller: impulses on key-down, acceleration while
// held, deceleration to rest when released, boundary-clamp feedback.
// ============================================================================

use crate::config::PanConfig;
use crate::events::{MoveKind, ViewportEvent};
use crate::input::{Direction, DirectionFlags};
use crate::vector::Point;
use crate::viewport::{Tickable, ViewportHandle};

/// Converts held pan directions into smooth viewport motion.
///
/// Velocity is in units per second. Positive x pans right and positive y pans
/// down, so the viewport offset moves against the velocity sign.
#[derive(Clone, Debug)]
pub struct PanController {
    config: PanConfig,
    velocity: Point,
    held: DirectionFlags,
    impulses: u32,
}

impl PanController {
    pub fn new(config: PanConfig) -> Self {
        Self {
            config,
            velocity: Point::ZERO,
            held: DirectionFlags::default(),
            impulses: 0,
        }
    }

    pub fn config(&self) -> &PanConfig {
        &self.config
    }

    pub fn velocity(&self) -> Point {
        self.velocity
    }

    pub fn held(&self) -> DirectionFlags {
        self.held
    }

    pub fn active_impulses(&self) -> u32 {
        self.impulses
    }

    pub fn is_moving(&self) -> bool {
        !self.velocity.is_zero()
    }

    pub fn is_accelerating(&self) -> bool {
        self.impulses > 0
    }

    /// Start panning in `direction`. The axis velocity jumps straight to the
    /// impulse speed. Pressing an already held direction does nothing.
    pub fn set_move(&mut self, direction: Direction) {
        if self.held.get(direction) {
            return;
        }
        self.held.set(direction, true);
        self.impulses += 1;

        let impulse = direction.sign() * self.config.impulse_velocity;
        if direction.is_horizontal() {
            self.velocity.x = impulse;
        } else {
            self.velocity.y = impulse;
        }
        log::debug!("pan {} pressed, velocity now {:?}", direction.name(), self.velocity);
    }

    /// Stop driving `direction`. Velocity is left for the next tick to
    /// decelerate. Releasing a direction that is not held does nothing.
    pub fn remove_move(&mut self, direction: Direction) {
        if !self.held.get(direction) {
            return;
        }
        self.held.set(direction, false);
        self.impulses -= 1;
        log::debug!("pan {} released", direction.name());
    }

    /// Advance velocity by `dt` seconds: accelerate, cap, then decelerate
    /// released axes.
    fn step_velocity(&mut self, dt: f32) {
        let accel = self.config.acceleration * dt;
        for direction in Direction::ALL {
            if !self.held.get(direction) {
                continue;
            }
            if direction.is_horizontal() {
                self.velocity.x += direction.sign() * accel;
            } else {
                self.velocity.y += direction.sign() * accel;
            }
        }

        let max = self.config.max_velocity;
        self.velocity.x = self.velocity.x.clamp(-max, max);
        self.velocity.y = self.velocity.y.clamp(-max, max);

        // Both axes share the overall speed so a diagonal coast stays straight.
        let speed = self.velocity.magnitude();
        if speed == 0.0 {
            return;
        }
        let decel = self.config.deceleration * dt;
        if !self.held.horizontal_held() {
            self.velocity.x += decelerate(self.velocity.x, speed, decel);
        }
        if !self.held.vertical_held() {
            self.velocity.y += decelerate(self.velocity.y, speed, decel);
        }
    }
}

impl Default for PanController {
    fn default() -> Self {
        Self::new(PanConfig::default())
    }
}

/// Velocity change that slows `velocity` toward zero without crossing it.
fn decelerate(velocity: f32, speed: f32, decel: f32) -> f32 {
    let delta = (-velocity / speed) * decel;
    if velocity > 0.0 {
        delta.max(-velocity)
    } else if velocity < 0.0 {
        delta.min(-velocity)
    } else {
        0.0
    }
}

impl Tickable for PanController {
    fn on_tick(&mut self, viewport: &mut dyn ViewportHandle, dt_ms: f32) {
        let was_moving = self.is_moving();
        if !was_moving && !self.is_accelerating() {
            return;
        }
        let dt = dt_ms / 1000.0;
        self.step_velocity(dt);

        let original = viewport.position();
        viewport.set_position(Point::new(
            original.x - self.velocity.x * dt,
            original.y - self.velocity.y * dt,
        ));
        viewport.emit(ViewportEvent::Moved {
            original,
            kind: MoveKind::Animate,
        });

        if was_moving && !self.is_moving() {
            viewport.emit(ViewportEvent::MovedEnd);
        }
    }

    fn on_event(&mut self, viewport: &mut dyn ViewportHandle, event: &ViewportEvent) {
        let ViewportEvent::Moved { kind, .. } = event else {
            return;
        };
        if !self.is_moving() {
            return;
        }
        match kind {
            MoveKind::ClampX => self.velocity.x = 0.0,
            MoveKind::ClampY => self.velocity.y = 0.0,
            MoveKind::Animate => return,
        }
        log::debug!("{} hit, velocity now {:?}", kind.tag(), self.velocity);

        // A coast stopped by the boundary will not tick again, so announce it here.
        if !self.is_moving() && !self.is_accelerating() {
            viewport.emit(ViewportEvent::MovedEnd);
        }
    }
}
