// ============================================================================
// ticker.rs - Glidepan
// Per-frame scheduler: ticks the plugin, clamps the viewport, then dispatches
// queued events to the plugin and to subscribers.
// ============================================================================

use crate::viewport::{Tickable, Viewport};

pub struct Ticker<T> {
    viewport: Viewport,
    plugin: T,
    paused: bool,
    frame: u64,
}

impl<T: Tickable> Ticker<T> {
    pub fn new(viewport: Viewport, plugin: T) -> Self {
        Self {
            viewport,
            plugin,
            paused: false,
            frame: 0,
        }
    }

    /// Run one frame of `dt_ms` milliseconds.
    pub fn update(&mut self, dt_ms: f32) {
        self.frame += 1;
        if !self.paused {
            self.plugin.on_tick(&mut self.viewport, dt_ms);
        }
        self.viewport.clamp();

        // Handlers may emit more events; keep going until the queue is empty.
        while let Some(event) = self.viewport.next_event() {
            self.plugin.on_event(&mut self.viewport, &event);
            self.viewport.notify(&event);
        }
    }

    /// Stop ticking the plugin. Events are still dispatched.
    pub fn pause(&mut self) {
        if !self.paused {
            log::debug!("ticker paused at frame {}", self.frame);
        }
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            log::debug!("ticker resumed at frame {}", self.frame);
        }
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn plugin(&self) -> &T {
        &self.plugin
    }

    pub fn plugin_mut(&mut self) -> &mut T {
        &mut self.plugin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewportConfig;
    use crate::events::ViewportEvent;
    use crate::vector::Point;
    use crate::viewport::ViewportHandle;

    /// Nudges the viewport right by one unit per tick and counts what it hears.
    #[derive(Default)]
    struct Nudge {
        ticks: u32,
        heard: u32,
    }

    impl Tickable for Nudge {
        fn on_tick(&mut self, viewport: &mut dyn ViewportHandle, _dt_ms: f32) {
            self.ticks += 1;
            let p = viewport.position();
            viewport.set_position(Point::new(p.x + 1.0, p.y));
        }

        fn on_event(&mut self, _viewport: &mut dyn ViewportHandle, _event: &ViewportEvent) {
            self.heard += 1;
        }
    }

    #[test]
    fn paused_ticker_skips_plugin_but_still_clamps() {
        let config = ViewportConfig {
            clamp: true,
            ..Default::default()
        };
        let mut ticker = Ticker::new(Viewport::new(config), Nudge::default());

        ticker.update(16.0);
        assert_eq!(ticker.plugin().ticks, 1);
        // offset +1 is past the left edge and gets pulled back
        assert_eq!(ticker.viewport().position().x, 0.0);
        assert_eq!(ticker.plugin().heard, 1);

        ticker.pause();
        ticker.update(16.0);
        assert!(ticker.is_paused());
        assert_eq!(ticker.plugin().ticks, 1);
        assert_eq!(ticker.frame(), 2);

        ticker.resume();
        ticker.update(16.0);
        assert_eq!(ticker.plugin().ticks, 2);
    }
}
