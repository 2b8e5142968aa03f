// ============================================================================
// script.rs - Glidepan
// Timed press/release sequences for driving a controller without a keyboard.
// ============================================================================

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::controller::PanController;
use crate::input::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyAction {
    Press,
    Release,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub at_ms: f32,
    pub action: KeyAction,
    pub direction: Direction,
}

impl ScriptStep {
    pub fn apply(&self, controller: &mut PanController) {
        match self.action {
            KeyAction::Press => controller.set_move(self.direction),
            KeyAction::Release => controller.remove_move(self.direction),
        }
    }
}

/// Steps ordered by time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub steps: Vec<ScriptStep>,
}

impl InputScript {
    pub fn new(mut steps: Vec<ScriptStep>) -> Self {
        steps.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        Self { steps }
    }

    pub fn from_json(content: &str) -> Result<Self, String> {
        let script: InputScript =
            serde_json::from_str(content).map_err(|e| format!("Invalid script: {}", e))?;
        if let Some(step) = script.steps.iter().find(|s| !s.at_ms.is_finite() || s.at_ms < 0.0) {
            return Err(format!("Script step time must be >= 0, got {}", step.at_ms));
        }
        Ok(Self::new(script.steps))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read script {:?}: {}", path, e))?;
        let script = Self::from_json(&content)?;
        log::info!("Loaded {} script steps from {:?}", script.steps.len(), path);
        Ok(script)
    }

    /// Random presses, each followed by its release, spread over `duration_ms`.
    pub fn random(rng: &mut impl Rng, duration_ms: f32, presses: usize) -> Self {
        let mut steps = Vec::with_capacity(presses * 2);
        if duration_ms <= 0.0 {
            return Self { steps };
        }
        for _ in 0..presses {
            let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
            let pressed_at = rng.gen_range(0.0..duration_ms);
            let held_for = rng.gen_range(0.0..(duration_ms - pressed_at).min(1500.0).max(1.0));
            steps.push(ScriptStep {
                at_ms: pressed_at,
                action: KeyAction::Press,
                direction,
            });
            steps.push(ScriptStep {
                at_ms: pressed_at + held_for,
                action: KeyAction::Release,
                direction,
            });
        }
        Self::new(steps)
    }

    pub fn cursor(&self) -> ScriptCursor<'_> {
        ScriptCursor {
            steps: &self.steps,
            next: 0,
        }
    }
}

/// Walks a script forward in time.
pub struct ScriptCursor<'a> {
    steps: &'a [ScriptStep],
    next: usize,
}

impl<'a> ScriptCursor<'a> {
    /// Steps due at or before `time_ms` not yet returned.
    pub fn due(&mut self, time_ms: f32) -> &'a [ScriptStep] {
        let start = self.next;
        while self.next < self.steps.len() && self.steps[self.next].at_ms <= time_ms {
            self.next += 1;
        }
        &self.steps[start..self.next]
    }

    pub fn is_done(&self) -> bool {
        self.next >= self.steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn json_script_is_sorted_and_replayed_in_order() {
        let script = InputScript::from_json(
            r#"{ "steps": [
                { "at_ms": 200, "action": "release", "direction": "right" },
                { "at_ms": 0, "action": "press", "direction": "right" }
            ] }"#,
        )
        .unwrap();

        let mut cursor = script.cursor();
        let first = cursor.due(0.0);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].action, KeyAction::Press);
        assert!(cursor.due(100.0).is_empty());
        assert_eq!(cursor.due(1000.0).len(), 1);
        assert!(cursor.is_done());
    }

    #[test]
    fn negative_times_are_rejected() {
        let err = InputScript::from_json(
            r#"{ "steps": [ { "at_ms": -5, "action": "press", "direction": "up" } ] }"#,
        )
        .unwrap_err();
        assert!(err.contains("-5"));
    }

    #[test]
    fn random_script_pairs_every_press_with_a_release() {
        let mut rng = StdRng::seed_from_u64(42);
        let script = InputScript::random(&mut rng, 10_000.0, 25);
        assert_eq!(script.steps.len(), 50);

        let mut pan = PanController::default();
        for step in &script.steps {
            step.apply(&mut pan);
        }
        assert!(!pan.is_accelerating());
        assert!(script.steps.windows(2).all(|w| w[0].at_ms <= w[1].at_ms));
    }
}
