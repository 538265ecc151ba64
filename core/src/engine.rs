//! Game engine for browser WASM builds
//!
//! The main facade exposed to JavaScript via wasm-bindgen. Presentation
//! drives it with class selection and swipes and animates whatever the
//! returned event lists describe; nothing flows back in.

use wasm_bindgen::prelude::*;

use crate::log;
use crate::rng::XorShiftRng;
use crate::state::GameSession;
use crate::turn::resolve_swipe;
use crate::types::{Direction, TemplarClass};
use crate::view::GameView;

/// The main game engine exposed to WASM
#[wasm_bindgen]
pub struct GameEngine {
    session: GameSession,
    rng: XorShiftRng,
}

#[wasm_bindgen]
impl GameEngine {
    /// Create a new engine with a browser-provided random seed
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<GameEngine, String> {
        let mut bytes = [0u8; 8];
        getrandom::getrandom(&mut bytes).map_err(|e| format!("Failed to seed RNG: {e}"))?;
        Ok(Self::with_seed(u64::from_le_bytes(bytes)))
    }

    /// Create a new engine with a fixed seed (replays, tests)
    pub fn with_seed(seed: u64) -> GameEngine {
        log::info("=== TEMPLAR ENGINE INITIALIZED ===");
        GameEngine {
            session: GameSession::new(),
            rng: XorShiftRng::seed_from_u64(seed),
        }
    }

    /// Select the templar class: "knight", "wizard" or "defender"
    ///
    /// Returns the bootstrap event list. Callable exactly once.
    pub fn choose_class(&mut self, class: &str) -> Result<JsValue, String> {
        log::action("choose_class", class);
        let class = parse_class(class)?;
        let events = self
            .session
            .choose_class(class, &mut self.rng)
            .map_err(|e| format!("Class selection failed: {e:?}"))?;
        serde_wasm_bindgen::to_value(&events).map_err(|e| format!("Serialization failed: {e:?}"))
    }

    /// Resolve one swipe: "up", "down", "left" or "right"
    ///
    /// Returns the turn outcome, or null when the swipe was ignored
    /// (class not chosen yet, turn in progress, or game over).
    pub fn swipe(&mut self, direction: &str) -> Result<JsValue, String> {
        log::action("swipe", direction);
        let direction = parse_direction(direction)?;
        let outcome = resolve_swipe(&mut self.session, direction, &mut self.rng)
            .map_err(|e| format!("Turn resolution failed: {e:?}"))?;
        match outcome {
            Some(outcome) => serde_wasm_bindgen::to_value(&outcome)
                .map_err(|e| format!("Serialization failed: {e:?}")),
            None => Ok(JsValue::NULL),
        }
    }

    /// Get the current game view as JSON
    pub fn view(&self) -> JsValue {
        log::debug("view", "Serializing session to view");
        let view = GameView::from_session(&self.session);
        match serde_wasm_bindgen::to_value(&view) {
            Ok(val) => val,
            Err(e) => {
                log::error(&format!("view serialization failed: {e:?}"));
                JsValue::NULL
            }
        }
    }
}

fn parse_class(value: &str) -> Result<TemplarClass, String> {
    match value.to_ascii_lowercase().as_str() {
        "knight" => Ok(TemplarClass::Knight),
        "wizard" => Ok(TemplarClass::Wizard),
        "defender" => Ok(TemplarClass::Defender),
        other => Err(format!("Unknown class: {other}")),
    }
}

fn parse_direction(value: &str) -> Result<Direction, String> {
    match value.to_ascii_lowercase().as_str() {
        "up" => Ok(Direction::Up),
        "down" => Ok(Direction::Down),
        "left" => Ok(Direction::Left),
        "right" => Ok(Direction::Right),
        other => Err(format!("Unknown direction: {other}")),
    }
}
