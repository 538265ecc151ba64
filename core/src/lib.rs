//! Board and combat resolution engine for Templar
//!
//! A 5x5 grid of cards (the player's templar, enemies and equippable
//! items) shifts and merges when the player swipes in a cardinal
//! direction. This crate owns the rules: how cards slide, stack, merge,
//! attack and expire during a single swipe-turn. Rendering, audio and
//! input normalization live in the browser shell on top.

mod board;
mod buffs;
mod cards;
mod combat;
mod error;
mod log;
mod movement;
mod rng;
mod state;
mod turn;
mod types;
mod view;

#[cfg(feature = "browser")]
mod engine;

#[cfg(test)]
mod tests;

pub use board::{Board, Coord, GRID_SIZE};
pub use buffs::{apply_buff, remove_buff};
pub use cards::{
    create_elite_enemy, create_enemy, create_item, create_templar, item_buff, ELITE_POOL_SIZE,
    MAX_ITEM_LEVEL, REGULAR_POOL_SIZE,
};
pub use error::{GameError, GameResult};
pub use rng::{GameRng, XorShiftRng};
pub use state::{GameSession, TurnState, ELITE_INTERVAL, MOVES_PER_LEVEL, WEIGHT_LIMIT};
pub use turn::{resolve_swipe, TurnEvent, TurnOutcome};
pub use types::*;
pub use view::{CardView, GameView, ItemView};

#[cfg(feature = "browser")]
pub use engine::GameEngine;

#[cfg(feature = "browser")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn init() {
    // Better panic messages in the browser console
    console_error_panic_hook::set_once();
}
