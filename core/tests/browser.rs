//! Browser smoke tests for the wasm-bindgen facade
//!
//! Run with `wasm-pack test --headless --chrome core -- --features browser`.

#![cfg(all(target_arch = "wasm32", feature = "browser"))]

use templar_core::GameEngine;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn engine_round_trip() {
    let mut engine = GameEngine::with_seed(7);
    engine.choose_class("knight").expect("class accepted");

    let outcome = engine.swipe("left").expect("swipe resolves");
    assert!(!outcome.is_null());

    let view = engine.view();
    assert!(!view.is_null());
}

#[wasm_bindgen_test]
fn swipe_before_class_selection_returns_null() {
    let mut engine = GameEngine::with_seed(7);
    let outcome = engine.swipe("up").expect("no error");
    assert!(outcome.is_null());
}

#[wasm_bindgen_test]
fn unknown_inputs_are_rejected() {
    let mut engine = GameEngine::with_seed(7);
    assert!(engine.choose_class("bard").is_err());
    engine.choose_class("defender").expect("class accepted");
    assert!(engine.swipe("diagonal").is_err());
}
