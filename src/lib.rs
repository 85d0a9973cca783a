//! Flower Says core crate.
//!
//! A bird sings a pattern of flower notes; the player answers by clicking the
//! flowers (or pressing S / D / F ...) in the same order. Correct answers count
//! toward milestones that unlock more flowers and longer patterns.
//!
//! Game logic (`game`, `playback`, `progression`, ...) is plain Rust and runs
//! natively under `cargo test`. The `web` module plugs it into the browser.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod flower;
pub mod game;
pub mod input;
pub mod keys;
pub mod pattern;
pub mod playback;
pub mod progression;
mod web;

pub use config::{GameConfig, Timing};
pub use error::{AudioError, ConfigError, ScheduleError};
pub use flower::{ALL_FLOWERS, Flower, Variant, Volume};
pub use game::{FlowerGame, FlowerView, GameEvent, GameView};
pub use input::{Round, Verdict};
pub use keys::Command;
pub use pattern::Rng;
pub use playback::{CancelToken, CuePlayer, Scheduler, Sequencer, Step, Tick, TimerHandle};
pub use progression::{LengthRange, Milestone, Progression};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

// -----------------------------------------------------------------------------
// Entry points
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::launch(GameConfig::default())
}

/// Start with a JSON config, e.g. `{"variant":"extended","volume":7}`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    web::launch(config)
}

#[wasm_bindgen]
pub fn stop_game() {
    web::shutdown();
}

// Pointer-style intents for hosts that draw their own buttons.

#[wasm_bindgen]
pub fn press_flower(index: usize) {
    if let Some(flower) = Flower::from_index(index) {
        web::dispatch(web::Action::Command(Command::Press(flower)));
    }
}

#[wasm_bindgen]
pub fn replay_pattern() {
    web::dispatch(web::Action::Command(Command::Replay));
}

#[wasm_bindgen]
pub fn submit_pattern() {
    web::dispatch(web::Action::Command(Command::Submit));
}

#[wasm_bindgen]
pub fn undo_flower() {
    web::dispatch(web::Action::Command(Command::Undo));
}

#[wasm_bindgen]
pub fn clear_flowers() {
    web::dispatch(web::Action::Command(Command::ClearAll));
}

#[wasm_bindgen]
pub fn set_volume(value: u8) {
    web::set_volume(value);
}
