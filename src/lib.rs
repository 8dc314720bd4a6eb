use wasm_bindgen::prelude::*;

pub mod board;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod history;
pub mod rules;
pub mod schedule;
pub mod turn;
pub mod types;
pub mod wasm;

pub use error::GameError;
pub use game::GameSession;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
