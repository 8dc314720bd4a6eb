//! WASM bindings for the browser front end.
//!
//! The page renders whatever snapshot comes back from each call. Deferred
//! work is pulled with `takeScheduled()`, run through `setTimeout`, and handed
//! back to `fire()`.

use serde::Serialize;
use tracing::debug;
use wasm_bindgen::prelude::*;

use crate::config::SessionConfig;
use crate::error::GameError;
use crate::game::GameSession;
use crate::schedule::{TaskQueue, Ticket};
use crate::types::Snapshot;

#[wasm_bindgen]
pub struct WasmSession {
    session: GameSession,
    queue: TaskQueue,
}

#[wasm_bindgen]
impl WasmSession {
    /// `config` may be `undefined` for defaults, or
    /// `{ cpu_delay_ms, result_delay_ms, seed }` with any field omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmSession, JsValue> {
        let config: SessionConfig = if config.is_undefined() || config.is_null() {
            SessionConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let (session, queue) = GameSession::with_queue(config);
        Ok(WasmSession { session, queue })
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.snapshot())
    }

    #[wasm_bindgen(js_name = placeAt)]
    pub fn place_at(&mut self, index: u8) -> Result<JsValue, JsValue> {
        let result = self.session.place_at(index);
        self.respond(result)
    }

    pub fn pass(&mut self) -> Result<JsValue, JsValue> {
        let result = self.session.pass();
        self.respond(result)
    }

    pub fn undo(&mut self) -> Result<JsValue, JsValue> {
        let result = self.session.undo();
        self.respond(result)
    }

    pub fn reset(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.session.reset())
    }

    #[wasm_bindgen(js_name = endNow)]
    pub fn end_now(&mut self) -> Result<JsValue, JsValue> {
        let result = self.session.end_now();
        self.respond(result)
    }

    #[wasm_bindgen(js_name = toggleEditMode)]
    pub fn toggle_edit_mode(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.session.toggle_edit_mode())
    }

    /// Legal cells (0..=63) for the human player.
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Vec<u8> {
        self.session.legal_moves()
    }

    /// Pending tickets as `[{ task, delay_ms, generation }]`, oldest first.
    #[wasm_bindgen(js_name = takeScheduled)]
    pub fn take_scheduled(&self) -> Result<JsValue, JsValue> {
        to_js(&self.queue.drain())
    }

    /// Runs a ticket obtained from `takeScheduled()`.
    pub fn fire(&mut self, ticket: JsValue) -> Result<JsValue, JsValue> {
        let ticket: Ticket = serde_wasm_bindgen::from_value(ticket)?;
        let result = self.session.fire(ticket);
        self.respond(result)
    }

    /// Summaries of every finished game so far.
    #[wasm_bindgen(js_name = runHistory)]
    pub fn run_history(&self) -> Result<JsValue, JsValue> {
        to_js(self.session.runs().as_slice())
    }
}

impl WasmSession {
    fn respond(&self, result: Result<Snapshot, GameError>) -> Result<JsValue, JsValue> {
        let snapshot = result.unwrap_or_else(|err| {
            debug!(%err, "input ignored");
            self.session.snapshot()
        });
        to_js(&snapshot)
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}
