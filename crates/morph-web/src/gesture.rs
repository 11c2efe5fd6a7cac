//! Bridge to the JS hand-tracking backend.
//!
//! The detector runs asynchronously in the host page and pushes landmark
//! frames through [`submit_hand_frame`]; the render loop drains at most one
//! frame per tick. Readiness is a one-way ladder: `Loading -> Ready`, or
//! `Loading -> Failed` when the load timeout fires first. A late ready
//! signal after the timeout is ignored for the rest of the session.

use morph_core::constants::GESTURE_LOAD_TIMEOUT_MS;
use morph_core::interaction::{parse_hand_frame, HandSet};
use std::cell::{Cell, RefCell};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendState {
    Loading,
    Ready,
    Failed,
}

thread_local! {
    static STATE: Cell<BackendState> = const { Cell::new(BackendState::Loading) };
    static PENDING: RefCell<Option<HandSet>> = const { RefCell::new(None) };
}

pub fn state() -> BackendState {
    STATE.with(|s| s.get())
}

/// Drain the most recent detector frame, if one arrived since the last tick.
pub fn take_pending() -> Option<HandSet> {
    PENDING.with(|p| p.borrow_mut().take())
}

/// Called from JS once the hand-tracking model has finished loading.
#[wasm_bindgen]
pub fn gesture_backend_ready() {
    STATE.with(|s| match s.get() {
        BackendState::Loading => {
            s.set(BackendState::Ready);
            log::info!("[gesture] hand tracking ready");
        }
        other => log::warn!("[gesture] ready signal ignored in state {other:?}"),
    });
}

/// Called from JS with one detector frame: `hand_count` hands, each a run of
/// landmarks packed as x,y,z triples. An empty frame (zero hands) is still a
/// frame; it drives the no-hand decay.
#[wasm_bindgen]
pub fn submit_hand_frame(data: &[f32], hand_count: usize) {
    if state() != BackendState::Ready {
        return;
    }
    match parse_hand_frame(data, hand_count) {
        Some(hands) => PENDING.with(|p| *p.borrow_mut() = Some(hands)),
        None => log::warn!(
            "[gesture] dropping malformed frame: {} floats for {} hands",
            data.len(),
            hand_count
        ),
    }
}

/// Arm the one-shot load timeout. If the backend has not reported ready by
/// then, the session falls back to mouse control permanently.
pub fn arm_load_timeout(window: &web::Window) {
    let closure = Closure::wrap(Box::new(move || {
        STATE.with(|s| {
            if s.get() == BackendState::Loading {
                s.set(BackendState::Failed);
                log::warn!("[gesture] hand tracking did not load; using mouse control");
            }
        });
    }) as Box<dyn FnMut()>);
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        GESTURE_LOAD_TIMEOUT_MS,
    );
    closure.forget();
}
