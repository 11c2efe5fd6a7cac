#![cfg(target_arch = "wasm32")]
//! Browser front-end: wires DOM controls, pointer and hand input, and the
//! microphone to the particle simulation, and streams the live buffers to
//! the host page through a registered render callback.

pub mod audio;
pub mod dom;
pub mod events;
pub mod frame;
pub mod gesture;
pub mod input;
pub mod overlay;

use instant::Instant;
use morph_core::constants::DEFAULT_PARTICLE_COUNT;
use morph_core::interaction::InteractionTracker;
use morph_core::particles::ParticleSimulation;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("morph-web starting");

    if let Err(e) = init() {
        log::error!("init error: {e:?}");
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    // Seed from the wall clock so every session scatters differently.
    let seed = js_sys::Date::now() as u64;
    let sim = Rc::new(RefCell::new(ParticleSimulation::new(
        DEFAULT_PARTICLE_COUNT,
        seed,
    )));
    let tracker = Rc::new(RefCell::new(InteractionTracker::new()));
    let mouse = Rc::new(RefCell::new(input::MouseState::default()));
    let mic: Rc<RefCell<Option<audio::MicCapture>>> = Rc::new(RefCell::new(None));

    events::wire_pointer(&window, mouse.clone());
    events::wire_control_panel(&document, sim.clone(), mic.clone());
    events::wire_global_keydown(&window, sim.clone(), mic.clone());
    gesture::arm_load_timeout(&window);

    frame::start_loop(frame::FrameContext {
        sim,
        tracker,
        mic,
        mouse,
        document,
        last_instant: Instant::now(),
        last_status: String::new(),
    });
    Ok(())
}
