//! Per-frame orchestration: drain detector frames, advance the simulation,
//! and hand the live buffers to the host-page renderer.

use crate::audio::MicCapture;
use crate::gesture::{self, BackendState};
use crate::input::MouseState;
use crate::overlay;
use instant::Instant;
use js_sys::Float32Array;
use morph_core::interaction::{select_input, InteractionSignal, InteractionTracker, Swipe};
use morph_core::particles::ParticleSimulation;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

thread_local! {
    static RENDER_CB: RefCell<Option<js_sys::Function>> = const { RefCell::new(None) };
}

/// Register the host-page render callback. It receives `(buffers, uniforms)`
/// whenever the simulation stepped; the typed-array views alias WASM memory
/// and must be consumed before the callback returns.
#[wasm_bindgen]
pub fn set_render_callback(cb: js_sys::Function) {
    RENDER_CB.with(|r| *r.borrow_mut() = Some(cb));
}

pub struct FrameContext {
    pub sim: Rc<RefCell<ParticleSimulation>>,
    pub tracker: Rc<RefCell<InteractionTracker>>,
    pub mic: Rc<RefCell<Option<MicCapture>>>,
    pub mouse: Rc<RefCell<MouseState>>,
    pub document: web::Document,
    pub last_instant: Instant,
    pub last_status: String,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        // Clamp dt so a backgrounded tab does not lurch on return.
        let dt = (now - self.last_instant).as_secs_f32().min(0.1);
        self.last_instant = now;

        let pending = gesture::take_pending();
        let backend_ready = gesture::state() == BackendState::Ready;
        let pointer = self.mouse.borrow().sample();
        {
            let input = select_input(backend_ready, pending.as_deref(), pointer);
            self.tracker.borrow_mut().sample(input, now);
        }
        let signal = self.tracker.borrow().current();

        let bands = self
            .mic
            .borrow_mut()
            .as_mut()
            .map(|m| m.sample())
            .unwrap_or_default();

        {
            let mut sim = self.sim.borrow_mut();
            if let Some(swipe) = signal.swipe {
                let next = match swipe {
                    Swipe::Right => sim.shape().next(),
                    Swipe::Left => sim.shape().prev(),
                };
                log::info!("[gesture] swipe -> {}", next.name());
                sim.set_shape(next);
            }
            sim.update(dt, &signal, &bands);
            if sim.take_dirty() {
                present(&sim);
            }
        }

        self.update_status(&signal);
    }

    fn update_status(&mut self, signal: &InteractionSignal) {
        let (text, color) = match gesture::state() {
            BackendState::Loading => ("Loading hand tracking...".to_string(), "#aaaaaa"),
            BackendState::Failed => ("Mouse control active".to_string(), "#aaaaaa"),
            BackendState::Ready => {
                if signal.swipe.is_some() {
                    ("Swipe".to_string(), "#ffff00")
                } else if signal.hand_position.is_some() {
                    (format!("Scale: {:.2}", signal.scale), "#00ffff")
                } else {
                    ("Waiting for hands...".to_string(), "#aaaaaa")
                }
            }
        };
        if text != self.last_status {
            overlay::set_status(&self.document, &text, color);
            self.last_status = text;
        }
    }
}

fn present(sim: &ParticleSimulation) {
    RENDER_CB.with(|r| {
        let cb = r.borrow();
        let Some(cb) = cb.as_ref() else {
            return;
        };
        let view = sim.render_view();
        let set = |obj: &js_sys::Object, key: &str, val: &JsValue| {
            let _ = js_sys::Reflect::set(obj, &JsValue::from_str(key), val);
        };

        let buffers = js_sys::Object::new();
        // Zero-copy views into linear memory; stale the moment WASM runs
        // again, so the callback must upload or copy synchronously.
        unsafe {
            set(&buffers, "positions", &Float32Array::view(view.positions));
            set(&buffers, "colors", &Float32Array::view(view.colors));
            set(&buffers, "sizes", &Float32Array::view(view.sizes));
        }

        let uniforms = js_sys::Object::new();
        set(
            &uniforms,
            "elapsedTime",
            &JsValue::from_f64(view.uniforms.elapsed_time as f64),
        );
        set(
            &uniforms,
            "visualScale",
            &JsValue::from_f64(view.uniforms.visual_scale as f64),
        );
        set(
            &uniforms,
            "audioLevel",
            &JsValue::from_f64(view.uniforms.audio_level as f64),
        );
        let color = js_sys::Array::of3(
            &JsValue::from_f64(view.uniforms.color[0] as f64),
            &JsValue::from_f64(view.uniforms.color[1] as f64),
            &JsValue::from_f64(view.uniforms.color[2] as f64),
        );
        set(&uniforms, "color", &color);

        if let Err(e) = cb.call2(&JsValue::NULL, &buffers, &uniforms) {
            log::error!("[render] callback error: {e:?}");
        }
    });
}

/// Drive `FrameContext::frame` from requestAnimationFrame.
pub fn start_loop(mut ctx: FrameContext) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        ctx.frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w
            .request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
