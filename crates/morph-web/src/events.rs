//! DOM event wiring: pointer, control panel, and keyboard shortcuts.

use crate::audio::MicCapture;
use crate::dom;
use crate::input::MouseState;
use morph_core::color::parse_hex_color;
use morph_core::particles::{clamp_count, Command, ParticleSimulation, SimMode};
use morph_core::shapes::ShapeKind;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Pointer position in normalized [0,1] window coordinates.
fn normalized_xy(ev: &web::PointerEvent) -> Option<(f32, f32)> {
    let window = web::window()?;
    let w = window.inner_width().ok()?.as_f64()? as f32;
    let h = window.inner_height().ok()?.as_f64()? as f32;
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    Some((
        (ev.client_x() as f32 / w).clamp(0.0, 1.0),
        (ev.client_y() as f32 / h).clamp(0.0, 1.0),
    ))
}

pub fn wire_pointer(window: &web::Window, mouse: Rc<RefCell<MouseState>>) {
    {
        let mouse = mouse.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if let Some((x, y)) = normalized_xy(&ev) {
                let mut ms = mouse.borrow_mut();
                ms.x = x;
                ms.y = y;
                ms.active = true;
            }
        }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let mouse = mouse.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut ms = mouse.borrow_mut();
            if let Some((x, y)) = normalized_xy(&ev) {
                ms.x = x;
                ms.y = y;
            }
            ms.pressed = true;
            ms.active = true;
        }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            mouse.borrow_mut().pressed = false;
        }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn wire_control_panel(
    document: &web::Document,
    sim: Rc<RefCell<ParticleSimulation>>,
    mic: Rc<RefCell<Option<MicCapture>>>,
) {
    for kind in ShapeKind::ALL {
        let sim = sim.clone();
        dom::add_click_listener(document, &format!("shape-{}", kind.name()), move || {
            sim.borrow_mut().apply(Command::SetShape(kind));
        });
    }
    {
        let sim = sim.clone();
        dom::add_click_listener(document, "mode-shape", move || {
            sim.borrow_mut().apply(Command::SetMode(SimMode::Shape));
        });
    }
    {
        let sim = sim.clone();
        dom::add_click_listener(document, "mode-gravity", move || {
            sim.borrow_mut().apply(Command::SetMode(SimMode::Gravity));
        });
    }
    {
        let sim = sim.clone();
        dom::add_click_listener(document, "btn-rainbow", move || {
            sim.borrow_mut().apply(Command::ToggleRainbow);
        });
    }
    {
        let mic = mic.clone();
        dom::add_click_listener(document, "btn-mic", move || {
            toggle_mic(&mic);
        });
    }
    {
        let sim = sim.clone();
        dom::add_input_listener(document, "particle-slider", move |value| {
            match value.parse::<usize>() {
                Ok(raw) => sim.borrow_mut().apply(Command::SetCount(clamp_count(raw))),
                Err(_) => log::warn!("[ui] bad particle count: {value:?}"),
            }
        });
    }
    {
        let sim = sim.clone();
        dom::add_input_listener(document, "color-picker", move |value| {
            match parse_hex_color(&value) {
                Some(rgb) => sim.borrow_mut().apply(Command::SetColor(rgb)),
                None => log::warn!("[ui] bad color value: {value:?}"),
            }
        });
    }
}

pub fn wire_global_keydown(
    window: &web::Window,
    sim: Rc<RefCell<ParticleSimulation>>,
    mic: Rc<RefCell<Option<MicCapture>>>,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        let key = ev.key();
        // Digits 1-9 select shapes directly.
        if key.len() == 1 {
            if let Some(d) = key.chars().next().and_then(|c| c.to_digit(10)) {
                if (1..=9).contains(&d) {
                    let kind = ShapeKind::ALL[(d - 1) as usize];
                    sim.borrow_mut().apply(Command::SetShape(kind));
                    return;
                }
            }
        }
        match key.as_str() {
            "g" | "G" => sim.borrow_mut().apply(Command::SetMode(SimMode::Gravity)),
            "s" | "S" => sim.borrow_mut().apply(Command::SetMode(SimMode::Shape)),
            "r" | "R" => sim.borrow_mut().apply(Command::ToggleRainbow),
            "m" | "M" => toggle_mic(&mic),
            "ArrowRight" => {
                let next = sim.borrow().shape().next();
                sim.borrow_mut().apply(Command::SetShape(next));
            }
            "ArrowLeft" => {
                let prev = sim.borrow().shape().prev();
                sim.borrow_mut().apply(Command::SetShape(prev));
            }
            _ => {}
        }
    }) as Box<dyn FnMut(_)>);
    let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// First use requests the microphone; later uses suspend/resume the context.
fn toggle_mic(mic: &Rc<RefCell<Option<MicCapture>>>) {
    if let Some(m) = mic.borrow_mut().as_mut() {
        m.toggle();
        return;
    }
    let mic = mic.clone();
    spawn_local(async move {
        match MicCapture::init().await {
            Ok(m) => *mic.borrow_mut() = Some(m),
            Err(e) => log::error!("[audio] microphone unavailable: {e:?}"),
        }
    });
}
