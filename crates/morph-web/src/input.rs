use morph_core::interaction::PointerSample;

/// Last-known pointer position in normalized window coordinates. `active`
/// flips on the first pointer event so an untouched mouse never steers.
#[derive(Default, Clone, Copy)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub pressed: bool,
    pub active: bool,
}

impl MouseState {
    pub fn sample(&self) -> Option<PointerSample> {
        self.active.then_some(PointerSample {
            x: self.x,
            y: self.y,
            pressed: self.pressed,
        })
    }
}
