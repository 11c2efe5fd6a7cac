//! Gesture and pointer processing.
//!
//! The tracker consumes one [`FrameInput`] per tick and exposes a fresh
//! [`InteractionSignal`] for the simulation. Input priority is decided once
//! per frame by [`select_input`]: hand tracking wins over the pointer, and
//! the pointer wins over idle.

use crate::constants::*;
use glam::{Vec2, Vec3};
use instant::Instant;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// One detected hand: an ordered landmark list in normalized [0,1] video
/// coordinates (z is relative depth). Indices 4 and 8 are the thumb and
/// index fingertips.
#[derive(Clone, Debug)]
pub struct Hand {
    pub landmarks: Vec<Vec3>,
}

impl Hand {
    /// Euclidean thumb-tip to index-tip distance, if both landmarks exist.
    pub fn pinch_distance(&self) -> Option<f32> {
        if self.landmarks.len() < MIN_LANDMARKS {
            return None;
        }
        Some(self.landmarks[THUMB_TIP].distance(self.landmarks[INDEX_TIP]))
    }
}

/// Per-frame hand set; the detector reports at most two hands.
pub type HandSet = SmallVec<[Hand; 2]>;

/// Decode a flat detector frame: `hand_count` hands, each an equal run of
/// landmarks packed as x,y,z triples. Zero hands is a valid empty frame (it
/// drives the no-hand decay); a byte budget that leaves a hand without
/// complete triples is malformed and yields `None`.
pub fn parse_hand_frame(data: &[f32], hand_count: usize) -> Option<HandSet> {
    let mut hands = HandSet::new();
    if hand_count == 0 {
        return Some(hands);
    }
    if data.is_empty() || data.len() % hand_count != 0 {
        return None;
    }
    let per_hand = data.len() / hand_count;
    if per_hand % 3 != 0 {
        return None;
    }
    for chunk in data.chunks_exact(per_hand) {
        let landmarks = chunk
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
            .collect();
        hands.push(Hand { landmarks });
    }
    Some(hands)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Swipe {
    Left,
    Right,
}

/// The normalized per-frame output of gesture/pointer processing.
#[derive(Clone, Copy, Debug)]
pub struct InteractionSignal {
    pub scale: f32,
    pub is_open: bool,
    pub hand_position: Option<Vec2>,
    pub swipe: Option<Swipe>,
}

impl Default for InteractionSignal {
    fn default() -> Self {
        Self {
            scale: 1.0,
            is_open: true,
            hand_position: None,
            swipe: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub pressed: bool,
}

/// The single input source chosen for a frame.
#[derive(Clone, Copy, Debug)]
pub enum FrameInput<'a> {
    Hands(&'a [Hand]),
    Pointer(PointerSample),
    Idle,
}

/// Fixed input priority: a ready hand backend always wins (even when it
/// reports no new detection this frame), then the pointer, then idle.
pub fn select_input<'a>(
    backend_ready: bool,
    hands: Option<&'a [Hand]>,
    pointer: Option<PointerSample>,
) -> FrameInput<'a> {
    if backend_ready {
        match hands {
            Some(h) => FrameInput::Hands(h),
            None => FrameInput::Idle, // no new detector frame; keep last signal
        }
    } else if let Some(p) = pointer {
        FrameInput::Pointer(p)
    } else {
        FrameInput::Idle
    }
}

struct HistorySample {
    x: f32,
    at: Instant,
}

pub struct InteractionTracker {
    signal: InteractionSignal,
    history: VecDeque<HistorySample>,
    swipe_cooldown: u32,
}

impl Default for InteractionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionTracker {
    pub fn new() -> Self {
        Self {
            signal: InteractionSignal::default(),
            history: VecDeque::with_capacity(HAND_HISTORY_LEN),
            swipe_cooldown: 0,
        }
    }

    /// Process one frame of input. `now` timestamps the swipe history.
    pub fn sample(&mut self, input: FrameInput<'_>, now: Instant) {
        match input {
            FrameInput::Hands(hands) => self.sample_hands(hands, now),
            FrameInput::Pointer(p) => self.sample_pointer(p),
            FrameInput::Idle => {}
        }
    }

    /// The latest computed signal; idempotent between samples.
    pub fn current(&self) -> InteractionSignal {
        self.signal
    }

    fn sample_hands(&mut self, hands: &[Hand], now: Instant) {
        if self.swipe_cooldown > 0 {
            self.swipe_cooldown -= 1;
            self.signal.swipe = None;
        }

        if hands.is_empty() {
            // No hands: decay the scale toward neutral and forget the gesture
            // history so a reappearing hand starts a fresh swipe window.
            self.signal.scale =
                self.signal.scale * NO_HAND_DECAY + 1.0 * (1.0 - NO_HAND_DECAY);
            self.signal.hand_position = None;
            self.signal.swipe = None;
            self.history.clear();
            return;
        }

        let mut dist_sum = 0.0;
        let mut dist_n = 0usize;
        for hand in hands {
            if let Some(d) = hand.pinch_distance() {
                dist_sum += d;
                dist_n += 1;
            }
        }
        if dist_n > 0 {
            let avg = dist_sum / dist_n as f32;
            let scale = ((avg - PINCH_DIST_OFFSET) * PINCH_DIST_GAIN + PINCH_SCALE_BASE)
                .clamp(SCALE_MIN, SCALE_MAX);
            self.signal.scale = scale;
            self.signal.is_open = scale > 1.0;
        }

        // Centroid over all landmark points of all hands.
        let mut center = Vec2::ZERO;
        let mut points = 0usize;
        for hand in hands {
            for p in &hand.landmarks {
                center += Vec2::new(p.x, p.y);
                points += 1;
            }
        }
        if points > 0 {
            let centroid = center / points as f32;
            self.signal.hand_position = Some(centroid);

            self.history.push_back(HistorySample {
                x: centroid.x,
                at: now,
            });
            if self.history.len() > HAND_HISTORY_LEN {
                self.history.pop_front();
            }
            if self.swipe_cooldown == 0 && self.history.len() >= HAND_HISTORY_LEN {
                if let Some(swipe) = self.detect_swipe() {
                    self.signal.swipe = Some(swipe);
                    self.swipe_cooldown = SWIPE_COOLDOWN_FRAMES;
                }
            }
        }
    }

    /// A swipe is a fast (under 500 ms), significant (over 0.15 of screen
    /// width) horizontal displacement across the full history window.
    fn detect_swipe(&self) -> Option<Swipe> {
        let first = self.history.front()?;
        let last = self.history.back()?;
        let elapsed = last.at.saturating_duration_since(first.at);
        if elapsed.as_millis() as u64 > SWIPE_WINDOW_MS {
            return None;
        }
        let dx = last.x - first.x;
        if dx > SWIPE_DX_THRESHOLD {
            Some(Swipe::Right)
        } else if dx < -SWIPE_DX_THRESHOLD {
            Some(Swipe::Left)
        } else {
            None
        }
    }

    fn sample_pointer(&mut self, p: PointerSample) {
        // Press contracts, release opens slightly; smoothed so the scale
        // never jumps.
        let target = if p.pressed {
            POINTER_PRESSED_SCALE
        } else {
            POINTER_RELEASED_SCALE
        };
        self.signal.scale += (target - self.signal.scale) * POINTER_SMOOTH_ALPHA;
        self.signal.is_open = !p.pressed;
        self.signal.hand_position = Some(Vec2::new(p.x, p.y));
        self.signal.swipe = None;
    }
}
