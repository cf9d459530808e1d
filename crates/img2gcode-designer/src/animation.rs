//! Fixed-step viewport animation.
//!
//! An animation interpolates from the viewport it started at to a target
//! over a fixed number of frames. The host calls [`Animator::step`] once per
//! frame. Starting a new animation bumps the generation so frames of the
//! previous one are ignored.

use img2gcode_core::constants::ZOOM_ANIMATION_FRAMES;

use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveAnimation {
    from: Viewport,
    to: Viewport,
    frame: u32,
}

/// Handle returned when an animation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationToken(u64);

#[derive(Debug, Clone)]
pub struct Animator {
    generation: u64,
    frames: u32,
    active: Option<ActiveAnimation>,
}

impl Animator {
    pub fn new() -> Self {
        Self::with_frames(ZOOM_ANIMATION_FRAMES)
    }

    pub fn with_frames(frames: u32) -> Self {
        Self {
            generation: 0,
            frames: frames.max(1),
            active: None,
        }
    }

    /// Starts animating from `from` to `to`, cancelling any animation in
    /// flight.
    pub fn start(&mut self, from: Viewport, to: Viewport) -> AnimationToken {
        self.generation += 1;
        self.active = Some(ActiveAnimation { from, to, frame: 0 });
        AnimationToken(self.generation)
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_current(&self, token: AnimationToken) -> bool {
        self.active.is_some() && token.0 == self.generation
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Advances the animation owning `token` by one frame and returns the
    /// viewport for that frame. Stale tokens get `None`.
    pub fn step(&mut self, token: AnimationToken) -> Option<Viewport> {
        if token.0 != self.generation {
            return None;
        }
        let frames = self.frames;
        let anim = self.active.as_mut()?;
        anim.frame += 1;
        let t = f64::from(anim.frame) / f64::from(frames);
        let view = if anim.frame >= frames {
            anim.to
        } else {
            anim.from.lerp(&anim.to, ease_out(t))
        };
        if anim.frame >= frames {
            self.active = None;
        }
        Some(view)
    }
}

fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}
