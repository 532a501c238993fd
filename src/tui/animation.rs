//! Animation helpers for smooth TUI transitions.
//!
//! The funnel core only produces snapshots. Animation is an interpolation
//! between the widths of the snapshot on screen and the newest one.

use std::time::Duration;

use crate::core::STAGE_COUNT;

/// Animation controller for frame-based animations
pub struct AnimationController {
    frame: usize,
    fps: usize,
}

impl AnimationController {
    /// Create a new animation controller
    pub fn new(fps: usize) -> Self {
        Self {
            frame: 0,
            fps: fps.max(1),
        }
    }

    /// Advance to the next frame
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % (self.fps * 10); // Loop every 10 seconds
    }

    /// Get the current frame number
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Time between two frames
    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(1000 / self.fps as u64)
    }

    /// Cursor shown after the focused text field, blinking twice a second
    pub fn cursor_char(&self) -> &'static str {
        if (self.frame * 2 / self.fps) % 2 == 0 {
            "▏"
        } else {
            " "
        }
    }
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new(30)
    }
}

/// Interpolates bar widths from one funnel snapshot to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct BarTransition {
    from: [f64; STAGE_COUNT],
    to: [f64; STAGE_COUNT],
    frame: u16,
    frames: u16,
}

impl BarTransition {
    /// A finished transition resting at `widths`.
    pub fn settled(widths: [f64; STAGE_COUNT], frames: u16) -> Self {
        Self {
            from: widths,
            to: widths,
            frame: frames,
            frames,
        }
    }

    /// Start moving towards `target` from whatever is currently displayed.
    ///
    /// With zero frames the target is shown immediately.
    pub fn retarget(&mut self, target: [f64; STAGE_COUNT]) {
        self.from = self.current();
        self.to = target;
        self.frame = 0;
        if self.frames == 0 {
            self.from = target;
        }
    }

    pub fn step(&mut self) {
        self.frame = self.frame.saturating_add(1).min(self.frames);
    }

    pub fn is_done(&self) -> bool {
        self.frame >= self.frames
    }

    /// Widths to draw right now.
    pub fn current(&self) -> [f64; STAGE_COUNT] {
        if self.is_done() {
            return self.to;
        }
        let t = ease_out(f64::from(self.frame) / f64::from(self.frames));
        std::array::from_fn(|i| self.from[i] + (self.to[i] - self.from[i]) * t)
    }
}

/// Cubic ease-out on `[0, 1]`.
fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Render a horizontal bar `cells` wide, filled to `fraction`.
pub fn render_bar(fraction: f64, cells: usize) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (fraction * cells as f64).round() as usize;
    let empty = cells.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "·".repeat(empty))
}

/// Render a slider track with a knob at `value` within `[min, max]`.
pub fn render_slider(value: f64, min: f64, max: f64, cells: usize) -> String {
    if cells == 0 {
        return String::new();
    }
    let span = max - min;
    let fraction = if span > 0.0 {
        ((value - min) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let knob = (fraction * (cells - 1) as f64).round() as usize;

    (0..cells)
        .map(|i| match i.cmp(&knob) {
            std::cmp::Ordering::Less => '━',
            std::cmp::Ordering::Equal => '●',
            std::cmp::Ordering::Greater => '─',
        })
        .collect()
}
