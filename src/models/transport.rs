// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback transport state.
//!
//! Tracks the play/pause flag, playback rate and the current frame. The
//! editing core never reads this directly; the app uses it to gate draw
//! mode and to pick which frame to show.

/// Slowest and fastest supported playback rates.
pub const MIN_RATE: f64 = 0.25;
pub const MAX_RATE: f64 = 4.0;

/// Interaction mode of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Pointer input is ignored by the annotation editor.
    View,
    /// Pointer input draws and edits lines.
    Draw,
}

#[derive(Debug, Clone)]
pub struct Transport {
    frame_count: usize,
    fps: f64,
    current_frame: usize,
    playing: bool,
    rate: f64,
    /// Fractional frames accumulated by `advance`.
    carry: f64,
}

impl Transport {
    pub fn new(frame_count: usize, fps: f64) -> Self {
        Self {
            frame_count: frame_count.max(1),
            fps: if fps > 0.0 { fps } else { 30.0 },
            current_frame: 0,
            playing: false,
            rate: 1.0,
            carry: 0.0,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Current position in seconds.
    pub fn current_time(&self) -> f64 {
        self.current_frame as f64 / self.fps
    }

    pub fn toggle_play(&mut self) {
        // A single frame has nothing to play.
        self.playing = !self.playing && self.frame_count > 1;
        self.carry = 0.0;
    }

    pub fn pause(&mut self) {
        self.playing = false;
        self.carry = 0.0;
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate.clamp(MIN_RATE, MAX_RATE);
    }

    /// Jump to `frame`, clamped to the last frame. Pauses playback.
    pub fn seek(&mut self, frame: usize) {
        self.pause();
        self.current_frame = frame.min(self.frame_count - 1);
    }

    pub fn step_forward(&mut self) {
        self.seek(self.current_frame.saturating_add(1));
    }

    pub fn step_back(&mut self) {
        self.seek(self.current_frame.saturating_sub(1));
    }

    /// Advance playback by `dt` seconds. Returns true if the frame changed.
    /// Playback stops on the last frame.
    pub fn advance(&mut self, dt: f64) -> bool {
        if !self.playing {
            return false;
        }
        self.carry += dt * self.fps * self.rate;
        let whole = self.carry.floor();
        if whole < 1.0 {
            return false;
        }
        self.carry -= whole;

        let last = self.frame_count - 1;
        let next = (self.current_frame + whole as usize).min(last);
        let changed = next != self.current_frame;
        self.current_frame = next;
        if next == last {
            self.pause();
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_and_seek_clamp() {
        let mut t = Transport::new(10, 25.0);
        t.step_back();
        assert_eq!(t.current_frame(), 0);
        t.seek(100);
        assert_eq!(t.current_frame(), 9);
        t.step_forward();
        assert_eq!(t.current_frame(), 9);
        t.step_back();
        assert_eq!(t.current_frame(), 8);
    }

    #[test]
    fn test_rate_is_clamped() {
        let mut t = Transport::new(10, 25.0);
        t.set_rate(10.0);
        assert_eq!(t.rate(), MAX_RATE);
        t.set_rate(0.0);
        assert_eq!(t.rate(), MIN_RATE);
    }

    #[test]
    fn test_advance_accumulates_fractional_frames() {
        let mut t = Transport::new(100, 10.0);
        t.toggle_play();
        assert!(!t.advance(0.06));
        assert!(t.advance(0.06));
        assert_eq!(t.current_frame(), 1);
    }

    #[test]
    fn test_advance_stops_at_last_frame() {
        let mut t = Transport::new(3, 10.0);
        t.toggle_play();
        t.advance(10.0);
        assert_eq!(t.current_frame(), 2);
        assert!(!t.is_playing());
    }

    #[test]
    fn test_single_frame_never_plays() {
        let mut t = Transport::new(1, 30.0);
        t.toggle_play();
        assert!(!t.is_playing());
    }

    #[test]
    fn test_seek_pauses() {
        let mut t = Transport::new(10, 10.0);
        t.toggle_play();
        t.seek(3);
        assert!(!t.is_playing());
        assert!((t.current_time() - 0.3).abs() < 1e-9);
    }
}
