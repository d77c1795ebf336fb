//! # Year Playback
//!
//! Play/pause state machine behind the density map's year animation.
//!
//! Starting playback captures a pool of years from the current slider
//! selection. Each tick while playing moves the selection to the next year
//! of the pool as a single-year range `[y, y]`, wrapping after the last
//! year. Pausing leaves the pool and selection untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::PeriodRange;

/// Default spacing between animation ticks
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1200;

/// Total duration an autoplaying animation is spread across
pub const ANIMATION_TOTAL_MS: u64 = 5000;

/// Playback state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Ticks are ignored
    #[default]
    Paused,
    /// Ticks advance the selection
    Playing,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Paused => write!(f, "paused"),
            PlaybackState::Playing => write!(f, "playing"),
        }
    }
}

/// Year animation over a fixed set of available years
#[derive(Debug, Clone)]
pub struct Playback {
    available: Vec<i32>,
    selection: PeriodRange,
    state: PlaybackState,
    pool: Option<Vec<i32>>,
}

/// Available years inside the selection, or all of them when none fall inside
fn pool_for(available: &[i32], selection: PeriodRange) -> Vec<i32> {
    let selected: Vec<i32> = available
        .iter()
        .copied()
        .filter(|y| selection.contains(*y))
        .collect();
    if selected.is_empty() {
        available.to_vec()
    } else {
        selected
    }
}

impl Playback {
    /// Create a paused playback. `available` need not be sorted or unique.
    pub fn new(mut available: Vec<i32>, selection: PeriodRange) -> Self {
        available.sort_unstable();
        available.dedup();
        Self {
            available,
            selection,
            state: PlaybackState::Paused,
            pool: None,
        }
    }

    /// Current state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether ticks currently advance the selection
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Current slider selection
    pub fn selection(&self) -> PeriodRange {
        self.selection
    }

    /// Years captured when playback last started
    pub fn pool(&self) -> Option<&[i32]> {
        self.pool.as_deref()
    }

    /// Move the slider by hand
    pub fn set_selection(&mut self, selection: PeriodRange) {
        self.selection = selection;
    }

    /// Button label for the current state
    pub fn label(&self) -> &'static str {
        match self.state {
            PlaybackState::Paused => "▶ Play",
            PlaybackState::Playing => "⏸ Pause",
        }
    }

    /// Flip between paused and playing. Starting captures a fresh pool.
    pub fn toggle(&mut self) -> PlaybackState {
        self.state = match self.state {
            PlaybackState::Paused => {
                self.pool = Some(pool_for(&self.available, self.selection));
                PlaybackState::Playing
            }
            PlaybackState::Playing => PlaybackState::Paused,
        };
        self.state
    }

    /// Advance to the next year of the pool while playing.
    ///
    /// Returns the new year, or `None` when paused or when there are no
    /// years to cycle through.
    pub fn tick(&mut self) -> Option<i32> {
        if self.state != PlaybackState::Playing {
            return None;
        }

        let pool = self
            .pool
            .get_or_insert_with(|| pool_for(&self.available, self.selection));
        if pool.is_empty() {
            return None;
        }

        // A selection outside the pool steps from the pool's first year
        let current = pool
            .iter()
            .position(|y| *y == self.selection.start)
            .unwrap_or(0);
        let next = pool[(current + 1) % pool.len()];

        self.selection = PeriodRange::single(next);
        Some(next)
    }
}

/// Per-frame duration that spreads an animation over `total_ms`
pub fn frame_duration_ms(frames: usize, total_ms: u64) -> u64 {
    match frames {
        0 => total_ms,
        n => total_ms / n as u64,
    }
}
