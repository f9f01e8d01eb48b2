use tracing::debug;

use super::{BodyLocator, CameraRig};
use crate::config::TourConfig;
use crate::math::lerp_toward;
use crate::{Num, Vec3};

/// Progress through the current leg of a tour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TourState {
    /// Index of the body the current leg departs from.
    pub current_index: usize,
    /// Fraction of the leg covered, `0..=1`.
    pub progress: Num,
    /// Frames already spent waiting at the leg's destination.
    pub dwell_counter: u32,
    pub is_moving: bool,
}

impl Default for TourState {
    fn default() -> Self {
        Self {
            current_index: 0,
            progress: 0.0,
            dwell_counter: 0,
            is_moving: true,
        }
    }
}

/// Cinematic flight that cycles the camera through a list of bodies,
/// pausing at each one.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    stops: Vec<String>,
    state: TourState,
    smoothed_look_at: Vec3,
}

impl Tour {
    /// Prepares a tour over the bodies of `order` that currently resolve.
    ///
    /// Returns `None` when fewer than two of them do.
    pub fn new<L>(order: &[String], locator: &L, look_at: Vec3) -> Option<Self>
    where
        L: BodyLocator + ?Sized,
    {
        let stops = order
            .iter()
            .filter(|id| locator.locate(id).is_some())
            .cloned()
            .collect::<Vec<_>>();

        if stops.len() < 2 {
            return None;
        }

        Some(Self {
            stops,
            state: TourState::default(),
            smoothed_look_at: look_at,
        })
    }

    pub fn stops(&self) -> &[String] {
        &self.stops
    }

    pub fn state(&self) -> &TourState {
        &self.state
    }

    pub fn smoothed_look_at(&self) -> Vec3 {
        self.smoothed_look_at
    }

    /// Bodies the current leg flies between.
    pub fn leg(&self) -> (&str, &str) {
        let from = self.state.current_index;
        let to = (from + 1) % self.stops.len();

        (&self.stops[from], &self.stops[to])
    }

    /// Runs one frame of the tour. Frames where either end of the leg
    /// cannot be located are skipped entirely.
    pub fn step<L>(&mut self, rig: &mut CameraRig, locator: &L, config: &TourConfig)
    where
        L: BodyLocator + ?Sized,
    {
        let (from, to) = self.leg();
        let (Some(from_position), Some(to_position)) = (locator.locate(from), locator.locate(to))
        else {
            return;
        };

        let state = &mut self.state;

        if state.is_moving {
            state.progress = (state.progress + config.speed).min(1.0);

            // Absorb accumulated rounding so a leg takes exactly 1 / speed
            // frames.
            if 1.0 - state.progress <= config.speed * 0.5 {
                state.progress = 1.0;
            }
        }

        let interpolated = from_position.lerp(to_position, state.progress);
        rig.position = lerp_toward(
            rig.position,
            interpolated + config.offset,
            config.move_smoothing,
        );

        self.smoothed_look_at =
            lerp_toward(self.smoothed_look_at, to_position, config.look_smoothing);
        rig.look_at = self.smoothed_look_at;

        if state.progress < 1.0 {
            return;
        }

        if state.dwell_counter < config.pause_frames {
            state.is_moving = false;
            state.dwell_counter += 1;
        } else {
            state.dwell_counter = 0;
            state.is_moving = true;
            state.progress = 0.0;
            state.current_index = (state.current_index + 1) % self.stops.len();

            debug!(
                from = %self.stops[state.current_index],
                to = %self.stops[(state.current_index + 1) % self.stops.len()],
                "tour leg started"
            );
        }
    }
}
