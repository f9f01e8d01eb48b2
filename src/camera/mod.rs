//! Camera behavior state machine.
//!
//! The controller owns exactly one [`CameraMode`] at a time and, once per
//! frame, moves a [`CameraRig`] according to it. Body positions are read
//! through a [`BodyLocator`]; the controller never writes to the scene.

use std::fmt;

use tracing::{info, warn};

use crate::config::{CameraConfig, TourConfig};
use crate::math::lerp_toward;
use crate::Vec3;

mod tour;

pub use self::tour::{Tour, TourState};

/// Read-only access to the world position of a body by id.
pub trait BodyLocator {
    fn locate(&self, id: &str) -> Option<Vec3>;
}

impl<F> BodyLocator for F
where
    F: Fn(&str) -> Option<Vec3>,
{
    fn locate(&self, id: &str) -> Option<Vec3> {
        self(id)
    }
}

/// Camera pose written by the controller and copied to the renderer's
/// camera.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraRig {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CameraMode {
    /// The user's orbit controls own the camera.
    Free,
    Follow { target: String },
    Tour(Tour),
    ReturningToDefault,
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraMode::Free => write!(f, "Free"),
            CameraMode::Follow { target } => write!(f, "Following {target}"),
            CameraMode::Tour(tour) => {
                let (from, to) = tour.leg();
                write!(f, "Touring {from} -> {to}")
            }
            CameraMode::ReturningToDefault => write!(f, "Returning"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CameraController {
    mode: CameraMode,
    camera: CameraConfig,
    tour: TourConfig,
}

impl CameraController {
    pub fn new(camera: CameraConfig, tour: TourConfig) -> Self {
        Self {
            mode: CameraMode::Free,
            camera,
            tour,
        }
    }

    pub fn mode(&self) -> &CameraMode {
        &self.mode
    }

    pub fn camera_config(&self) -> &CameraConfig {
        &self.camera
    }

    pub fn tour_config(&self) -> &TourConfig {
        &self.tour
    }

    pub fn is_free(&self) -> bool {
        matches!(self.mode, CameraMode::Free)
    }

    pub fn follow_target(&self) -> Option<&str> {
        match &self.mode {
            CameraMode::Follow { target } => Some(target),
            _ => None,
        }
    }

    pub fn tour(&self) -> Option<&Tour> {
        match &self.mode {
            CameraMode::Tour(tour) => Some(tour),
            _ => None,
        }
    }

    pub fn default_rig(&self) -> CameraRig {
        CameraRig::new(self.camera.default_position, self.camera.default_target)
    }

    /// Starts following `id`, leaving whatever mode was active.
    pub fn follow(&mut self, id: impl Into<String>) {
        let target = id.into();
        info!(%target, "camera following body");

        self.mode = CameraMode::Follow { target };
    }

    /// Starts a tour over the configured order. See [`Self::start_tour_with`].
    pub fn start_tour<L>(&mut self, locator: &L, look_at: Vec3) -> bool
    where
        L: BodyLocator + ?Sized,
    {
        let order = self.tour.order.clone();
        self.start_tour_with(&order, locator, look_at)
    }

    /// Starts a tour over the bodies of `order` that currently resolve.
    ///
    /// With fewer than two of them the request is ignored, the current mode
    /// stays active and `false` is returned.
    pub fn start_tour_with<L>(&mut self, order: &[String], locator: &L, look_at: Vec3) -> bool
    where
        L: BodyLocator + ?Sized,
    {
        let Some(tour) = Tour::new(order, locator, look_at) else {
            warn!(requested = order.len(), "not enough bodies to tour");
            return false;
        };

        info!(stops = tour.stops().len(), "camera tour started");
        self.mode = CameraMode::Tour(tour);

        true
    }

    /// Stops a running tour, or starts one. Returns whether a tour is
    /// running afterwards.
    pub fn toggle_tour<L>(&mut self, locator: &L, look_at: Vec3) -> bool
    where
        L: BodyLocator + ?Sized,
    {
        if self.tour().is_some() {
            self.stop();
            false
        } else {
            self.start_tour(locator, look_at)
        }
    }

    /// Ends following or touring and glides back to the default view.
    pub fn stop(&mut self) {
        match self.mode {
            CameraMode::Follow { .. } | CameraMode::Tour(_) => {
                info!("camera returning to default view");
                self.mode = CameraMode::ReturningToDefault;
            }
            CameraMode::Free | CameraMode::ReturningToDefault => {}
        }
    }

    /// Hands the camera back to the user where it is.
    pub fn release(&mut self) {
        if !self.is_free() {
            info!("camera released");
            self.mode = CameraMode::Free;
        }
    }

    /// Moves `rig` for one frame of the current mode.
    pub fn update<L>(&mut self, rig: &mut CameraRig, locator: &L)
    where
        L: BodyLocator + ?Sized,
    {
        let settled = match &mut self.mode {
            CameraMode::Free => false,
            CameraMode::Follow { target } => {
                if let Some(position) = locator.locate(target) {
                    rig.position = lerp_toward(
                        rig.position,
                        position + self.camera.follow_offset,
                        self.camera.follow_smoothing,
                    );
                    rig.look_at = position;
                }

                false
            }
            CameraMode::Tour(tour) => {
                tour.step(rig, locator, &self.tour);
                false
            }
            CameraMode::ReturningToDefault => {
                let camera = &self.camera;
                rig.position = lerp_toward(
                    rig.position,
                    camera.default_position,
                    camera.return_smoothing,
                );
                rig.look_at =
                    lerp_toward(rig.look_at, camera.default_target, camera.return_smoothing);

                rig.position.distance(camera.default_position) < camera.return_epsilon
            }
        };

        if settled {
            info!("camera back at default view");
            self.mode = CameraMode::Free;
        }
    }
}
