//! Static configuration of the solar system and its camera.
//!
//! [`SystemConfig::default`] is the hand-tuned table the viewer ships with.
//! With the `serde` feature every type here can also be loaded from a file.

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::body::{Pulse, Ring, SpinMode};
use crate::error::ConfigError;
use crate::rotation::SystemRotation;
use crate::{Num, Vec3};

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BodyConfig {
    pub id: String,
    pub radius: Num,
    pub orbit_distance: Num,
    /// Radians of pivot rotation per second of simulation time.
    pub orbit_rate: Num,
    /// Radians of self-rotation per frame, or per second with
    /// [`SpinMode::Elapsed`].
    pub spin_rate: Num,
    pub spin: SpinMode,
    pub pulse: Option<Pulse>,
    pub ring: Option<Ring>,
    pub color: [f32; 3],
    pub texture: Option<String>,
    pub emissive: bool,
    pub satellites: Vec<BodyConfig>,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self::new("", 1.0)
    }
}

impl BodyConfig {
    /// A motionless body sitting on its parent's origin.
    pub fn new(id: impl Into<String>, radius: Num) -> Self {
        Self {
            id: id.into(),
            radius,
            orbit_distance: 0.0,
            orbit_rate: 0.0,
            spin_rate: 0.0,
            spin: SpinMode::PerFrame,
            pulse: None,
            ring: None,
            color: WHITE,
            texture: None,
            emissive: false,
            satellites: Vec::new(),
        }
    }

    fn planet(
        id: &str,
        radius: Num,
        orbit_distance: Num,
        orbit_rate: Num,
        spin_rate: Num,
        color: [f32; 3],
    ) -> Self {
        Self {
            orbit_distance,
            orbit_rate,
            spin_rate,
            color,
            ..Self::new(id, radius)
        }
    }

    fn validate(&self, seen: &mut HashSet<String>) -> Result<(), ConfigError> {
        if self.id.is_empty() {
            return Err(ConfigError::EmptyId);
        }

        if !seen.insert(self.id.clone()) {
            return Err(ConfigError::DuplicateId(self.id.clone()));
        }

        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::InvalidRadius {
                id: self.id.clone(),
                radius: self.radius,
            });
        }

        if !(self.orbit_distance.is_finite() && self.orbit_distance >= 0.0) {
            return Err(ConfigError::InvalidOrbitDistance {
                id: self.id.clone(),
                distance: self.orbit_distance,
            });
        }

        let pulse_finite = self
            .pulse
            .map_or(true, |p| p.amplitude.is_finite() && p.frequency.is_finite());
        if !(self.orbit_rate.is_finite() && self.spin_rate.is_finite() && pulse_finite) {
            return Err(ConfigError::NonFiniteRate {
                id: self.id.clone(),
            });
        }

        if let Some(ring) = &self.ring {
            if !(ring.inner_radius >= 0.0 && ring.inner_radius < ring.outer_radius) {
                return Err(ConfigError::InvalidRing {
                    id: self.id.clone(),
                    inner: ring.inner_radius,
                    outer: ring.outer_radius,
                });
            }
        }

        for satellite in &self.satellites {
            satellite.validate(seen)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CameraConfig {
    /// Where the camera starts and returns to.
    pub default_position: Vec3,
    pub default_target: Vec3,
    pub fov_degrees: Num,

    /// Free-mode zoom limits, measured from the orbit target.
    pub min_distance: Num,
    pub max_distance: Num,

    /// Camera offset from a followed body, in world axes.
    pub follow_offset: Vec3,
    pub follow_smoothing: Num,

    pub return_smoothing: Num,
    /// Distance from the default position at which the return counts as
    /// done.
    pub return_epsilon: Num,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_position: Vec3::new(0.0, 40.0, 80.0),
            default_target: Vec3::ZERO,
            fov_degrees: 60.0,
            min_distance: 20.0,
            max_distance: 300.0,
            follow_offset: Vec3::new(10.0, 5.0, 10.0),
            follow_smoothing: 0.05,
            return_smoothing: 0.05,
            return_epsilon: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TourConfig {
    /// Bodies visited in order, wrapping around at the end.
    pub order: Vec<String>,
    /// Leg progress gained per frame.
    pub speed: Num,
    /// Camera offset from the interpolated leg position.
    pub offset: Vec3,
    pub move_smoothing: Num,
    pub look_smoothing: Num,
    /// Frames spent at each arrival before the next leg starts.
    pub pause_frames: u32,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            order: [
                "mercury", "venus", "earth", "mars", "jupiter", "saturn", "uranus", "neptune",
                "pluto",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            speed: 0.002,
            offset: Vec3::new(0.0, 2.0, 6.0),
            move_smoothing: 0.04,
            look_smoothing: 0.05,
            pause_frames: 100,
        }
    }
}

/// Background sphere enclosing the whole system, seen from inside.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StarfieldConfig {
    pub radius: Num,
    pub color: [f32; 3],
    pub texture: Option<String>,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            radius: 400.0,
            color: [0.02, 0.02, 0.05],
            texture: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SystemConfig {
    pub sun: BodyConfig,
    pub bodies: Vec<BodyConfig>,
    pub starfield: StarfieldConfig,
    pub show_orbits: bool,
    pub rotation: SystemRotation,
    pub camera: CameraConfig,
    pub tour: TourConfig,
}

impl Default for SystemConfig {
    fn default() -> Self {
        let sun = BodyConfig {
            spin_rate: 0.001,
            pulse: Some(Pulse {
                amplitude: 0.05,
                frequency: 2.0,
            }),
            color: [1.0, 0.8, 0.3],
            emissive: true,
            ..BodyConfig::new("sun", 4.0)
        };

        let moon = BodyConfig::planet("moon", 0.4, 2.0, 1.2, 0.0, [0.7, 0.7, 0.7]);

        let earth = BodyConfig {
            spin: SpinMode::Elapsed,
            satellites: vec![moon],
            ..BodyConfig::planet("earth", 1.2, 16.0, 0.2, 1.5, [0.2, 0.4, 0.9])
        };

        let saturn = BodyConfig {
            ring: Some(Ring {
                inner_radius: 3.2,
                outer_radius: 5.0,
            }),
            ..BodyConfig::planet("saturn", 2.5, 38.0, 0.08, 0.018, [0.9, 0.8, 0.55])
        };

        let bodies = vec![
            BodyConfig::planet("mercury", 0.5, 8.0, 0.6, 0.01, [0.6, 0.58, 0.55]),
            BodyConfig::planet("venus", 1.0, 12.0, 0.5, 0.008, [0.9, 0.75, 0.45]),
            earth,
            BodyConfig::planet("mars", 0.8, 20.0, 0.18, 0.015, [0.8, 0.35, 0.2]),
            BodyConfig::planet("jupiter", 3.0, 28.0, 0.1, 0.02, [0.85, 0.7, 0.55]),
            saturn,
            BodyConfig::planet("uranus", 2.0, 48.0, 0.05, 0.012, [0.6, 0.85, 0.9]),
            BodyConfig::planet("neptune", 2.0, 58.0, 0.03, 0.01, [0.3, 0.45, 0.95]),
            BodyConfig::planet("pluto", 0.4, 68.0, 0.02, 0.008, [0.75, 0.68, 0.6]),
        ];

        Self {
            sun,
            bodies,
            starfield: StarfieldConfig::default(),
            show_orbits: true,
            rotation: SystemRotation::default(),
            camera: CameraConfig::default(),
            tour: TourConfig::default(),
        }
    }
}

impl SystemConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();

        self.sun.validate(&mut seen)?;
        for body in &self.bodies {
            body.validate(&mut seen)?;
        }

        if let Some(unknown) = self.tour.order.iter().find(|id| !seen.contains(*id)) {
            return Err(ConfigError::UnknownTourStop(unknown.clone()));
        }

        let camera = &self.camera;
        factor("camera.follow_smoothing", camera.follow_smoothing)?;
        factor("camera.return_smoothing", camera.return_smoothing)?;
        factor("tour.move_smoothing", self.tour.move_smoothing)?;
        factor("tour.look_smoothing", self.tour.look_smoothing)?;
        factor("tour.speed", self.tour.speed)?;

        positive("camera.return_epsilon", camera.return_epsilon)?;
        positive("camera.fov_degrees", camera.fov_degrees)?;
        positive("camera.min_distance", camera.min_distance)?;
        positive("starfield.radius", self.starfield.radius)?;

        if camera.min_distance > camera.max_distance {
            return Err(ConfigError::InvalidZoomLimits {
                min: camera.min_distance,
                max: camera.max_distance,
            });
        }

        debug!(bodies = seen.len(), "configuration validated");

        Ok(())
    }
}

fn factor(name: &'static str, value: Num) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidFactor { name, value })
    }
}

fn positive(name: &'static str, value: Num) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}
