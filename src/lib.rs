//! Kinematic solar-system animation.
//!
//! Bodies revolve on pivot nodes and spin on their own axis according to
//! hand-tuned angular rates. A camera director follows a single body, runs a
//! cinematic tour across several of them, or glides back to a default view.
//! Nothing here touches a renderer: callers advance the [`SolarSystem`] with
//! the elapsed time, run the [`CameraController`] over a [`CameraRig`] and
//! copy the resulting transforms into whatever draws the frame.

pub mod body;
pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod math;
pub mod orbit_path;
pub mod rotation;
pub mod scene;
pub mod system;

pub use self::body::{Body, BodyNodes, Pulse, Ring, SpinMode};
pub use self::camera::{BodyLocator, CameraController, CameraMode, CameraRig, Tour, TourState};
pub use self::config::{BodyConfig, CameraConfig, StarfieldConfig, SystemConfig, TourConfig};
pub use self::constants::*;
pub use self::error::{ConfigError, OrreryError, OrreryResult};
pub use self::orbit_path::{orbit_path, OrbitPathCache};
pub use self::rotation::SystemRotation;
pub use self::scene::{NodeId, Scene, WorldTransform};
pub use self::system::{SolarSystem, Starfield};

#[cfg(all(feature = "f32", feature = "f64"))]
compile_error!("features `f32` and `f64` are mutually exclusive, build with `--no-default-features --features f64`");

#[cfg(not(any(feature = "f32", feature = "f64")))]
compile_error!("enable one of the `f32` or `f64` features");

#[cfg(feature = "f32")]
pub type Num = f32;
#[cfg(feature = "f32")]
pub use glam::{vec3, Mat3, Vec3};

#[cfg(feature = "f64")]
pub type Num = f64;
#[cfg(feature = "f64")]
pub use glam::{dvec3 as vec3, DMat3 as Mat3, DVec3 as Vec3};
