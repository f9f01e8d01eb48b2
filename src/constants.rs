use crate::Num;

#[cfg(feature = "f32")]
pub use std::f32::consts::PI;
#[cfg(feature = "f64")]
pub use std::f64::consts::PI;

pub const TWO_PI: Num = 2.0 * PI;

/// Line segments used to approximate a circular orbit.
pub const ORBIT_SEGMENTS: usize = 128;

/// Default per-frame increment of the whole-system auto-rotation.
pub const SYSTEM_ROTATION_STEP: Num = 0.0005;
