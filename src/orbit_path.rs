use std::collections::HashMap;

use crate::{vec3, Num, Vec3, ORBIT_SEGMENTS, TWO_PI};

/// Closed polyline approximating a circle of `radius` in the XZ plane.
///
/// Returns `ORBIT_SEGMENTS + 1` points; the last one repeats the first so a
/// line strip through them closes the loop.
pub fn orbit_path(radius: Num) -> Vec<Vec3> {
    (0..=ORBIT_SEGMENTS)
        .map(|i| {
            let theta = (i as Num / ORBIT_SEGMENTS as Num) * TWO_PI;

            vec3(radius * theta.cos(), 0.0, radius * theta.sin())
        })
        .collect()
}

/// Orbit paths keyed by radius, each computed once.
#[derive(Debug, Clone, Default)]
pub struct OrbitPathCache {
    paths: HashMap<u64, Vec<Vec3>>,
}

impl OrbitPathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_insert(&mut self, radius: Num) -> &[Vec3] {
        self.paths
            .entry(Self::key(radius))
            .or_insert_with(|| orbit_path(radius))
    }

    pub fn get(&self, radius: Num) -> Option<&[Vec3]> {
        self.paths.get(&Self::key(radius)).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    #[allow(clippy::unnecessary_cast)]
    fn key(radius: Num) -> u64 {
        radius.to_bits() as u64
    }
}
