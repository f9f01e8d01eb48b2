use bevy::prelude::*;

use crate::Orrery;

const RING_BANDS: usize = 6;
const RING_SEGMENTS: usize = 64;

pub fn orbits(mut lines: Gizmos, orrery: Res<Orrery>) {
    for (_id, path) in orrery.0.orbit_paths() {
        lines.linestrip(path, Color::rgba(1.0, 1.0, 1.0, 0.3));
    }
}

/// Rings are drawn as concentric circles spread between the inner and
/// outer radius, in the plane of the body's equator.
pub fn rings(mut lines: Gizmos, orrery: Res<Orrery>) {
    for body in orrery.0.bodies() {
        let Some(ring) = body.ring else {
            continue;
        };

        let Some(frame) = orrery.0.world_transform(body.nodes.mesh) else {
            continue;
        };

        let [r, g, b] = body.color;
        let color = Color::rgba(r, g, b, 0.6);

        for radius in band_radii(ring.inner_radius, ring.outer_radius, RING_BANDS) {
            lines
                .circle(frame.translation, Vec3::Y, radius * frame.scale, color)
                .segments(RING_SEGMENTS);
        }
    }
}

fn band_radii(inner: f32, outer: f32, bands: usize) -> impl Iterator<Item = f32> {
    let step = if bands > 1 {
        (outer - inner) / (bands - 1) as f32
    } else {
        0.0
    };

    (0..bands).map(move |i| inner + step * i as f32)
}
