#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::BodyConfig;
use crate::error::OrreryResult;
use crate::scene::{NodeId, Scene};
use crate::{vec3, Num, Vec3};

/// How a body's self-rotation advances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SpinMode {
    /// Adds the spin rate once per frame. Visible speed follows the frame
    /// rate.
    #[default]
    PerFrame,
    /// Derives the angle from elapsed time, like the orbit angle.
    Elapsed,
}

/// Periodic breathing of a body's size.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pulse {
    pub amplitude: Num,
    pub frequency: Num,
}

impl Pulse {
    pub fn scale_at(&self, elapsed: Num) -> Num {
        1.0 + self.amplitude * (self.frequency * elapsed).sin()
    }
}

/// Flat ring around a body, radii measured from the body's center.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ring {
    pub inner_radius: Num,
    pub outer_radius: Num,
}

/// Next spin angle of a body.
///
/// Every spin update goes through here, so switching a body between
/// frame-coupled and time-derived rotation never touches call sites.
#[inline]
pub fn advance_spin(angle: Num, rate: Num, mode: SpinMode, elapsed: Num) -> Num {
    match mode {
        SpinMode::PerFrame => angle + rate,
        SpinMode::Elapsed => elapsed * rate,
    }
}

/// Scene nodes owned by a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyNodes {
    /// Invisible node rotated to revolve the body around its parent.
    pub pivot: NodeId,
    /// Fixed offset along the pivot's X axis. Satellites hang off this node.
    pub anchor: NodeId,
    /// The drawable sphere: spins and pulses without dragging satellites.
    pub mesh: NodeId,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: String,
    pub radius: Num,
    pub orbit_distance: Num,
    pub orbit_rate: Num,
    pub spin_rate: Num,
    pub spin: SpinMode,
    pub pulse: Option<Pulse>,
    pub ring: Option<Ring>,
    pub color: [f32; 3],
    pub texture: Option<String>,
    pub emissive: bool,
    pub nodes: BodyNodes,
    pub satellites: Vec<Body>,
}

impl Body {
    /// Builds the pivot/anchor/mesh chain for `config` under `parent`,
    /// then the satellites under the new anchor.
    pub fn spawn(scene: &mut Scene, parent: NodeId, config: &BodyConfig) -> OrreryResult<Self> {
        let pivot = scene.add(Some(parent), Vec3::ZERO)?;
        let anchor = scene.add(Some(pivot), vec3(config.orbit_distance, 0.0, 0.0))?;
        let mesh = scene.add(Some(anchor), Vec3::ZERO)?;

        let satellites = config
            .satellites
            .iter()
            .map(|satellite| Body::spawn(scene, anchor, satellite))
            .collect::<OrreryResult<Vec<_>>>()?;

        Ok(Self {
            id: config.id.clone(),
            radius: config.radius,
            orbit_distance: config.orbit_distance,
            orbit_rate: config.orbit_rate,
            spin_rate: config.spin_rate,
            spin: config.spin,
            pulse: config.pulse,
            ring: config.ring,
            color: config.color,
            texture: config.texture.clone(),
            emissive: config.emissive,
            nodes: BodyNodes {
                pivot,
                anchor,
                mesh,
            },
            satellites,
        })
    }

    /// Orbit angle at `elapsed`. Assigned, never accumulated, so it can be
    /// recomputed for any instant.
    #[inline]
    pub fn orbit_angle(&self, elapsed: Num) -> Num {
        elapsed * self.orbit_rate
    }

    pub fn has_orbit_path(&self) -> bool {
        self.orbit_distance > 0.0
    }

    /// Advances this body and its satellites for one frame.
    pub fn advance(&self, scene: &mut Scene, elapsed: Num) {
        if let Some(pivot) = scene.get_mut(self.nodes.pivot) {
            pivot.rotation_y = self.orbit_angle(elapsed);
        }

        if let Some(mesh) = scene.get_mut(self.nodes.mesh) {
            mesh.rotation_y = advance_spin(mesh.rotation_y, self.spin_rate, self.spin, elapsed);

            if let Some(pulse) = &self.pulse {
                mesh.scale = pulse.scale_at(elapsed);
            }

            trace!(body = %self.id, spin = mesh.rotation_y, "advanced");
        }

        for satellite in &self.satellites {
            satellite.advance(scene, elapsed);
        }
    }

    /// This body or one of its satellites, searched depth first.
    pub fn find(&self, id: &str) -> Option<&Body> {
        if self.id == id {
            return Some(self);
        }

        self.satellites.iter().find_map(|satellite| satellite.find(id))
    }

    /// Appends this body followed by its satellites, depth first.
    pub fn flatten<'a>(&'a self, out: &mut Vec<&'a Body>) {
        out.push(self);

        for satellite in &self.satellites {
            satellite.flatten(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{PI, TWO_PI};

    const EPSILON: Num = 1e-4;

    fn planet(orbit_rate: Num, spin_rate: Num) -> BodyConfig {
        BodyConfig {
            orbit_distance: 10.0,
            orbit_rate,
            spin_rate,
            ..BodyConfig::new("test", 1.0)
        }
    }

    fn spawn(config: &BodyConfig) -> (Scene, Body) {
        let mut scene = Scene::new();
        let root = scene.add(None, Vec3::ZERO).unwrap();
        let body = Body::spawn(&mut scene, root, config).unwrap();

        (scene, body)
    }

    fn angle_diff(a: Num, b: Num) -> Num {
        let d = (a - b).rem_euclid(TWO_PI);
        d.min(TWO_PI - d)
    }

    #[test_case(0.6, 3.7 ; "mercury-like")]
    #[test_case(0.02, 120.0 ; "slow outer body")]
    #[test_case(-0.3, 10.0 ; "retrograde")]
    fn orbit_angle_does_not_depend_on_history(rate: Num, t: Num) {
        let config = planet(rate, 0.0);

        let (mut stepped_scene, stepped) = spawn(&config);
        let frames = 240;
        for frame in 0..=frames {
            stepped.advance(&mut stepped_scene, t * frame as Num / frames as Num);
        }

        let (mut direct_scene, direct) = spawn(&config);
        direct.advance(&mut direct_scene, t);

        let stepped_angle = stepped_scene.get(stepped.nodes.pivot).unwrap().rotation_y;
        let direct_angle = direct_scene.get(direct.nodes.pivot).unwrap().rotation_y;

        assert!(angle_diff(stepped_angle, rate * t) < EPSILON);
        assert!(angle_diff(stepped_angle, direct_angle) < EPSILON);
    }

    #[test]
    fn per_frame_spin_ignores_time_gaps() {
        let spin_rate = 0.015;
        let (mut scene, body) = spawn(&planet(0.18, spin_rate));

        let mut previous = scene.get(body.nodes.mesh).unwrap().rotation_y;
        for t in [0.0, 0.016, 0.5, 0.51, 7.0, 7.0, 100.0] {
            body.advance(&mut scene, t);

            let spin = scene.get(body.nodes.mesh).unwrap().rotation_y;
            assert!(spin >= previous);
            assert_eq!(spin, previous + spin_rate);
            previous = spin;
        }
    }

    #[test]
    fn elapsed_spin_follows_time() {
        let config = BodyConfig {
            spin: SpinMode::Elapsed,
            ..planet(0.2, 1.5)
        };
        let (mut scene, body) = spawn(&config);

        body.advance(&mut scene, 2.0);
        body.advance(&mut scene, 2.0);

        assert_eq!(scene.get(body.nodes.mesh).unwrap().rotation_y, 3.0);
    }

    #[test]
    fn zero_rates_keep_body_still() {
        let (mut scene, body) = spawn(&planet(0.0, 0.0));
        let before = scene.world_position(body.nodes.mesh).unwrap();

        for frame in 0..100 {
            body.advance(&mut scene, frame as Num * 0.1);
        }

        assert_eq!(scene.world_position(body.nodes.mesh).unwrap(), before);
        assert_eq!(scene.get(body.nodes.mesh).unwrap().rotation_y, 0.0);
    }

    #[test]
    fn satellite_orbits_parent_center() {
        let mut config = planet(0.2, 0.0);
        config.orbit_distance = 16.0;
        config.satellites.push(BodyConfig {
            orbit_distance: 2.0,
            orbit_rate: 1.2,
            ..BodyConfig::new("moon", 0.4)
        });

        let (mut scene, earth) = spawn(&config);
        let moon = &earth.satellites[0];

        for t in [0.0, 1.0, PI, 42.0] {
            earth.advance(&mut scene, t);

            let earth_position = scene.world_position(earth.nodes.mesh).unwrap();
            let moon_position = scene.world_position(moon.nodes.mesh).unwrap();

            assert!((earth_position.length() - 16.0).abs() < EPSILON);
            assert!((moon_position.distance(earth_position) - 2.0).abs() < EPSILON);
        }
    }

    #[test]
    fn spin_does_not_drag_satellites() {
        let mut config = planet(0.0, 0.5);
        config.satellites.push(BodyConfig {
            orbit_distance: 2.0,
            ..BodyConfig::new("moon", 0.4)
        });

        let (mut scene, body) = spawn(&config);
        for _ in 0..10 {
            body.advance(&mut scene, 0.0);
        }

        let moon_position = scene.world_position(body.satellites[0].nodes.mesh).unwrap();
        assert!(moon_position.distance(vec3(12.0, 0.0, 0.0)) < EPSILON);
    }

    #[test]
    fn pulse_scales_mesh_only() {
        let config = BodyConfig {
            pulse: Some(Pulse {
                amplitude: 0.05,
                frequency: 2.0,
            }),
            ..planet(0.0, 0.001)
        };
        let (mut scene, body) = spawn(&config);

        let t = PI / 4.0;
        body.advance(&mut scene, t);

        let mesh = scene.get(body.nodes.mesh).unwrap();
        assert!((mesh.scale - 1.05).abs() < EPSILON);
        assert_eq!(scene.get(body.nodes.anchor).unwrap().scale, 1.0);
    }

    #[test]
    fn flatten_is_depth_first() {
        let mut config = planet(0.0, 0.0);
        let mut moon = BodyConfig::new("moon", 0.4);
        moon.satellites.push(BodyConfig::new("moonlet", 0.1));
        config.satellites.push(moon);
        config.satellites.push(BodyConfig::new("other", 0.2));

        let (_, body) = spawn(&config);
        let mut all = Vec::new();
        body.flatten(&mut all);

        let ids = all.iter().map(|b| b.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, ["test", "moon", "moonlet", "other"]);
    }

    #[test]
    fn find_reaches_nested_satellites() {
        let mut config = planet(0.0, 0.0);
        let mut moon = BodyConfig::new("moon", 0.4);
        moon.satellites.push(BodyConfig::new("moonlet", 0.1));
        config.satellites.push(moon);

        let (_, body) = spawn(&config);

        assert_eq!(body.find("test").map(|b| b.nodes), Some(body.nodes));
        assert_eq!(
            body.find("moonlet").map(|b| b.radius),
            Some(0.1)
        );
        assert!(body.find("phobos").is_none());
    }
}
