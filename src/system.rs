use std::collections::HashMap;

use tracing::{debug, info};

use crate::body::{Body, BodyNodes};
use crate::camera::BodyLocator;
use crate::config::{StarfieldConfig, SystemConfig};
use crate::error::OrreryResult;
use crate::orbit_path::OrbitPathCache;
use crate::rotation::SystemRotation;
use crate::scene::{NodeId, Scene, WorldTransform};
use crate::{Num, Vec3};

/// Backdrop sphere hanging off the system root, so it turns with the
/// whole-system rotation.
#[derive(Debug, Clone)]
pub struct Starfield {
    pub node: NodeId,
    pub radius: Num,
    pub color: [f32; 3],
    pub texture: Option<String>,
}

impl Starfield {
    fn spawn(scene: &mut Scene, root: NodeId, config: &StarfieldConfig) -> OrreryResult<Self> {
        Ok(Self {
            node: scene.add(Some(root), Vec3::ZERO)?,
            radius: config.radius,
            color: config.color,
            texture: config.texture.clone(),
        })
    }
}

/// The animated system: scene graph, body tree and whole-system rotation.
///
/// Bodies are fixed once built; only their node transforms change, once per
/// call to [`SolarSystem::advance`].
#[derive(Debug, Clone)]
pub struct SolarSystem {
    scene: Scene,
    root: NodeId,
    sun: Body,
    bodies: Vec<Body>,
    starfield: Starfield,
    /// Scene nodes of every body by id, sun and satellites included.
    index: HashMap<String, BodyNodes>,
    rotation: SystemRotation,
    show_orbits: bool,
    paths: OrbitPathCache,
    elapsed: Num,
}

impl SolarSystem {
    /// Validates `config` and builds the scene it describes.
    pub fn from_config(config: &SystemConfig) -> OrreryResult<Self> {
        config.validate()?;

        let mut scene = Scene::new();
        let root = scene.add(None, Vec3::ZERO)?;
        let starfield = Starfield::spawn(&mut scene, root, &config.starfield)?;

        let sun = Body::spawn(&mut scene, root, &config.sun)?;
        let bodies = config
            .bodies
            .iter()
            .map(|body| Body::spawn(&mut scene, root, body))
            .collect::<OrreryResult<Vec<_>>>()?;

        let mut system = Self {
            scene,
            root,
            sun,
            bodies,
            starfield,
            index: HashMap::new(),
            rotation: config.rotation,
            show_orbits: config.show_orbits,
            paths: OrbitPathCache::new(),
            elapsed: 0.0,
        };

        let (index, radii): (HashMap<_, _>, Vec<_>) = system
            .bodies()
            .into_iter()
            .map(|body| {
                let radius = body.has_orbit_path().then_some(body.orbit_distance);
                ((body.id.clone(), body.nodes), radius)
            })
            .unzip();

        system.index = index;
        for radius in radii.into_iter().flatten() {
            system.paths.get_or_insert(radius);
        }

        info!(
            bodies = system.bodies().len(),
            nodes = system.scene.len(),
            "solar system built"
        );

        Ok(system)
    }

    /// Advances every body to `elapsed` seconds of simulation time and
    /// applies one frame of system rotation.
    pub fn advance(&mut self, elapsed: Num) {
        if elapsed < self.elapsed {
            debug!(previous = self.elapsed, elapsed, "simulation clock went backwards");
        }
        self.elapsed = elapsed;

        self.rotation.advance(&mut self.scene, self.root);

        self.sun.advance(&mut self.scene, elapsed);
        for body in &self.bodies {
            body.advance(&mut self.scene, elapsed);
        }
    }

    pub fn elapsed(&self) -> Num {
        self.elapsed
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn sun(&self) -> &Body {
        &self.sun
    }

    /// The sun, then each body followed by its satellites.
    pub fn bodies(&self) -> Vec<&Body> {
        let mut all = Vec::new();

        self.sun.flatten(&mut all);
        for body in &self.bodies {
            body.flatten(&mut all);
        }

        all
    }

    pub fn body(&self, id: &str) -> Option<&Body> {
        self.sun
            .find(id)
            .or_else(|| self.bodies.iter().find_map(|body| body.find(id)))
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    /// World position of the body's center.
    pub fn locate(&self, id: &str) -> Option<Vec3> {
        let nodes = self.index.get(id)?;

        self.scene.world_position(nodes.mesh)
    }

    pub fn world_transform(&self, node: NodeId) -> Option<WorldTransform> {
        self.scene.world_transform(node)
    }

    pub fn show_orbits(&self) -> bool {
        self.show_orbits
    }

    pub fn set_show_orbits(&mut self, show: bool) {
        self.show_orbits = show;
    }

    pub fn auto_rotation(&self) -> bool {
        self.rotation.enabled
    }

    pub fn set_auto_rotation(&mut self, enabled: bool) {
        self.rotation.enabled = enabled;
    }

    /// World-space orbit polylines of every body that has one, empty while
    /// orbits are hidden.
    pub fn orbit_paths(&self) -> Vec<(&str, Vec<Vec3>)> {
        if !self.show_orbits {
            return Vec::new();
        }

        self.bodies()
            .into_iter()
            .filter(|body| body.has_orbit_path())
            .filter_map(|body| {
                let path = self.paths.get(body.orbit_distance)?;
                let frame = self.scene.world_transform(body.nodes.pivot)?;

                let points = path
                    .iter()
                    .map(|point| frame.transform_point(*point))
                    .collect();

                Some((body.id.as_str(), points))
            })
            .collect()
    }
}

impl BodyLocator for SolarSystem {
    fn locate(&self, id: &str) -> Option<Vec3> {
        SolarSystem::locate(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraController, CameraRig};
    use crate::config::BodyConfig;
    use crate::error::{ConfigError, OrreryError};
    use crate::{vec3, PI};

    const EPSILON: Num = 1e-3;

    fn system() -> SolarSystem {
        SolarSystem::from_config(&SystemConfig::default()).unwrap()
    }

    #[test]
    fn builds_default_table() {
        let system = system();

        let ids = system
            .bodies()
            .iter()
            .map(|body| body.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            ids,
            [
                "sun", "mercury", "venus", "earth", "moon", "mars", "jupiter", "saturn", "uranus",
                "neptune", "pluto"
            ]
        );

        // Root, starfield, then three nodes per body.
        assert_eq!(system.scene().len(), 2 + 3 * 11);
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = SystemConfig::default();
        config.bodies.push(BodyConfig::new("venus", 1.0));

        assert!(matches!(
            SolarSystem::from_config(&config),
            Err(OrreryError::Config(ConfigError::DuplicateId(_)))
        ));
    }

    #[test]
    fn bodies_start_on_positive_x() {
        let mut system = system();
        system.advance(0.0);

        assert_eq!(system.locate("sun"), Some(Vec3::ZERO));
        assert_eq!(system.locate("earth"), Some(vec3(16.0, 0.0, 0.0)));
        assert_eq!(system.locate("moon"), Some(vec3(18.0, 0.0, 0.0)));
        assert_eq!(system.locate("vulcan"), None);
    }

    #[test]
    fn planets_keep_their_orbit_radius() {
        let mut system = system();

        for t in [0.5, 3.0, 17.25] {
            system.advance(t);

            for body in system.bodies() {
                if body.id == "moon" {
                    continue;
                }

                let position = system.locate(&body.id).unwrap();
                assert!((position.length() - body.orbit_distance).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn earth_position_matches_orbit_angle() {
        let mut system = system();
        let t = PI / 0.2 / 2.0;

        system.advance(t);

        // A quarter turn around +Y carries +X onto -Z.
        let earth = system.locate("earth").unwrap();
        assert!(earth.distance(vec3(0.0, 0.0, -16.0)) < EPSILON);
    }

    #[test]
    fn auto_rotation_turns_whole_system() {
        let mut system = system();
        system.advance(0.0);
        let before = system.locate("neptune").unwrap();

        system.set_auto_rotation(true);
        for _ in 0..10 {
            system.advance(0.0);
        }

        let after = system.locate("neptune").unwrap();
        assert!((after.length() - before.length()).abs() < EPSILON);
        assert!(after.distance(before) > 0.01);

        system.set_auto_rotation(false);
        system.advance(0.0);
        assert_eq!(system.locate("neptune").unwrap(), after);
    }

    #[test]
    fn auto_rotation_turns_starfield() {
        let mut system = system();
        let node = system.starfield().node;
        assert_eq!(system.starfield().radius, 400.0);

        system.advance(1.0);
        assert_eq!(system.world_transform(node).unwrap().rotation_y, 0.0);

        system.set_auto_rotation(true);
        for _ in 0..4 {
            system.advance(1.0);
        }

        let world = system.world_transform(node).unwrap();
        assert!((world.rotation_y - 4.0 * crate::SYSTEM_ROTATION_STEP).abs() < 1e-6);
        assert_eq!(world.translation, Vec3::ZERO);
    }

    #[test]
    fn locate_matches_every_mesh() {
        let mut system = system();
        system.advance(12.5);

        for body in system.bodies() {
            assert_eq!(
                system.locate(&body.id),
                system.scene().world_position(body.nodes.mesh)
            );
            assert_eq!(system.body(&body.id).map(|b| b.nodes), Some(body.nodes));
        }
        assert!(system.body("vulcan").is_none());
    }

    #[test]
    fn orbit_paths_follow_visibility() {
        let mut system = system();
        system.advance(1.0);

        let paths = system.orbit_paths();
        assert_eq!(paths.len(), 10);

        let (_, moon_path) = paths.iter().find(|(id, _)| *id == "moon").unwrap();
        let earth = system.locate("earth").unwrap();
        for point in moon_path {
            assert!((point.distance(earth) - 2.0).abs() < EPSILON);
        }

        system.set_show_orbits(false);
        assert!(system.orbit_paths().is_empty());
    }

    #[test]
    fn camera_follows_moving_body() {
        let mut system = system();
        let mut camera = CameraController::new(
            SystemConfig::default().camera,
            SystemConfig::default().tour,
        );
        let mut rig = camera.default_rig();

        camera.follow("mars");
        for frame in 0..2000 {
            system.advance(frame as Num / 60.0);
            camera.update(&mut rig, &system);
        }

        let mars = system.locate("mars").unwrap();
        assert_eq!(rig.look_at, mars);
        // Smoothing trails a moving target by roughly speed / alpha.
        assert!(rig.position.distance(mars + vec3(10.0, 5.0, 10.0)) < 2.0);
    }

    #[test]
    fn tour_runs_over_live_system() {
        let mut system = system();
        let config = SystemConfig::default();
        let mut camera = CameraController::new(config.camera, config.tour);
        let mut rig = CameraRig::default();

        system.advance(0.0);
        assert!(camera.start_tour(&system, rig.look_at));
        assert_eq!(camera.tour().unwrap().stops().len(), 9);

        for frame in 0..600 {
            system.advance(frame as Num / 60.0);
            camera.update(&mut rig, &system);
        }

        assert_eq!(camera.tour().unwrap().state().current_index, 1);
    }
}
