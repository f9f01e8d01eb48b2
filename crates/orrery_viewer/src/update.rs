use bevy::prelude::*;
use orrery::CameraRig;
use smooth_bevy_cameras::controllers::orbit::OrbitCameraController;
use smooth_bevy_cameras::LookTransform;

use crate::planet::SceneNode;
use crate::{Director, Orrery};

pub fn bodies(time: Res<Time>, mut orrery: ResMut<Orrery>) {
    orrery.0.advance(time.elapsed_seconds());
}

pub fn transforms(orrery: Res<Orrery>, mut nodes: Query<(&SceneNode, &mut Transform)>) {
    for (node, mut transform) in nodes.iter_mut() {
        let Some(world) = orrery.0.world_transform(node.0) else {
            warn!("Entity mirrors unknown scene node {:?}", node.0);
            continue;
        };

        transform.translation = world.translation;
        transform.rotation = Quat::from_rotation_y(world.rotation_y);
        transform.scale = Vec3::splat(world.scale);
    }
}

pub fn camera(
    mut director: ResMut<Director>,
    orrery: Res<Orrery>,
    mut cameras: Query<(&mut LookTransform, &mut OrbitCameraController, &mut Transform)>,
) {
    let Ok((mut look, mut controller, mut transform)) = cameras.get_single_mut() else {
        return;
    };

    let director = &mut director.0;
    let was_free = director.is_free();

    let mut rig = CameraRig::new(look.eye, look.target);
    director.update(&mut rig, &orrery.0);

    // A disabled controller also disables its smoother, which then stops
    // copying the look transform into the camera transform.
    if !was_free {
        look.eye = rig.position;
        look.target = rig.look_at;
        *transform = Transform::from_translation(rig.position).looking_at(rig.look_at, Vec3::Y);
    }

    let free = director.is_free();
    if controller.enabled != free {
        controller.enabled = free;
    }

    if free {
        let config = director.camera_config();
        let eye = clamp_zoom(look.eye, look.target, config.min_distance, config.max_distance);

        if eye != look.eye {
            look.eye = eye;
        }
    }
}

/// Pulls `eye` along its line of sight so it stays between `min` and `max`
/// away from `target`.
fn clamp_zoom(eye: Vec3, target: Vec3, min: f32, max: f32) -> Vec3 {
    let offset = eye - target;
    let distance = offset.length();

    if distance <= f32::EPSILON {
        return eye;
    }

    let clamped = distance.clamp(min, max);

    target + offset * (clamped / distance)
}

#[cfg(test)]
mod tests {
    use bevy::input::InputPlugin;
    use orrery::{CameraController, SolarSystem, SystemConfig};
    use smooth_bevy_cameras::controllers::orbit::{OrbitCameraBundle, OrbitCameraPlugin};
    use smooth_bevy_cameras::LookTransformPlugin;
    use test_case::test_case;

    use super::*;

    fn app() -> App {
        let config = SystemConfig::default();
        let mut system = SolarSystem::from_config(&config).unwrap();
        system.advance(0.0);

        let mut app = App::new();
        app.add_plugins((MinimalPlugins, InputPlugin))
            .add_plugins(LookTransformPlugin)
            .add_plugins(OrbitCameraPlugin::new(false))
            .insert_resource(Orrery(system))
            .insert_resource(Director(CameraController::new(config.camera, config.tour)))
            .add_systems(Update, camera);

        app.world.spawn((
            TransformBundle::default(),
            OrbitCameraBundle::new(
                OrbitCameraController::default(),
                Vec3::new(0.0, 40.0, 80.0),
                Vec3::ZERO,
                Vec3::Y,
            ),
        ));

        app
    }

    /// Rendered transform, look eye, look target and controller state.
    fn camera_state(app: &mut App) -> (Transform, Vec3, Vec3, bool) {
        let (transform, look, controller) = app
            .world
            .query::<(&Transform, &LookTransform, &OrbitCameraController)>()
            .single(&app.world);

        (*transform, look.eye, look.target, controller.enabled)
    }

    #[test]
    fn followed_body_drives_rendered_camera() {
        let mut app = app();
        app.update();

        app.world.resource_mut::<Director>().0.follow("mars");
        for _ in 0..300 {
            app.update();
        }

        let mars = app.world.resource::<Orrery>().0.locate("mars").unwrap();
        let (transform, eye, target, enabled) = camera_state(&mut app);

        assert!(!enabled);
        assert_eq!(transform.translation, eye);
        assert_eq!(target, mars);
        assert!(transform.translation.distance(mars + Vec3::new(10.0, 5.0, 10.0)) < 0.01);

        let towards_mars = (mars - transform.translation).normalize();
        assert!(transform.forward().dot(towards_mars) > 0.999);
    }

    #[test]
    fn rendered_camera_keeps_moving_while_following() {
        let mut app = app();
        app.update();

        app.world.resource_mut::<Director>().0.follow("jupiter");
        app.update();
        let (first, ..) = camera_state(&mut app);

        for _ in 0..10 {
            app.update();
        }
        let (later, ..) = camera_state(&mut app);

        assert!(first.translation.distance(later.translation) > 1.0);
    }

    #[test]
    fn stop_returns_control_to_orbit_controller() {
        let mut app = app();
        app.update();

        app.world.resource_mut::<Director>().0.follow("earth");
        for _ in 0..200 {
            app.update();
        }

        app.world.resource_mut::<Director>().0.stop();
        for _ in 0..400 {
            app.update();
        }

        assert!(app.world.resource::<Director>().0.is_free());

        let (transform, eye, _, enabled) = camera_state(&mut app);
        let home = Vec3::new(0.0, 40.0, 80.0);

        assert!(enabled);
        assert!(eye.distance(home) < 0.1);
        assert!(transform.translation.distance(home) < 0.1);
    }

    #[test_case(Vec3::new(0.0, 0.0, 10.0) => 20.0 ; "too close")]
    #[test_case(Vec3::new(0.0, 40.0, 80.0) => Vec3::new(0.0, 40.0, 80.0).length() ; "in range")]
    #[test_case(Vec3::new(400.0, 0.0, 0.0) => 300.0 ; "too far")]
    fn zoom_is_clamped(eye: Vec3) -> f32 {
        clamp_zoom(eye, Vec3::ZERO, 20.0, 300.0).length()
    }

    #[test]
    fn clamp_keeps_direction() {
        let target = Vec3::new(5.0, 0.0, 0.0);
        let eye = clamp_zoom(Vec3::new(5.0, 0.0, 1.0), target, 20.0, 300.0);

        assert_eq!(eye, Vec3::new(5.0, 0.0, 20.0));
    }

    #[test]
    fn clamp_ignores_degenerate_offset() {
        let target = Vec3::new(1.0, 2.0, 3.0);

        assert_eq!(clamp_zoom(target, target, 20.0, 300.0), target);
    }
}
