use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bevy::core_pipeline::bloom::BloomSettings;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use clap::Parser;
use orrery::{CameraController, SolarSystem, SystemConfig};
use smooth_bevy_cameras::controllers::orbit::{
    OrbitCameraBundle, OrbitCameraController, OrbitCameraPlugin,
};
use smooth_bevy_cameras::LookTransformPlugin;

mod draw;
mod planet;
mod ui;
mod update;

#[derive(Debug, Parser)]
#[command(about = "Animated solar system")]
struct Args {
    /// YAML file replacing the built-in body table and camera tuning
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => SystemConfig::default(),
    };

    let system = SolarSystem::from_config(&config)?;
    let director = CameraController::new(config.camera, config.tour);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orrery".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(LookTransformPlugin)
        .add_plugins(OrbitCameraPlugin::new(false))
        .add_plugins(EguiPlugin)
        .insert_resource(Orrery(system))
        .insert_resource(Director(director))
        .init_resource::<ui::UiState>()
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                ui::render,
                update::bodies,
                update::transforms,
                update::camera,
                draw::orbits,
                draw::rings,
            )
                .chain(),
        )
        .run();

    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<SystemConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// The animated system, advanced once per frame.
#[derive(Resource)]
struct Orrery(SolarSystem);

/// Camera mode state machine driving the orbit camera's look transform.
#[derive(Resource)]
struct Director(CameraController);

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    orrery: Res<Orrery>,
    director: Res<Director>,
) {
    commands.insert_resource(ClearColor(Color::BLACK));

    commands.insert_resource(AmbientLight {
        color: Color::rgb(0.13, 0.13, 0.2),
        brightness: 0.4,
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 1_000_000.0,
            range: 800.0,
            shadows_enabled: true,
            ..default()
        },
        ..default()
    });

    planet::spawn_starfield(
        &mut commands,
        meshes.as_mut(),
        materials.as_mut(),
        &asset_server,
        &orrery.0,
    );

    planet::spawn_bodies(
        &mut commands,
        meshes.as_mut(),
        materials.as_mut(),
        &asset_server,
        &orrery.0,
    );

    let camera = director.0.camera_config();

    commands
        .spawn(Camera3dBundle {
            camera: Camera {
                hdr: true,
                ..default()
            },
            projection: Projection::Perspective(PerspectiveProjection {
                fov: camera.fov_degrees.to_radians(),
                ..default()
            }),
            ..default()
        })
        .insert(BloomSettings::OLD_SCHOOL)
        .insert(OrbitCameraBundle::new(
            {
                let mut controller = OrbitCameraController::default();

                controller.mouse_rotate_sensitivity = Vec2::ONE * 0.5;
                controller.mouse_translate_sensitivity = Vec2::ONE * 10.0;

                controller
            },
            camera.default_position,
            camera.default_target,
            Vec3::Y,
        ));
}
