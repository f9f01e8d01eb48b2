use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::render_resource::Face;
use orrery::{NodeId, SolarSystem};

/// Links an entity to the scene node whose world transform it mirrors.
#[derive(Debug, Clone, Copy, Component)]
pub struct SceneNode(pub NodeId);

pub fn spawn_bodies(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    asset_server: &AssetServer,
    system: &SolarSystem,
) {
    for body in system.bodies() {
        let mesh = meshes.add(Mesh::from(shape::UVSphere {
            radius: body.radius,
            sectors: 64,
            stacks: 64,
        }));

        let [r, g, b] = body.color;
        let color = Color::rgb(r, g, b);
        let texture = body.texture.clone().map(|path| asset_server.load(path));

        let material = if body.emissive {
            StandardMaterial {
                base_color: color,
                base_color_texture: texture,
                emissive: color * 4.0,
                unlit: true,
                ..default()
            }
        } else {
            StandardMaterial {
                base_color: color,
                base_color_texture: texture,
                emissive: color * 0.05,
                perceptual_roughness: 1.0,
                ..default()
            }
        };

        let mut entity = commands.spawn((
            PbrBundle {
                mesh,
                material: materials.add(material),
                ..default()
            },
            SceneNode(body.nodes.mesh),
            Name::new(body.id.clone()),
        ));

        if body.emissive {
            entity.insert(NotShadowCaster);
        }

        debug!(body = %body.id, radius = body.radius, "spawned body");
    }
}

/// The backdrop sphere. Front faces are culled so only its inside shows.
pub fn spawn_starfield(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    asset_server: &AssetServer,
    system: &SolarSystem,
) {
    let starfield = system.starfield();

    let mesh = meshes.add(Mesh::from(shape::UVSphere {
        radius: starfield.radius,
        sectors: 64,
        stacks: 32,
    }));

    let [r, g, b] = starfield.color;
    let material = StandardMaterial {
        base_color: Color::rgb(r, g, b),
        base_color_texture: starfield.texture.clone().map(|path| asset_server.load(path)),
        unlit: true,
        cull_mode: Some(Face::Front),
        ..default()
    };

    commands.spawn((
        PbrBundle {
            mesh,
            material: materials.add(material),
            ..default()
        },
        SceneNode(starfield.node),
        NotShadowCaster,
        Name::new("starfield"),
    ));
}
