use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use orrery::CameraMode;
use smooth_bevy_cameras::LookTransform;

use crate::{Director, Orrery};

#[derive(Resource, Debug, Clone, Default)]
pub struct UiState {
    about_visible: bool,
}

pub fn render(
    mut ui_state: ResMut<UiState>,
    mut egui_context: EguiContexts,
    mut orrery: ResMut<Orrery>,
    mut director: ResMut<Director>,
    camera: Query<&LookTransform>,
) {
    let ctx = egui_context.ctx_mut();
    let look_at = camera
        .get_single()
        .map(|look| look.target)
        .unwrap_or(Vec3::ZERO);

    egui::TopBottomPanel::top("Top").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let touring = matches!(director.0.mode(), CameraMode::Tour(_));

            if ui.selectable_label(touring, "Cinematic tour").clicked() {
                director.0.toggle_tour(&orrery.0, look_at);
            }

            if ui.button("Stop").clicked() {
                director.0.stop();
            }

            if ui.button("Release").clicked() {
                director.0.release();
            }

            ui.separator();

            let mut show_orbits = orrery.0.show_orbits();
            if ui.checkbox(&mut show_orbits, "Show orbits").changed() {
                orrery.0.set_show_orbits(show_orbits);
            }

            let mut rotate = orrery.0.auto_rotation();
            if ui.checkbox(&mut rotate, "Auto-rotate").changed() {
                orrery.0.set_auto_rotation(rotate);
            }

            ui.separator();

            if ui.button("About").clicked() {
                ui_state.about_visible = !ui_state.about_visible;
            }
        });
    });

    egui::SidePanel::left("Left").show(ctx, |ui| {
        ui.heading("Bodies:");

        let ids: Vec<String> =
            orrery.0.bodies().iter().map(|body| body.id.clone()).collect();

        for id in ids {
            let selected = director.0.follow_target() == Some(id.as_str());

            if ui.selectable_label(selected, title_case(&id)).clicked() {
                if selected {
                    director.0.stop();
                } else {
                    director.0.follow(id);
                }
            }
        }
    });

    egui::TopBottomPanel::bottom("Bottom").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(format!("Camera: {}", director.0.mode()));

            if let Ok(look) = camera.get_single() {
                let eye = look.eye;
                ui.label(format!("Position: ({:.1}, {:.1}, {:.1})", eye.x, eye.y, eye.z));
            }

            ui.label(format!("Time: {:.1}s", orrery.0.elapsed()));
        });
    });

    egui::Window::new("About")
        .open(&mut ui_state.about_visible)
        .show(ctx, |ui| {
            ui.label("Planets revolve and spin at hand-tuned rates around a pulsing sun.");
            ui.label("Pick a body on the left to follow it, or start the cinematic tour.");
            ui.label("Stop glides the camera back to the overview; Release hands it to the mouse.");
        });
}

fn title_case(id: &str) -> String {
    let mut chars = id.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
