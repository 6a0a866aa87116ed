use bevy::prelude::*;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin}; // fps
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};

use crate::config::{LIGHT_SLIDER_MAX, LIGHT_SLIDER_MIN};
use crate::systems::light::{snap_to_slider, LightPicker, TunedLight};
use crate::systems::morph::{MorphDriver, MorphPhase, Seed};
use crate::systems::stage::DisplacementPulse;

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        assert!(app.is_plugin_added::<EguiPlugin>());
        app
            .add_systems(EguiPrimaryContextPass, (ui_main, fps)); // UI rendering here
    }
}

fn ui_main(
    mut contexts: EguiContexts,
    mut picker: ResMut<LightPicker>,
    mut lights: Query<(&mut Transform, &mut PointLight), With<TunedLight>>,
    driver: Res<MorphDriver>,
    pulse: Option<Res<DisplacementPulse>>,
    seed: Res<Seed>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::SidePanel::right("debug_panel")
        .default_width(220.0)
        .resizable(true)
        .show(ctx, |ui| {
            // camera
            ui.label("Camera: ");
            ui.label("Scroll - Zoom");
            ui.label("MMB - Rotate");

            ui.separator();

            egui::CollapsingHeader::new("Light")
                .default_open(true)
                .show(ui, |ui| {
                    let Ok((mut transform, mut light)) = lights.single_mut() else {
                        ui.label("no light in scene");
                        return;
                    };

                    // edit a copy so change detection only fires on real edits
                    let mut position = transform.translation;
                    let mut moved = false;
                    for (axis, value) in [("x", &mut position.x), ("y", &mut position.y), ("z", &mut position.z)] {
                        moved |= ui.add(egui::Slider::new(value, LIGHT_SLIDER_MIN..=LIGHT_SLIDER_MAX)
                            .step_by(1.0)
                            .text(axis))
                            .changed();
                    }
                    if moved {
                        transform.translation = position.map(snap_to_slider);
                    }

                    ui.horizontal(|ui| {
                        ui.label("color");
                        if ui.color_edit_button_srgb(&mut picker.0).changed() {
                            let [r, g, b] = picker.0;
                            light.color = Color::srgb_u8(r, g, b);
                        }
                    });
                });

            egui::CollapsingHeader::new("Morph")
                .default_open(true)
                .show(ui, |ui| {
                    let phase = match driver.phase {
                        MorphPhase::Blending { .. } => "blending",
                        MorphPhase::Settled { .. } => "settled",
                    };
                    ui.label(format!("Phase: {}", phase));
                    ui.label(format!("Blend: {:.3}", driver.factor()));
                    if let Some(pulse) = &pulse {
                        ui.label(format!("Plane displacement: {:.2}", pulse.intensity));
                    }
                    ui.label(format!("Seed: {}", seed.0));
                });

            ui.separator();
            ui.label("ESC - Exit");
        });
}

fn fps(
    mut contexts: EguiContexts,
    diagnostics: Res<DiagnosticsStore>,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        egui::Area::new(egui::Id::new("fps_counter"))
            .anchor(egui::Align2::LEFT_TOP, egui::Vec2::new(10.0, 10.0))
            .show(ctx, |ui| {
                if let Some(fps_diagnostic) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
                    if let Some(fps) = fps_diagnostic.smoothed() {
                        ui.label(egui::RichText::new(format!("{:.0}", fps))
                            .size(26.0)
                            .color(egui::Color32::WHITE));
                    }
                }
            });
    }
}
