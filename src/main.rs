use bevy::prelude::*;
use bevy::math::bounding::Aabb2d;
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::window::WindowPlugin;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy_egui::EguiPlugin;
use bevy_rts_camera::*;

pub mod config;
pub mod error;
pub mod systems;

#[cfg(test)]
pub mod test;

use config::*;
use systems::light::LightPlugin;
use systems::morph::MorphPlugin;
use systems::stage::StagePlugin;
use systems::ui::UIPlugin;

fn main() -> bevy::app::AppExit {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "sphere morph".into(),
                // web builds draw into the page's canvas and follow its size
                canvas: Some(".webgl".into()),
                fit_canvas_to_parent: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(RtsCameraPlugin)

        // my custom plugins, morph first since it owns the seed
        .add_plugins(MorphPlugin)
        .add_plugins(StagePlugin)
        .add_plugins(LightPlugin)
        .add_plugins(UIPlugin)

        .insert_resource(ClearColor(Color::BLACK)) // world color
        .add_systems(Startup, start)
        .add_systems(Update, (handle_exit, orbit_camera))
        .run()
}

// application entry point here
fn start(
    mut commands: Commands
) {
    let start = Vec3::from_array(CAMERA_START);
    let yaw = start.x.atan2(start.z); // face the origin from the start position

    // spawn camera, orbiting the origin with zoom only
    commands.spawn((
        RtsCamera {
            bounds: Aabb2d::new(Vec2::ZERO, Vec2::splat(1.0)),
            height_min: CAMERA_HEIGHT_MIN,
            height_max: CAMERA_HEIGHT_MAX,
            target_focus: Transform::from_rotation(Quat::from_rotation_y(yaw)),
            target_zoom: 1.0 - (start.y - CAMERA_HEIGHT_MIN) / (CAMERA_HEIGHT_MAX - CAMERA_HEIGHT_MIN),
            ..default()
        },
        RtsCameraControls {
            key_up: KeyCode::F20,   // panning disabled
            key_down: KeyCode::F21,
            key_left: KeyCode::F22,
            key_right: KeyCode::F19,
            key_rotate_left: KeyCode::F24,
            key_rotate_right: KeyCode::F23,
            pan_speed: 0.0,
            zoom_sensitivity: 0.15,
            edge_pan_width: 0.0,
            ..default()
        },
        // black linear fog gives the unlit props their depth shading
        DistanceFog {
            color: Color::BLACK,
            falloff: FogFalloff::Linear {
                start: DEPTH_FOG_START,
                end: DEPTH_FOG_END,
            },
            ..default()
        },
    ));
}

fn orbit_camera(
    time: Res<Time>,
    mut cameras: Query<&mut RtsCamera>,
) {
    let step = std::f32::consts::TAU / CAMERA_SECONDS_PER_TURN * time.delta_secs();
    for mut camera in cameras.iter_mut() {
        camera.target_focus.rotate_y(step);
    }
}

// application exit
fn handle_exit(
    keys: Res<ButtonInput<KeyCode>>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
