use bevy::prelude::*;

use crate::config::*;
use crate::systems::hex_color;

// the single point light, tuned live from the debug panel
pub struct LightPlugin;

#[derive(Component)]
pub struct TunedLight;

// colour picker state, only written to the light when the picker changes
#[derive(Resource)]
pub struct LightPicker(pub [u8; 3]);

impl Default for LightPicker {
    fn default() -> Self {
        Self(PICKER_INITIAL_COLOR)
    }
}

impl Plugin for LightPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<LightPicker>()
            .add_systems(Startup, spawn_light)
            .add_systems(Update, light_helper);
    }
}

fn spawn_light(mut commands: Commands) {
    commands.spawn((
        TunedLight,
        PointLight {
            color: hex_color(LIGHT_COLOR),
            intensity: LIGHT_INTENSITY,
            range: LIGHT_RANGE,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(LIGHT_POSITION)),
    ));
}

// wire sphere around the light, like a helper in an editor
fn light_helper(
    mut gizmos: Gizmos,
    lights: Query<(&Transform, &PointLight), With<TunedLight>>,
) {
    for (transform, light) in lights.iter() {
        gizmos.sphere(transform.translation, LIGHT_HELPER_RADIUS, light.color);
    }
}

/// Clamps a slider value onto the integer grid the panel exposes.
pub fn snap_to_slider(value: f32) -> f32 {
    value.round().clamp(LIGHT_SLIDER_MIN, LIGHT_SLIDER_MAX)
}
