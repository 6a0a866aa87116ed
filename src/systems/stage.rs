// the static props under the cloud: a displaced, spinning plane and a depth-shaded cylinder
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

use crate::config::*;
use crate::error::MorphError;
use crate::systems::morph::{animate_morph, Seed};

pub struct StagePlugin;

impl Plugin for StagePlugin {
    fn build(&self, app: &mut App) {
        let seed = app.world().get_resource::<Seed>().copied().unwrap_or_default();

        match DisplacementPulse::new(PLANE_INITIAL_INTENSITY) {
            Ok(pulse) => {
                app.insert_resource(pulse);
            }
            Err(e) => error!("plane displacement will not pulse: {}", e),
        }

        app
            .insert_resource(HeightField::generate(PLANE_SEGMENTS, HEIGHT_LATTICE, seed.0))
            .insert_resource(PulseRng(StdRng::seed_from_u64(seed.0.wrapping_add(1))))
            .add_systems(Startup, spawn_stage)
            .add_systems(Update, animate_plane.after(animate_morph));
    }
}

#[derive(Component)]
pub struct DisplacedPlane;

#[derive(Component)]
pub struct DepthCylinder;

// drives the intensity resamples, kept apart from the spike rng
#[derive(Resource)]
pub struct PulseRng(pub StdRng);

/// Displacement heights in `[0, 1)` for every plane vertex, row-major from the top-left corner.
#[derive(Resource, Clone, Debug)]
pub struct HeightField {
    pub heights: Vec<f32>,
    pub segments: u32,
}

impl HeightField {
    // value noise: random lattice corners, smoothstep-bilinear in between
    pub fn generate(segments: u32, lattice: usize, seed: u64) -> Self {
        let lattice = lattice.max(1);
        let mut rng = StdRng::seed_from_u64(seed);
        let corners: Vec<f32> = (0..(lattice + 1) * (lattice + 1))
            .map(|_| rng.random::<f32>())
            .collect();
        let corner = |x: usize, y: usize| corners[y * (lattice + 1) + x];

        let columns = segments as usize + 1;
        let mut heights = Vec::with_capacity(columns * columns);

        for iy in 0..columns {
            for ix in 0..columns {
                let gx = ix as f32 / segments.max(1) as f32 * lattice as f32;
                let gy = iy as f32 / segments.max(1) as f32 * lattice as f32;
                let cx = (gx.floor() as usize).min(lattice - 1);
                let cy = (gy.floor() as usize).min(lattice - 1);
                let sx = smoothstep(gx - cx as f32);
                let sy = smoothstep(gy - cy as f32);

                let top = corner(cx, cy) + (corner(cx + 1, cy) - corner(cx, cy)) * sx;
                let bottom = corner(cx, cy + 1) + (corner(cx + 1, cy + 1) - corner(cx, cy + 1)) * sx;
                heights.push(top + (bottom - top) * sy);
            }
        }

        Self { heights, segments }
    }
}

fn smoothstep(x: f32) -> f32 {
    x * x * (3.0 - 2.0 * x)
}

/// Resamples the plane's displacement intensity on even whole seconds.
#[derive(Resource, Clone, Debug)]
pub struct DisplacementPulse {
    pub last_second: u32,
    pub intensity: f32,
    range: Uniform<f32>,
}

impl DisplacementPulse {
    pub fn new(intensity: f32) -> Result<Self, MorphError> {
        Ok(Self {
            last_second: 0,
            intensity,
            range: Uniform::new(INTENSITY_MIN, INTENSITY_MAX)?,
        })
    }

    /// # Returns the new intensity when `elapsed` just reached an even whole second not seen before.
    pub fn tick<R: Rng>(&mut self, elapsed: f32, rng: &mut R) -> Option<f32> {
        let second = elapsed.max(0.0).floor() as u32;
        if second == self.last_second || second % 2 != 0 {
            return None;
        }

        self.last_second = second;
        self.intensity = self.range.sample(rng);
        Some(self.intensity)
    }
}

// absolute orientation, the tilt is a raw radian value
pub fn plane_rotation(elapsed: f32) -> Quat {
    Quat::from_euler(EulerRot::XYZ, PLANE_TILT, 0.0, PLANE_SPIN_RATE * elapsed)
}

/// Builds the plane in the XY plane facing +Z, each vertex pushed along +Z by `height * intensity`.
/// Normals stay flat.
pub fn build_plane(field: &HeightField, size: f32, intensity: f32) -> Mesh {
    let segments = field.segments.max(1);
    let columns = segments + 1;
    let cell = size / segments as f32;
    let half = size / 2.0;

    let mut positions = Vec::with_capacity((columns * columns) as usize);
    let mut normals = Vec::with_capacity((columns * columns) as usize);
    let mut uvs = Vec::with_capacity((columns * columns) as usize);
    let mut indices = Vec::with_capacity((segments * segments * 6) as usize);

    for iy in 0..columns {
        let y = half - iy as f32 * cell;
        for ix in 0..columns {
            let x = ix as f32 * cell - half;
            let height = field.heights.get((iy * columns + ix) as usize).copied().unwrap_or(0.0);

            positions.push([x, y, height * intensity]);
            normals.push([0.0, 0.0, 1.0]);
            uvs.push([ix as f32 / segments as f32, 1.0 - iy as f32 / segments as f32]);
        }
    }

    // two counter-clockwise triangles per cell
    for iy in 0..segments {
        for ix in 0..segments {
            let a = iy * columns + ix;
            let b = (iy + 1) * columns + ix;
            let c = (iy + 1) * columns + ix + 1;
            let d = iy * columns + ix + 1;
            indices.extend([a, b, d, b, c, d]);
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));

    mesh
}

pub fn spawn_stage(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    field: Res<HeightField>,
    pulse: Option<Res<DisplacementPulse>>,
) {
    let intensity = pulse.map_or(PLANE_INITIAL_INTENSITY, |p| p.intensity);

    commands.spawn((
        DisplacedPlane,
        Mesh3d(meshes.add(build_plane(&field, PLANE_SIZE, intensity))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(0.5, 0.5, 0.5, PLANE_ALPHA),
            alpha_mode: AlphaMode::Blend,
            double_sided: true,
            cull_mode: None,
            fog_enabled: false,
            ..default()
        })),
        Transform::from_xyz(0.0, PLANE_HEIGHT, 0.0).with_rotation(plane_rotation(0.0)),
    ));

    // unlit white, the camera fog darkens it with distance
    commands.spawn((
        DepthCylinder,
        Mesh3d(meshes.add(
            Cylinder::new(CYLINDER_RADIUS, CYLINDER_HEIGHT)
                .mesh()
                .resolution(CYLINDER_RESOLUTION)
                .segments(CYLINDER_SEGMENTS),
        )),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            fog_enabled: true,
            ..default()
        })),
        Transform::default(),
    ));
}

pub fn animate_plane(
    time: Res<Time>,
    pulse: Option<ResMut<DisplacementPulse>>,
    mut rng: ResMut<PulseRng>,
    field: Res<HeightField>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut planes: Query<(&Mesh3d, &mut Transform), With<DisplacedPlane>>,
) {
    let elapsed = time.elapsed_secs();

    let resampled = pulse.and_then(|mut pulse| pulse.tick(elapsed, &mut rng.0));
    if let Some(intensity) = resampled {
        debug!("plane displacement intensity -> {:.3}", intensity);
    }

    for (mesh3d, mut transform) in planes.iter_mut() {
        transform.rotation = plane_rotation(elapsed);

        if let Some(intensity) = resampled {
            if let Some(mesh) = meshes.get_mut(&mesh3d.0) {
                *mesh = build_plane(&field, PLANE_SIZE, intensity);
            }
        }
    }
}
