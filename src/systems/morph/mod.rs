// this is the entry point for the morphing point cloud plugin
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::*;
use crate::error::MorphError;
use crate::systems::hex_color;

pub mod cloud;
pub mod driver;
pub mod geometry;

pub use driver::{MorphDriver, MorphFrame, MorphPhase};

// index-aligned point list, index i means the same sphere vertex in every derived sequence
pub type PointSequence = Vec<Vec3>;

// resources
#[derive(Resource, Clone, Copy, Debug)]
pub struct Seed(pub u64);

impl Default for Seed {
    fn default() -> Self {
        if RESEED_EACH_RUN {
            Seed(rand::random())
        } else {
            Seed(INITIAL_SEED)
        }
    }
}

/// The two endpoint shapes of the morph, built once at startup.
#[derive(Resource)]
pub struct MorphTargets {
    pub sphere: PointSequence,
    pub spiked: PointSequence,
}

impl MorphTargets {
    pub fn from_seed(seed: u64) -> Self {
        let sphere_mesh = Sphere::new(SPHERE_RADIUS).mesh().uv(SPHERE_SECTORS, SPHERE_STACKS);
        let sphere = geometry::sample(&sphere_mesh);
        let mut rng = StdRng::seed_from_u64(seed);
        let spiked = geometry::displace(&sphere, &mut rng);
        Self { sphere, spiked }
    }

    pub fn blend(&self, t: f32) -> Result<PointSequence, MorphError> {
        geometry::interpolate(&self.sphere, &self.spiked, t)
    }
}

impl FromWorld for MorphTargets {
    fn from_world(world: &mut World) -> Self {
        let seed = world.get_resource::<Seed>().copied().unwrap_or_default();
        let targets = Self::from_seed(seed.0);
        info!("sampled {} sphere points, spike seed {}", targets.sphere.len(), seed.0);
        targets
    }
}

#[derive(Component)]
pub struct MorphCloud;

pub struct MorphPlugin;

impl Plugin for MorphPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<Seed>()
            .init_resource::<MorphTargets>()
            .init_resource::<MorphDriver>()
            .add_systems(Startup, spawn_cloud)
            .add_systems(Update, animate_morph);
    }
}

pub fn spawn_cloud(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    targets: Res<MorphTargets>,
) {
    // first frame replaces this with the spiked blend
    let mesh = meshes.add(cloud::build(&targets.sphere));
    let material = materials.add(StandardMaterial {
        base_color: hex_color(CLOUD_COLOR),
        unlit: true,
        // the depth fog is for the cylinder only
        fog_enabled: false,
        ..default()
    });

    commands.spawn((
        MorphCloud,
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_translation(Vec3::from_array(CLOUD_POSITION)),
        // bounds are computed once from the spawn mesh, the cloud outgrows them
        NoFrustumCulling,
    ));
}

/// Blends the cloud while the driver is blending, then only spins it.
pub fn animate_morph(
    time: Res<Time>,
    targets: Res<MorphTargets>,
    mut driver: ResMut<MorphDriver>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut clouds: Query<(&Mesh3d, &mut Transform), With<MorphCloud>>,
) {
    let elapsed = time.elapsed_secs();
    let was_settled = driver.is_settled();
    let frame = driver.step(elapsed);

    if !was_settled && driver.is_settled() {
        info!("morph settled at {:.2}s, final blend {:.4}", elapsed, driver.factor());
    }

    match frame {
        MorphFrame::Rebuild(t) => {
            let points = match targets.blend(t) {
                Ok(points) => points,
                Err(e) => {
                    error!("skipping point cloud rebuild: {}", e);
                    return;
                }
            };

            for (mesh3d, _) in clouds.iter() {
                if let Some(mesh) = meshes.get_mut(&mesh3d.0) {
                    *mesh = cloud::build(&points);
                }
            }
        }
        MorphFrame::Spin(angle) => {
            for (_, mut transform) in clouds.iter_mut() {
                transform.rotation = Quat::from_rotation_y(angle);
            }
        }
    }
}
