// end-to-end checks, running the real frame systems in a headless app
use std::time::Duration;

use bevy::prelude::*;
use bevy::render::mesh::VertexAttributeValues;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::*;
use crate::systems::morph::{animate_morph, cloud, geometry, spawn_cloud, MorphCloud, MorphDriver, MorphTargets, Seed};
use crate::systems::stage::{animate_plane, build_plane, plane_rotation, spawn_stage, DepthCylinder, DisplacedPlane, DisplacementPulse, HeightField, PulseRng};

fn headless_app() -> (App, Entity, Entity) {
    let mut app = App::new();
    app
        .insert_resource(Time::<()>::default())
        .init_resource::<Assets<Mesh>>()
        .insert_resource(Seed(INITIAL_SEED))
        .init_resource::<MorphTargets>()
        .init_resource::<MorphDriver>()
        .insert_resource(HeightField::generate(8, 4, INITIAL_SEED))
        .insert_resource(DisplacementPulse::new(PLANE_INITIAL_INTENSITY).unwrap())
        .insert_resource(PulseRng(StdRng::seed_from_u64(5)))
        .add_systems(Update, (animate_morph, animate_plane).chain());

    let world = app.world_mut();
    let sphere = world.resource::<MorphTargets>().sphere.clone();
    let field = world.resource::<HeightField>().clone();
    let (cloud_mesh, plane_mesh) = {
        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        (
            meshes.add(cloud::build(&sphere)),
            meshes.add(build_plane(&field, PLANE_SIZE, PLANE_INITIAL_INTENSITY)),
        )
    };

    let cloud = world.spawn((MorphCloud, Mesh3d(cloud_mesh), Transform::default())).id();
    let plane = world.spawn((DisplacedPlane, Mesh3d(plane_mesh), Transform::default())).id();
    (app, cloud, plane)
}

// one frame, `seconds` after the previous one
fn frame(app: &mut App, seconds: u64) {
    app.world_mut().resource_mut::<Time>().advance_by(Duration::from_secs(seconds));
    app.update();
}

fn mesh_positions(app: &App, entity: Entity) -> Vec<[f32; 3]> {
    let handle = app.world().get::<Mesh3d>(entity).expect("entity has a mesh").0.clone();
    let meshes = app.world().resource::<Assets<Mesh>>();
    match meshes.get(&handle).and_then(|m| m.attribute(Mesh::ATTRIBUTE_POSITION)) {
        Some(VertexAttributeValues::Float32x3(values)) => values.clone(),
        other => panic!("unexpected positions {other:?}"),
    }
}

#[test]
fn four_point_scenario() {
    let base = vec![Vec3::X, Vec3::Y, Vec3::Z, Vec3::NEG_X];
    let spiked = geometry::displace_with(&base, |_| 3.0);
    let halfway = geometry::interpolate(&base, &spiked, 0.5).unwrap();

    assert_eq!(
        cloud::pack(&halfway),
        vec![[2.5, 0.0, 0.0], [0.0, 2.5, 0.0], [0.0, 0.0, 2.5], [-2.5, 0.0, 0.0]]
    );
}

#[test]
fn cloud_blends_then_settles_and_spins() {
    let (mut app, cloud, _) = headless_app();

    // frames at 1s, 2s ... 13s keep blending
    for _ in 1..=13 {
        frame(&mut app, 1);
        assert!(!app.world().resource::<MorphDriver>().is_settled());
    }
    let factor = app.world().resource::<MorphDriver>().factor();
    let expected = app.world().resource::<MorphTargets>().blend(factor).unwrap();
    assert_eq!(mesh_positions(&app, cloud), cloud::pack(&expected));
    assert_eq!(app.world().get::<Transform>(cloud).unwrap().rotation, Quat::IDENTITY);

    // 14s crosses zero, still a rebuild frame
    frame(&mut app, 1);
    assert!(app.world().resource::<MorphDriver>().is_settled());
    let frozen = mesh_positions(&app, cloud);
    assert_ne!(frozen, cloud::pack(&expected));

    for second in 15..=18 {
        frame(&mut app, 1);
        assert_eq!(mesh_positions(&app, cloud), frozen, "rebuilt after settling at {second}s");
        let rotation = app.world().get::<Transform>(cloud).unwrap().rotation;
        assert!(rotation.abs_diff_eq(Quat::from_rotation_y(CLOUD_SPIN_RATE * second as f32), 1e-6));
    }
}

#[test]
fn plane_spins_and_pulses_on_even_seconds() {
    let (mut app, _, plane) = headless_app();
    let initial = mesh_positions(&app, plane);

    frame(&mut app, 1);
    assert_eq!(mesh_positions(&app, plane), initial);
    assert!(app.world().get::<Transform>(plane).unwrap().rotation.abs_diff_eq(plane_rotation(1.0), 1e-6));

    frame(&mut app, 1);
    let pulsed = app.world().resource::<DisplacementPulse>().intensity;
    assert!((INTENSITY_MIN..INTENSITY_MAX).contains(&pulsed));
    assert_eq!(app.world().resource::<DisplacementPulse>().last_second, 2);

    let field = app.world().resource::<HeightField>().clone();
    let positions = mesh_positions(&app, plane);
    for (p, h) in positions.iter().zip(&field.heights) {
        assert_eq!(p[2], h * pulsed);
    }

    // odd second, geometry untouched
    frame(&mut app, 1);
    assert_eq!(mesh_positions(&app, plane), positions);
}

fn fog_enabled<T: Component>(app: &mut App) -> bool {
    let handle = {
        let world = app.world_mut();
        let mut query = world.query_filtered::<&MeshMaterial3d<StandardMaterial>, With<T>>();
        query.single(world).expect("one spawned entity").0.clone()
    };
    let materials = app.world().resource::<Assets<StandardMaterial>>();
    materials.get(&handle).expect("material is stored").fog_enabled
}

#[test]
fn depth_fog_only_shades_the_cylinder() {
    let mut app = App::new();
    app
        .init_resource::<Assets<Mesh>>()
        .init_resource::<Assets<StandardMaterial>>()
        .insert_resource(Seed(INITIAL_SEED))
        .init_resource::<MorphTargets>()
        .insert_resource(HeightField::generate(8, 4, INITIAL_SEED))
        .add_systems(Startup, (spawn_cloud, spawn_stage));
    app.update();

    assert!(!fog_enabled::<MorphCloud>(&mut app));
    assert!(!fog_enabled::<DisplacedPlane>(&mut app));
    assert!(fog_enabled::<DepthCylinder>(&mut app));
}
