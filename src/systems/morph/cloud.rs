use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;

// flatten to the packed xyz buffer the gpu gets, point order preserved
pub fn pack(points: &[Vec3]) -> Vec<[f32; 3]> {
    points.iter().map(|p| p.to_array()).collect()
}

/// Builds a point-list mesh from `points`, positions only, no indices.
pub fn build(points: &[Vec3]) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::PointList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, pack(points));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;

    fn positions(mesh: &Mesh) -> Vec<[f32; 3]> {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(values)) => values.clone(),
            other => panic!("unexpected position attribute {other:?}"),
        }
    }

    #[test]
    fn packs_three_floats_per_point_in_order() {
        let packed = pack(&[Vec3::new(1.0, 2.0, 3.0), Vec3::new(-4.0, 5.5, 0.0)]);
        assert_eq!(packed, vec![[1.0, 2.0, 3.0], [-4.0, 5.5, 0.0]]);
    }

    #[test]
    fn builds_unindexed_point_list() {
        let mesh = build(&[Vec3::X, Vec3::Y]);
        assert_eq!(mesh.primitive_topology(), PrimitiveTopology::PointList);
        assert!(mesh.indices().is_none());
        assert_eq!(mesh.count_vertices(), 2);
        assert!(mesh.attribute(Mesh::ATTRIBUTE_NORMAL).is_none());
    }

    #[test]
    fn equal_input_gives_bit_identical_buffers() {
        let points = vec![Vec3::new(0.1, -0.2, 0.3), Vec3::new(1e-7, 3.5, -9.25)];
        let first: Vec<u32> = positions(&build(&points)).iter().flatten().map(|f| f.to_bits()).collect();
        let second: Vec<u32> = positions(&build(&points.clone())).iter().flatten().map(|f| f.to_bits()).collect();
        assert_eq!(first, second);
    }
}
