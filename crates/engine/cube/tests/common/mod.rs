//! Shared fixtures for cube integration tests

#![allow(dead_code)]

use cube::glam::{Quat, Vec3};
use cube::{CubeDefinition, CubeModels, CubieSlot, Document, Move, Node, Template};
use serde_json::json;
use std::path::PathBuf;

/// Path of a bundled template under the workspace `assets/` directory
pub fn asset(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../../assets")
        .join(name)
}

/// Models backed by the bundled `cube.gltf` / `cube.glb`
pub fn bundled_models() -> CubeModels {
    CubeModels::load(asset("cube.gltf"), asset("cube.glb")).expect("bundled templates load")
}

/// Distinct, non-trivial starting orientation for every slot
pub fn tilted(slot: CubieSlot) -> Quat {
    let i = slot.index() as f32;
    Quat::from_axis_angle(Vec3::new(1.0, i, 2.0 * i + 1.0).normalize(), 0.1 + 0.05 * i)
}

/// Template document with one mesh-less node per slot, tilted orientations,
/// two materials and some unmodelled fields
pub fn tilted_document() -> Document {
    let mut document: Document = serde_json::from_value(json!({
        "asset": { "version": "2.0", "generator": "cube-tests" },
        "scene": 0,
        "scenes": [{ "nodes": (0..26).collect::<Vec<u32>>() }],
        "materials": [
            { "name": "Red", "pbrMetallicRoughness": { "baseColorFactor": [1.0, 0.0, 0.0, 1.0] } },
            { "name": "Inner" }
        ]
    }))
    .expect("valid document");

    document.nodes = CubieSlot::ALL
        .iter()
        .map(|slot| {
            let mut node = Node::named(slot.node_name());
            node.mesh = Some(slot.index() as u32);
            node.set_orientation(tilted(*slot));
            node
        })
        .collect();
    document
}

pub fn tilted_models() -> CubeModels {
    let document = tilted_document();
    let binary = document.clone().with_binary_chunk(vec![0u8; 16]);
    CubeModels::new(
        Template::new(document).expect("valid template"),
        Template::new(binary).expect("valid template"),
    )
}

pub fn tilted_definition() -> CubeDefinition {
    CubeDefinition::from_document(&tilted_document()).expect("valid template")
}

pub fn moves(algorithm: &str) -> Vec<Move> {
    algorithm.split_whitespace().map(|t| t.parse().expect("legal move")).collect()
}

pub const EPSILON: f32 = 1e-5;
