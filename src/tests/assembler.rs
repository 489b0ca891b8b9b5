use approx::assert_relative_eq;

use crate::{ColorGradient, FlatElevation, Mesh, MeshBuilder, MeshError, Noise, Options, Polygon};

use super::util::backend::ScriptedBackend;

/// A constant offset, so perturbed and unperturbed vertices are easy to tell apart
struct Bump(f64);

impl Noise for Bump {
    fn perlin2d(&self, _x: f64, _y: f64, _frequency: f64) -> f64 {
        self.0
    }
}

fn scripted(backend: ScriptedBackend) -> MeshBuilder<FlatElevation, Bump, ScriptedBackend> {
    MeshBuilder::new(FlatElevation(1.)).with_noise(Bump(0.5)).with_backend(backend)
}

#[test]
fn corners_are_swapped_and_offset() {
    let builder = scripted(ScriptedBackend::unit_square());
    let mut mesh = Mesh::new();
    builder.add_polygon(&mut mesh, &Polygon::default(), &Options::new()).expect("Assembly failed");
    builder.add_polygon(&mut mesh, &Polygon::default(), &Options::new()).expect("Assembly failed");

    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangles, vec![1, 0, 2, 2, 0, 3, 5, 4, 6, 6, 4, 7]);
    mesh.check_invariants().expect("Invariants broken");
}

#[test]
fn extra_corners_are_ignored() {
    let mut backend = ScriptedBackend::unit_square();
    backend.output.corners = 6;
    backend.output.triangles = vec![0, 1, 2, 3, 3, 3, 0, 2, 3, 1, 1, 1];
    let builder = scripted(backend);
    let mut mesh = Mesh::new();
    builder.add_polygon(&mut mesh, &Polygon::default(), &Options::new()).expect("Assembly failed");

    assert_eq!(mesh.triangles, vec![1, 0, 2, 2, 0, 3]);
}

#[test]
fn noise_skips_boundary_markers() {
    let mut backend = ScriptedBackend::unit_square();
    backend.output.points.extend_from_slice(&[0.5, 0.5]);
    backend.output.point_count = 5;
    backend.output.markers = Some(vec![1, 1, 1, 1, 0]);
    let builder = scripted(backend);
    let mut mesh = Mesh::new();
    builder.add_polygon(&mut mesh, &Polygon::default(), &Options::new()).expect("Assembly failed");

    let z: Vec<f64> = (0..5).map(|vi| mesh.vertex(vi).unwrap()[2]).collect();
    assert_eq!(z, vec![1., 1., 1., 1., 1.5]);
}

#[test]
fn no_markers_means_no_noise() {
    let builder = scripted(ScriptedBackend::unit_square());
    let mut mesh = Mesh::new();
    builder.add_polygon(&mut mesh, &Polygon::default(), &Options::new().height_offset(2.)).expect("Assembly failed");
    assert!(mesh.vertices.chunks_exact(3).all(|v| v[2] == 3.));
}

#[test]
fn elevation_override_replaces_provider() {
    let builder = scripted(ScriptedBackend::unit_square());
    let mut mesh = Mesh::new();
    builder.add_polygon(&mut mesh, &Polygon::default(), &Options::new().elevation(-4.).height_offset(0.25)).expect("Assembly failed");
    for v in mesh.vertices.chunks_exact(3) {
        assert_relative_eq!(v[2], -3.75);
    }
}

#[test]
fn provider_is_sampled_latitude_first() {
    let builder = MeshBuilder::new(|lat: f64, lon: f64| lat * 10. + lon)
        .with_noise(Bump(0.))
        .with_backend(ScriptedBackend::unit_square());
    let mut mesh = Mesh::new();
    builder.add_polygon(&mut mesh, &Polygon::default(), &Options::new()).expect("Assembly failed");

    // Points (0,0) (1,0) (1,1) (0,1), elevation = y * 10 + x
    let z: Vec<f64> = mesh.vertices.chunks_exact(3).map(|v| v[2]).collect();
    assert_eq!(z, vec![0., 1., 11., 10.]);
}

#[test]
fn colors_follow_the_gradient() {
    let gradient = ColorGradient::new([(0., 0x000000ff), (1., 0xffffffff)]);
    let builder = scripted(ScriptedBackend::unit_square());
    let mut mesh = Mesh::new();
    builder.add_polygon(&mut mesh, &Polygon::default(), &Options::with_gradient(gradient)).expect("Assembly failed");

    // Noise of 0.5 maps to t = 0.75
    assert_eq!(mesh.colors, vec![0xbfbfbfff; 4]);
}

fn expect_contract_violation(backend: ScriptedBackend) {
    let builder = scripted(backend);
    let mut mesh = Mesh::new();
    mesh.push_vertex(9., 9., 9., 7);
    let before = mesh.clone();
    let result = builder.add_polygon(&mut mesh, &Polygon::default(), &Options::new());
    assert!(matches!(result, Err(MeshError::InternalError(_))), "{:?}", result);
    assert_eq!(mesh, before);
}

#[test]
fn short_point_buffer_is_internal_error() {
    let mut backend = ScriptedBackend::unit_square();
    backend.output.points.truncate(6);
    expect_contract_violation(backend);
}

#[test]
fn short_triangle_buffer_is_internal_error() {
    let mut backend = ScriptedBackend::unit_square();
    backend.output.triangle_count = 3;
    expect_contract_violation(backend);
}

#[test]
fn short_marker_buffer_is_internal_error() {
    let mut backend = ScriptedBackend::unit_square();
    backend.output.markers = Some(vec![1, 1]);
    expect_contract_violation(backend);
}

#[test]
fn corner_out_of_range_is_internal_error() {
    let mut backend = ScriptedBackend::unit_square();
    backend.output.triangles[4] = 4;
    expect_contract_violation(backend);

    let mut backend = ScriptedBackend::unit_square();
    backend.output.triangles[0] = -1;
    expect_contract_violation(backend);
}

#[test]
fn too_few_corners_is_internal_error() {
    let mut backend = ScriptedBackend::unit_square();
    backend.output.corners = 2;
    expect_contract_violation(backend);
}

#[test]
fn empty_output_appends_nothing() {
    let mut backend = ScriptedBackend::unit_square();
    backend.output.triangle_count = 0;
    backend.output.triangles.clear();
    let builder = scripted(backend);
    let mut mesh = Mesh::new();
    builder.add_polygon(&mut mesh, &Polygon::default(), &Options::new().area(1.)).expect("Assembly failed");
    assert!(mesh.is_empty());
}
