// Host-side tests for scene reconciliation, registries, and picking.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod config {
    include!("../src/config.rs");
}
mod input {
    include!("../src/input.rs");
}
mod selection {
    include!("../src/selection.rs");
}
mod scene {
    include!("../src/scene.rs");
}
mod model {
    include!("../src/model.rs");
}
mod camera {
    include!("../src/camera.rs");
}

use config::GlobeConfig;
use constants::*;
use glam::Vec3;
use scene::*;
use selection::{Highlight, HighlightStyle, Language, SelectionState};

const MANIFEST: &str = r#"{
  "meshes": [
    { "name": "globeFill", "center": [0, 0, 0], "radius": 1.0 },
    { "name": "country_FRANCE", "center": [0.0, 0.0, 1.0], "radius": 0.15 },
    { "name": "country_FRANCE_2", "center": [0.1, 0.05, 0.98], "radius": 0.05 },
    { "name": "country_SPAIN", "center": [-0.4, -0.1, 0.9], "radius": 0.12 },
    { "name": "border_FRANCE", "center": [0.0, 0.0, 1.0], "radius": 0.16 },
    { "name": "border_SPAIN", "center": [-0.4, -0.1, 0.9], "radius": 0.13 },
    { "name": "city_PARIS", "center": [0.01, 0.02, 1.0], "radius": 0.01 },
    { "name": "decor_halo", "center": [0, 0, 0], "radius": 2.0 }
  ]
}"#;

fn load_scene() -> (SceneGraph, Registries) {
    let graph = model::parse_manifest(MANIFEST).expect("manifest parses");
    let regs = Registries::build(&graph);
    (graph, regs)
}

fn clicked(country: &str) -> Highlight {
    Highlight {
        country: country.to_owned(),
        style: HighlightStyle::Clicked,
    }
}

#[test]
fn mesh_names_classify_by_recognized_patterns() {
    assert!(matches!(classify("globeFill"), NodeKind::GlobeFill));
    assert!(matches!(classify("globe_fill"), NodeKind::GlobeFill));
    assert!(matches!(classify("earth"), NodeKind::GlobeFill));
    assert!(matches!(classify("city_PARIS"), NodeKind::City));
    assert!(matches!(classify("decor_halo"), NodeKind::Other));

    match classify("country_france_2") {
        NodeKind::Country { code, base } => {
            assert_eq!(code, "FRANCE_2");
            assert_eq!(base, "FRANCE");
        }
        other => panic!("expected country, got {other:?}"),
    }
    match classify("border_FRANCE") {
        NodeKind::Border { base } => assert_eq!(base, "FRANCE"),
        other => panic!("expected border, got {other:?}"),
    }
}

#[test]
fn registries_group_fragments_under_the_base_code() {
    let (_, regs) = load_scene();
    assert_eq!(regs.countries.len(), 2);
    assert_eq!(regs.countries["FRANCE"].len(), 2);
    assert_eq!(regs.countries["SPAIN"].len(), 1);
    assert_eq!(regs.borders.len(), 2);
    assert_eq!(regs.globe_fill.len(), 1);
    assert_eq!(regs.cities.len(), 1);
}

#[test]
fn reconcile_is_idempotent() {
    let (mut graph, regs) = load_scene();
    let cfg = GlobeConfig::default();
    let hl = clicked("FRANCE");

    reconcile(&mut graph, &regs, Some(&hl), &cfg);
    let after_once = graph.nodes.clone();
    reconcile(&mut graph, &regs, Some(&hl), &cfg);
    assert_eq!(graph.nodes, after_once);
}

#[test]
fn highlighted_country_gets_the_clicked_style_on_every_fragment() {
    let (mut graph, regs) = load_scene();
    let cfg = GlobeConfig::default();
    reconcile(&mut graph, &regs, Some(&clicked("FRANCE")), &cfg);

    for &i in &regs.countries["FRANCE"] {
        let node = &graph.nodes[i];
        assert_eq!(node.scale, cfg.highlight_scale);
        assert_eq!(node.material.color, CLICKED_COLOR);
        assert_eq!(node.material.emissive, CLICKED_EMISSIVE);
        assert_eq!(node.material.emissive_intensity, CLICKED_EMISSIVE_INTENSITY);
        assert_eq!(node.material.roughness, HIGHLIGHT_ROUGHNESS);
        assert_eq!(node.material.metalness, HIGHLIGHT_METALNESS);
    }
    // everyone else resets to the flat default appearance
    let spain = &graph.nodes[regs.countries["SPAIN"][0]];
    assert_eq!(spain.scale, cfg.country_scale);
    assert_eq!(spain.material.color, cfg.country_color);
    assert_eq!(spain.material.emissive_intensity, DEFAULT_EMISSIVE_INTENSITY);
}

#[test]
fn language_default_uses_the_other_style() {
    let (mut graph, regs) = load_scene();
    let cfg = GlobeConfig::default();

    let mut sel = SelectionState::default();
    sel.set_language(Some(Language::Spanish));
    let hl = sel.highlight().expect("language default");
    reconcile(&mut graph, &regs, Some(&hl), &cfg);

    let spain = &graph.nodes[regs.countries["SPAIN"][0]];
    assert_eq!(spain.material.color, LANGUAGE_COLOR);
    assert_eq!(spain.material.emissive, LANGUAGE_EMISSIVE);
}

#[test]
fn highlighted_border_is_opaque_bright_and_drawn_last() {
    let (mut graph, regs) = load_scene();
    let cfg = GlobeConfig::default();
    reconcile(&mut graph, &regs, Some(&clicked("FRANCE")), &cfg);

    let border = &graph.nodes[regs.borders["FRANCE"][0]];
    assert!(border.material.opaque);
    assert_eq!(border.material.color, BORDER_HIGHLIGHT_COLOR);
    assert_eq!(border.render_order, BORDER_HIGHLIGHT_RENDER_ORDER);

    let other = &graph.nodes[regs.borders["SPAIN"][0]];
    assert_eq!(other.material.color, cfg.border_color);
    assert_eq!(other.render_order, 0);
}

#[test]
fn globe_fill_is_forced_to_the_fixed_opaque_material() {
    let (mut graph, regs) = load_scene();
    let cfg = GlobeConfig::default();
    // run with and without a highlight; the fill never changes
    reconcile(&mut graph, &regs, None, &cfg);
    let fill_idx = regs.globe_fill[0];
    let snapshot = graph.nodes[fill_idx].clone();
    reconcile(&mut graph, &regs, Some(&clicked("SPAIN")), &cfg);

    let fill = &graph.nodes[fill_idx];
    assert_eq!(*fill, snapshot);
    assert!(fill.material.opaque);
    assert_eq!(fill.material.color, cfg.globe_fill_color);
    assert_eq!(fill.render_order, GLOBE_FILL_RENDER_ORDER);
    assert_eq!(fill.scale, cfg.globe_fill_scale);
}

#[test]
fn every_fill_mesh_is_forced_when_the_asset_exposes_several() {
    let manifest = r#"{
      "meshes": [
        { "name": "globe", "radius": 1.0 },
        { "name": "globeFill", "radius": 0.99 },
        { "name": "country_FRANCE", "center": [0, 0, 1], "radius": 0.15 }
      ]
    }"#;
    let mut graph = model::parse_manifest(manifest).expect("manifest parses");
    let regs = Registries::build(&graph);
    assert_eq!(regs.globe_fill.len(), 2);

    // simulate the upstream renderer fighting both fill meshes
    for &i in &regs.globe_fill {
        graph.nodes[i].render_order = 99;
        graph.nodes[i].material.opaque = false;
        graph.nodes[i].visible = false;
    }

    let cfg = GlobeConfig::default();
    reconcile(&mut graph, &regs, None, &cfg);
    for &i in &regs.globe_fill {
        let node = &graph.nodes[i];
        assert_eq!(node.render_order, GLOBE_FILL_RENDER_ORDER, "{}", node.name);
        assert!(node.material.opaque, "{}", node.name);
        assert!(node.visible, "{}", node.name);
        assert_eq!(node.material.color, cfg.globe_fill_color);
        assert_eq!(node.scale, cfg.globe_fill_scale);
    }
}

#[test]
fn city_markers_are_always_hidden() {
    let (mut graph, regs) = load_scene();
    reconcile(&mut graph, &regs, None, &GlobeConfig::default());
    for &i in &regs.cities {
        assert!(!graph.nodes[i].visible);
    }
}

#[test]
fn unrecognized_mesh_names_are_never_touched() {
    let (mut graph, regs) = load_scene();
    let halo_idx = graph
        .nodes
        .iter()
        .position(|n| n.name == "decor_halo")
        .expect("halo present");
    let before = graph.nodes[halo_idx].clone();
    reconcile(&mut graph, &regs, Some(&clicked("FRANCE")), &GlobeConfig::default());
    assert_eq!(graph.nodes[halo_idx], before);
}

#[test]
fn reconcile_without_registries_changes_nothing() {
    let (mut graph, _) = load_scene();
    let before = graph.nodes.clone();
    reconcile(&mut graph, &Registries::default(), None, &GlobeConfig::default());
    assert_eq!(graph.nodes, before);
}

#[test]
fn picking_resolves_the_base_country_code() {
    let (graph, regs) = load_scene();
    let root = RootTransform::default();
    let ro = Vec3::new(0.0, 0.0, 3.5);

    let hit = pick_country(&graph, &regs, ro, Vec3::new(0.0, 0.0, -1.0), &root);
    assert_eq!(hit.as_deref(), Some("FRANCE"));
}

#[test]
fn every_fragment_resolves_to_the_same_base_code() {
    let (graph, regs) = load_scene();
    let root = RootTransform::default();

    // aim straight at the second fragment's center
    let ro = Vec3::new(0.1, 0.05, 3.5);
    let hit = pick_country(&graph, &regs, ro, Vec3::new(0.0, 0.0, -1.0), &root);
    assert_eq!(hit.as_deref(), Some("FRANCE"));
}

#[test]
fn picking_misses_are_not_errors() {
    let (graph, regs) = load_scene();
    let root = RootTransform::default();
    let hit = pick_country(
        &graph,
        &regs,
        Vec3::new(0.0, 0.0, 3.5),
        Vec3::new(0.0, 1.0, 0.0),
        &root,
    );
    assert!(hit.is_none());
}

#[test]
fn picking_respects_the_root_rotation() {
    let (graph, regs) = load_scene();
    let ro = Vec3::new(-0.4, -0.1, 3.5);
    let rd = Vec3::new(0.0, 0.0, -1.0);

    let front = pick_country(&graph, &regs, ro, rd, &RootTransform::default());
    assert_eq!(front.as_deref(), Some("SPAIN"));

    // half a turn later the same ray finds nothing where Spain used to be
    let turned = RootTransform {
        yaw: std::f32::consts::PI,
        pitch: 0.0,
        float_y: 0.0,
    };
    assert!(pick_country(&graph, &regs, ro, rd, &turned).is_none());
}

#[test]
fn picking_happens_where_scaled_fragments_are_drawn() {
    let manifest = r#"{
      "meshes": [
        { "name": "country_ICELAND", "center": [1.0, 0.0, 0.0], "radius": 0.1 }
      ]
    }"#;
    let mut graph = model::parse_manifest(manifest).expect("manifest parses");
    graph.nodes[0].scale = 2.0;
    let regs = Registries::build(&graph);
    let root = RootTransform::default();
    let rd = Vec3::new(0.0, 0.0, -1.0);

    // the scale moves the center out to x = 2.0, which is where rendering
    // places the fragment; picking must agree
    let at_drawn = pick_country(&graph, &regs, Vec3::new(2.0, 0.0, 3.5), rd, &root);
    assert_eq!(at_drawn.as_deref(), Some("ICELAND"));
    let at_unscaled = pick_country(&graph, &regs, Vec3::new(1.0, 0.0, 3.5), rd, &root);
    assert!(at_unscaled.is_none());
}

#[test]
fn screen_center_ray_points_down_the_camera_axis() {
    let (ro, rd) = camera::screen_to_world_ray(800.0, 600.0, 400.0, 300.0, CAMERA_Z);
    assert!((ro - Vec3::new(0.0, 0.0, CAMERA_Z)).length() < 1e-5);
    assert!(rd.z < -0.999);
    assert!(rd.x.abs() < 1e-3 && rd.y.abs() < 1e-3);
}

#[test]
fn float_offset_is_bounded_by_the_amplitude() {
    let cfg = GlobeConfig::default();
    assert_eq!(float_offset(0.0, &cfg), 0.0);
    for i in 0..100 {
        let y = float_offset(i as f32 * 0.37, &cfg);
        assert!(y.abs() <= cfg.floating_amplitude + 1e-6);
    }
}

#[test]
fn manifest_parse_failures_are_typed() {
    assert!(matches!(
        model::parse_manifest("not json"),
        Err(model::ModelError::Parse(_))
    ));
    assert!(matches!(
        model::parse_manifest(r#"{ "meshes": [] }"#),
        Err(model::ModelError::Empty)
    ));
}
