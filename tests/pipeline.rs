//! End-to-end pipeline tests: files on disk -> rendered SVG.

use std::io::Write;
use std::path::PathBuf;

use chorograph::{Granularity, MapConfig, Palette, Renderer, Transform, render_svg};

const DATASET: &str = "FIPS,rate\n01001,5.1\n01003,4.9\nbogus,1.0\n";

const TOPOLOGY: &str = r#"{
    "type": "Topology",
    "objects": {
        "counties": {
            "type": "GeometryCollection",
            "geometries": [
                {"type": "Polygon", "id": "1001", "arcs": [[0]], "properties": {"name": "Autauga"}},
                {"type": "Polygon", "id": "1003", "arcs": [[1]], "properties": {"name": "Baldwin"}},
                {"type": "Polygon", "id": "1005", "arcs": [[2]], "properties": {"name": "Barbour"}}
            ]
        },
        "states": {
            "type": "GeometryCollection",
            "geometries": [
                {"type": "MultiPolygon", "id": 1, "arcs": [[[0]], [[1]], [[2]]], "properties": {"name": "Alabama"}}
            ]
        }
    },
    "arcs": [
        [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]],
        [[1.0, 0.0], [2.0, 0.0], [2.0, 1.0], [1.0, 1.0], [1.0, 0.0]],
        [[2.0, 0.0], [3.0, 0.0], [3.0, 1.0], [2.0, 1.0], [2.0, 0.0]]
    ]
}"#;

fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{contents}").unwrap();
    path
}

fn config(dir: &tempfile::TempDir) -> MapConfig {
    let data = write_temp(dir, "rates.csv", DATASET);
    let topo = write_temp(dir, "us.json", TOPOLOGY);
    MapConfig {
        title: "Birth rate by county".into(),
        dataset_url: data.to_str().unwrap().into(),
        key_column: "FIPS".into(),
        value_column: "rate".into(),
        topology_url: topo.to_str().unwrap().into(),
        granularity: Granularity::Counties,
        transform: Transform::Identity,
        palette: Palette::Blues,
        legend_steps: 4,
        stroke_color: "#ffffff".into(),
    }
}

#[test]
fn renders_a_county_map_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);

    let renderer = Renderer::new();
    let output = renderer.render(&config).unwrap();

    // One row was dropped, two keys survive.
    assert_eq!(output.dataset.len(), 2);
    assert_eq!(output.dataset.dropped(), 1);

    let features = output.features().unwrap();
    assert_eq!(features.len(), 3);
    assert_eq!(features[0].label, "Autauga, 5.1");
    assert_eq!(features[1].label, "Baldwin, 4.9");
    assert_eq!(features[2].label, "Barbour, no data");

    // Domain extremes take the palette extremes; no-data takes the gray.
    assert_eq!(features[0].color, Palette::Blues.interpolate(1.0));
    assert_eq!(features[1].color, Palette::Blues.interpolate(0.0));
    assert_eq!(features[2].color.to_hex(), "#cccccc");
}

#[test]
fn state_granularity_misses_county_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(&dir);
    config.granularity = Granularity::States;

    let output = Renderer::new().render(&config).unwrap();
    let features = output.features().unwrap();

    // State id 1 encodes to key 1000, absent from the county-keyed dataset.
    // Every joined value is missing, so the scale degenerates to a constant
    // at the palette's minimum intensity.
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].label, "Alabama, no data");
    assert_eq!(features[0].color, Palette::Blues.interpolate(0.0));
}

#[test]
fn svg_output_contains_paths_legend_and_tooltips() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);

    let output = Renderer::new().render(&config).unwrap();

    let mut svg = Vec::new();
    render_svg(&mut svg, &output, &config, 960.0, 10.0).unwrap();
    let svg = String::from_utf8(svg).unwrap();

    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("Birth rate by county"));
    assert_eq!(svg.matches("<path d=").count(), 3);
    assert!(svg.contains("<title>Autauga, 5.1</title>"));
    assert!(svg.contains("<title>Barbour, no data</title>"));
    assert_eq!(svg.matches("<rect x=").count(), config.legend_steps);
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn topology_is_cached_across_renders() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);

    let renderer = Renderer::new();
    renderer.render(&config).unwrap();

    // Remove the topology file; the second render must hit the cache.
    std::fs::remove_file(&config.topology_url).unwrap();
    let output = renderer.render(&config).unwrap();
    assert_eq!(output.features().unwrap().len(), 3);
}

#[test]
fn missing_resources_surface_as_load_errors() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(&dir);
    config.dataset_url = dir.path().join("absent.csv").to_str().unwrap().into();

    let err = Renderer::new().render(&config).unwrap_err();
    assert!(matches!(err, chorograph::Error::Load(_)));
}

#[test]
fn missing_granularity_object_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_temp(&dir, "rates.csv", DATASET);
    let topo = write_temp(
        &dir,
        "states-only.json",
        r#"{"objects": {"states": {"geometries": []}}, "arcs": []}"#,
    );

    let mut config = config(&dir);
    config.dataset_url = data.to_str().unwrap().into();
    config.topology_url = topo.to_str().unwrap().into();
    config.granularity = Granularity::Counties;

    let err = Renderer::new().render(&config).unwrap_err();
    assert!(matches!(err, chorograph::Error::Config(_)));
}
