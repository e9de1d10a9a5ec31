use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn network_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pattern-network"));
    cmd.env_remove("PATTERN_NETWORK_CATALOG");
    cmd
}

/// Project with a small image size so rendering stays fast.
fn setup_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".pattern-network.toml"),
        "[image]\nwidth_in = 4.0\nheight_in = 3.0\ndpi = 50\n",
    )
    .unwrap();
    temp_dir
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    network_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("natural patterns"));
}

#[test]
fn test_version() {
    network_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pattern-network"));
}

// =============================================================================
// Full pipeline
// =============================================================================

#[test]
fn test_no_args_runs_full_pipeline() {
    let temp_dir = setup_project();

    network_cmd()
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Network visualization saved to"))
        .stdout(predicate::str::contains("Network data saved to"))
        .stdout(predicate::str::contains("Network has 10 nodes and 13 edges"))
        .stdout(predicate::str::contains("Visualizations saved to"));

    let out = temp_dir.path().join("docs").join("visualizations");
    let png = fs::read(out.join("pattern_network.png")).unwrap();
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));

    let data = read_json(&out.join("pattern_network.json"));
    assert_eq!(data["nodes"].as_array().unwrap().len(), 10);
    assert_eq!(data["links"].as_array().unwrap().len(), 13);
    assert_eq!(data["nodes"][0]["id"], "Fractal Self-Similarity");
    assert_eq!(data["nodes"][0]["category"], "Structural");
}

#[test]
fn test_generate_is_reproducible() {
    let temp_dir = setup_project();
    let png = temp_dir
        .path()
        .join("docs/visualizations/pattern_network.png");

    network_cmd()
        .arg("generate")
        .current_dir(temp_dir.path())
        .assert()
        .success();
    let first = fs::read(&png).unwrap();

    network_cmd()
        .arg("generate")
        .current_dir(temp_dir.path())
        .assert()
        .success();
    assert_eq!(first, fs::read(&png).unwrap());
}

#[test]
fn test_generate_skip_image() {
    let temp_dir = setup_project();

    network_cmd()
        .args(["generate", "--skip-image"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("visualization saved").not());

    let out = temp_dir.path().join("docs/visualizations");
    assert!(!out.join("pattern_network.png").exists());
    assert!(out.join("pattern_network.json").exists());
}

#[test]
fn test_output_dir_flag() {
    let temp_dir = setup_project();

    network_cmd()
        .args(["--output-dir", "build/graphs", "generate", "--skip-image"])
        .current_dir(temp_dir.path())
        .assert()
        .success();

    assert!(
        temp_dir
            .path()
            .join("build/graphs/pattern_network.json")
            .exists()
    );
}

#[test]
fn test_strict_generate_fails_on_dangling_relationships() {
    let temp_dir = setup_project();

    network_cmd()
        .args(["generate", "--strict"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("uncategorized"));

    assert!(
        !temp_dir
            .path()
            .join("docs/visualizations/pattern_network.json")
            .exists()
    );
}

#[test]
fn test_zero_layout_k_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".pattern-network.toml"),
        "[layout]\nk = 0.0\n",
    )
    .unwrap();

    network_cmd()
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("layout.k must be a positive number"));

    assert!(!temp_dir.path().join("docs/visualizations").exists());
}

#[test]
fn test_oversized_image_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".pattern-network.toml"),
        "[image]\nwidth_in = 10000000.0\n",
    )
    .unwrap();

    network_cmd()
        .arg("render")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("px per side"));
}

// =============================================================================
// Custom catalogs
// =============================================================================

#[test]
fn test_custom_catalog_two_nodes_one_link() {
    let temp_dir = setup_project();
    fs::write(
        temp_dir.path().join("small.toml"),
        r#"
[categories]
A = "Structural"
B = "Process"

[relationships]
A = ["B"]
B = ["A"]
"#,
    )
    .unwrap();

    let output = network_cmd()
        .args(["--catalog", "small.toml", "export", "--stdout"])
        .current_dir(temp_dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let data: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(data["nodes"].as_array().unwrap().len(), 2);
    assert_eq!(data["links"].as_array().unwrap().len(), 1);
}

#[test]
fn test_custom_catalog_drops_unknown_targets() {
    let temp_dir = setup_project();
    fs::write(
        temp_dir.path().join("dangling.json"),
        r#"{"categories": {"A": "Structural"}, "relationships": {"A": ["Z"]}}"#,
    )
    .unwrap();

    let output = network_cmd()
        .args(["--catalog", "dangling.json", "export", "--stdout"])
        .current_dir(temp_dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let data: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(data["links"].as_array().unwrap().len(), 0);
}

#[test]
fn test_invalid_catalog_category_fails() {
    let temp_dir = setup_project();
    fs::write(
        temp_dir.path().join("bad.yaml"),
        "categories:\n  A: Mystical\n",
    )
    .unwrap();

    network_cmd()
        .args(["--catalog", "bad.yaml", "export", "--stdout"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load catalog"));
}

// =============================================================================
// Render / Export
// =============================================================================

#[test]
fn test_render_to_explicit_path() {
    let temp_dir = setup_project();

    network_cmd()
        .args(["render", "-o", "graph.png"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("graph.png"));

    assert!(temp_dir.path().join("graph.png").exists());
}

#[test]
fn test_render_into_missing_directory_fails() {
    let temp_dir = setup_project();

    network_cmd()
        .args(["render", "-o", "missing/graph.png"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to render"));
}

#[test]
fn test_export_default_path() {
    let temp_dir = setup_project();

    network_cmd()
        .arg("export")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Network data saved to"));

    let data = read_json(&temp_dir.path().join("docs/visualizations/pattern_network.json"));
    for link in data["links"].as_array().unwrap() {
        assert!(link["source"].is_string());
        assert!(link["target"].is_string());
    }
}

// =============================================================================
// Check / Init
// =============================================================================

#[test]
fn test_check_reports_dangling_relationships() {
    let temp_dir = setup_project();

    network_cmd()
        .arg("check")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Self-Organization"))
        .stdout(predicate::str::contains("Adaptive Capacity"));
}

#[test]
fn test_check_json() {
    let temp_dir = setup_project();

    let output = network_cmd()
        .args(["check", "--json"])
        .current_dir(temp_dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let data: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(data["nodes"], 10);
    assert_eq!(data["edges"], 13);
    assert_eq!(data["by_category"]["Process"], 4);
    assert_eq!(data["dangling"].as_array().unwrap().len(), 2);
}

#[test]
fn test_check_strict_fails() {
    let temp_dir = setup_project();

    network_cmd()
        .args(["check", "--strict"])
        .current_dir(temp_dir.path())
        .assert()
        .failure();
}

#[test]
fn test_init_creates_config_and_catalog() {
    let temp_dir = TempDir::new().unwrap();

    network_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    assert!(temp_dir.path().join(".pattern-network.toml").exists());
    let catalog = fs::read_to_string(temp_dir.path().join("patterns.toml")).unwrap();
    assert!(catalog.contains("Boundaries and Interfaces"));

    network_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_init_catalog_drives_export() {
    let temp_dir = TempDir::new().unwrap();

    network_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success();

    let catalog_path = temp_dir.path().join("patterns.toml");
    let mut catalog = fs::read_to_string(&catalog_path).unwrap();
    catalog = catalog.replace("[categories]", "[categories]\n\"Self-Organization\" = \"Process\"");
    fs::write(&catalog_path, catalog).unwrap();

    let output = network_cmd()
        .args(["export", "--stdout"])
        .current_dir(temp_dir.path())
        .output()
        .unwrap();
    let data: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(data["nodes"].as_array().unwrap().len(), 11);
    assert_eq!(data["links"].as_array().unwrap().len(), 14);
}
