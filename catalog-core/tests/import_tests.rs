use std::path::{Path, PathBuf};

use filament_catalog_core::compile_directory;
use filament_catalog_core::importer::config::ImportTarget;
use filament_catalog_core::importer::http_client::ImportHttpClient;
use filament_catalog_core::importer::source_update::{update_source_file, SourceDocument};
use filament_catalog_core::importer::swatch::parse_swatches;
use filament_catalog_core::importer::{import_colors, import_page, ImportReport};

const POLYTERRA: &str = "PolyTerra™ {color_name}";

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_parse_product_page_fixture() {
    let html = std::fs::read_to_string(fixture_path("polyterra.html")).expect("Failed to read fixture");
    let swatches = parse_swatches(&html).expect("Failed to parse swatches");

    let pairs: Vec<(&str, &str)> = swatches
        .iter()
        .map(|s| (s.name.as_str(), s.hex.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Charcoal Black", "2e2e2e"),
            ("Fossil Grey", "8a8d8f"),
            ("Sakura Pink", "f5b7c5"),
            ("Cotton White", "ffffff"),
        ]
    );
}

#[test]
fn test_imported_colors_compile() {
    let html = std::fs::read_to_string(fixture_path("polyterra.html")).expect("Failed to read fixture");
    let swatches = parse_swatches(&html).expect("Failed to parse swatches");

    let tmp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let source = tmp_dir.path().join("polymaker.json");
    std::fs::copy(fixture_path("filaments/polymaker.json"), &source).expect("Failed to copy fixture");

    let updated = update_source_file(&source, "PolyTerra™ {color_name}", &swatches)
        .expect("Failed to update source");
    assert!(updated);

    let written = std::fs::read_to_string(&source).expect("Failed to read updated source");
    assert!(written.contains("    \"manufacturer\": \"Polymaker\""), "Expected 4-space indent");
    assert!(written.contains("PolyTerra™"), "Non-ASCII must not be escaped");

    let document = SourceDocument::from_json(&written).expect("Updated source is not valid JSON");
    let filament = &document.raw()["filaments"][0];
    assert_eq!(filament["density"], 1.31);
    assert_eq!(filament["translucent"], false);
    assert_eq!(filament["colors"].as_array().unwrap().len(), 4);

    let rows = compile_directory(tmp_dir.path()).expect("Imported source should compile");
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "PolyTerra™ Charcoal Black",
            "PolyTerra™ Cotton White",
            "PolyTerra™ Fossil Grey",
            "PolyTerra™ Sakura Pink",
        ]
    );
    assert_eq!(rows[0].id, "polymaker_pla_polyterracharcoalblack_1000_175_c");
}

fn polyterra_target(source: &Path) -> ImportTarget {
    ImportTarget {
        name: POLYTERRA.to_string(),
        url: "https://us.polymaker.com/products/polyterra-pla".to_string(),
        source: source.to_path_buf(),
    }
}

fn copy_polymaker_source(dir: &Path) -> (PathBuf, Vec<u8>) {
    let source = dir.join("polymaker.json");
    std::fs::copy(fixture_path("filaments/polymaker.json"), &source).expect("Failed to copy fixture");
    let original = std::fs::read(&source).expect("Failed to read source");
    (source, original)
}

#[test]
fn test_import_page_rewrites_source() {
    let html = std::fs::read_to_string(fixture_path("polyterra.html")).expect("Failed to read fixture");
    let tmp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let (source, original) = copy_polymaker_source(tmp_dir.path());

    let report = import_page(&polyterra_target(&source), &html, false).expect("Import failed");
    assert_eq!(
        report,
        ImportReport {
            name: POLYTERRA.to_string(),
            colors: 4,
            updated: true,
        }
    );
    assert_ne!(std::fs::read(&source).unwrap(), original);
}

#[test]
fn test_dry_run_leaves_source_untouched() {
    let html = std::fs::read_to_string(fixture_path("polyterra.html")).expect("Failed to read fixture");
    let tmp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let (source, original) = copy_polymaker_source(tmp_dir.path());

    let report = import_page(&polyterra_target(&source), &html, true).expect("Import failed");
    assert_eq!(report.colors, 4);
    assert!(!report.updated);
    assert_eq!(std::fs::read(&source).unwrap(), original, "Dry run must not rewrite the source");
}

#[test]
fn test_page_without_swatches_leaves_source_untouched() {
    let html = "<html><body><p>Currently unavailable</p></body></html>";
    let tmp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let (source, original) = copy_polymaker_source(tmp_dir.path());

    let report = import_page(&polyterra_target(&source), html, false).expect("Import failed");
    assert_eq!(report.colors, 0);
    assert!(!report.updated);
    assert_eq!(
        std::fs::read(&source).unwrap(),
        original,
        "An empty swatch list must not wipe existing colours"
    );
}

#[test]
fn test_unmatched_target_name_leaves_source_untouched() {
    let html = std::fs::read_to_string(fixture_path("polyterra.html")).expect("Failed to read fixture");
    let tmp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let (source, original) = copy_polymaker_source(tmp_dir.path());

    let mut target = polyterra_target(&source);
    target.name = "PolyLite™ {color_name}".to_string();
    let report = import_page(&target, &html, false).expect("Import failed");
    assert!(!report.updated);
    assert_eq!(std::fs::read(&source).unwrap(), original);
}

#[tokio::test]
async fn test_failed_fetch_aborts_before_touching_source() {
    let tmp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let (source, original) = copy_polymaker_source(tmp_dir.path());

    let mut target = polyterra_target(&source);
    target.url = "not a url".to_string();
    let client = ImportHttpClient::new().expect("Failed to build client");

    let err = import_colors(&[target], &client, false).await.unwrap_err();
    assert!(err.to_string().contains("Failed to fetch"), "{}", err);
    assert_eq!(std::fs::read(&source).unwrap(), original);
}
