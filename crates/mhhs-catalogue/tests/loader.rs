use std::fs;
use std::path::PathBuf;

use mhhs_catalogue::{
    CatalogueError, FAVORITES_KEY, FilePreferenceStore, PreferenceStore, load_catalogue,
};

fn temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("mhhs_catalogue_{name}_{}_{stamp}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn cleanup_dir(dir: &PathBuf) {
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn loads_catalogue_from_file() {
    let dir = temp_dir("load");
    let path = dir.join("interfaceData.json");
    fs::write(
        &path,
        r#"{
  "interfaces": [{ "id": "IF-001", "name": "Registration", "supplier_type": "supplier_both" }],
  "dataItemsCatalogue": { "DI-001": { "name": "MPAN", "cmo": "M", "rule": "13 digits" } },
  "dataBlocksCatalogue": {},
  "rejectionCodesCatalogue": {}
}"#,
    )
    .expect("write catalogue");

    let catalogue = load_catalogue(&path).expect("load catalogue");
    assert_eq!(catalogue.interfaces.len(), 1);
    assert_eq!(catalogue.interfaces[0].name, "Registration");
    assert!(catalogue.item("DI-001").is_some());

    cleanup_dir(&dir);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = temp_dir("missing");
    let error = load_catalogue(&dir.join("absent.json")).unwrap_err();
    assert!(matches!(error, CatalogueError::Io { .. }));
    cleanup_dir(&dir);
}

#[test]
fn null_file_is_unavailable() {
    let dir = temp_dir("null");
    let path = dir.join("interfaceData.json");
    fs::write(&path, "null").expect("write catalogue");

    let error = load_catalogue(&path).unwrap_err();
    assert!(matches!(error, CatalogueError::Unavailable { .. }));

    cleanup_dir(&dir);
}

#[test]
fn file_store_persists_values() {
    let dir = temp_dir("prefs");
    let prefs_dir = dir.join("nested");
    let mut store = FilePreferenceStore::new(&prefs_dir);

    assert_eq!(store.read(FAVORITES_KEY).expect("read"), None);

    store
        .write_json(FAVORITES_KEY, &vec!["IF-002".to_string()])
        .expect("write favorites");
    assert!(prefs_dir.join("mhhs_favorites.json").exists());

    let reopened = FilePreferenceStore::new(&prefs_dir);
    let loaded: Option<Vec<String>> = reopened.read_json(FAVORITES_KEY).expect("read favorites");
    assert_eq!(loaded, Some(vec!["IF-002".to_string()]));

    cleanup_dir(&dir);
}
