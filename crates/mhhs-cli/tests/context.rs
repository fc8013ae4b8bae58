use std::fs;
use std::path::{Path, PathBuf};

use mhhs_cli::context::{Locations, open_session, read_values};
use mhhs_core::SessionParams;
use mhhs_form::export;

fn temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("mhhs_cli_{name}_{}_{stamp}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn cleanup_dir(dir: &PathBuf) {
    let _ = fs::remove_dir_all(dir);
}

fn write_fixture(dir: &Path) -> Locations {
    let catalogue = dir.join("interfaceData.json");
    fs::write(
        &catalogue,
        r#"{
  "interfaces": [
    {
      "id": "IF-001",
      "name": "Registration Request",
      "supplier_type": "supplier_send",
      "composition": [{ "type": "block", "id": "DB-01" }]
    },
    { "id": "IF-002", "name": "Settlement Report", "supplier_type": "supplier_receive" }
  ],
  "dataItemsCatalogue": {
    "DI-MPAN": { "name": "MPAN Core", "cmo": "M", "payloadKey": "mpan" }
  },
  "dataBlocksCatalogue": {
    "DB-01": { "title": "Meter Point", "items": ["DI-MPAN"], "group": "CommonBlock", "shortCode": "MPT" }
  }
}"#,
    )
    .expect("write catalogue");

    let config = dir.join("mhhs.toml");
    fs::write(&config, "[export]\nschema_version = \"2.1\"\n").expect("write settings");

    Locations {
        catalogue: Some(catalogue),
        config: Some(config),
        preferences: Some(dir.join("prefs")),
    }
}

#[test]
fn opens_session_with_settings() {
    let dir = temp_dir("open");
    let locations = write_fixture(&dir);

    let params = SessionParams {
        search: "settlement".to_string(),
        ..SessionParams::default()
    };
    let context = open_session(&locations, params).expect("open session");

    assert_eq!(context.session.settings().export.schema_version, "2.1");
    let ids: Vec<&str> = context
        .session
        .results()
        .into_iter()
        .map(|interface| interface.id.as_str())
        .collect();
    assert_eq!(ids, vec!["IF-002"]);

    cleanup_dir(&dir);
}

#[test]
fn unreadable_catalogue_is_unavailable() {
    let dir = temp_dir("missing");
    let locations = Locations {
        catalogue: Some(dir.join("absent.json")),
        ..write_fixture(&dir)
    };

    let error = open_session(&locations, SessionParams::default()).unwrap_err();
    let message = format!("{error:#}");
    assert!(message.contains("absent.json"));
    assert!(message.contains("no interface catalogue available"));

    cleanup_dir(&dir);
}

#[test]
fn favorites_survive_reopening() {
    let dir = temp_dir("favorites");
    let locations = write_fixture(&dir);

    let mut context = open_session(&locations, SessionParams::default()).expect("open session");
    let added = context
        .session
        .toggle_favorite("IF-002", &mut context.store)
        .expect("toggle");
    assert!(added);

    let reopened = open_session(&locations, SessionParams::default()).expect("reopen");
    assert!(reopened.session.is_favorite("IF-002"));
    assert!(!reopened.session.is_favorite("IF-001"));

    cleanup_dir(&dir);
}

#[test]
fn exports_values_read_from_file() {
    let dir = temp_dir("export");
    let locations = write_fixture(&dir);
    let values_path = dir.join("values.json");
    fs::write(&values_path, r#"{"DI-MPAN": "1200000000001"}"#).expect("write values");

    let mut context = open_session(&locations, SessionParams::default()).expect("open session");
    context.session.select("IF-001").expect("select");
    let form = context.session.form_for_selected().expect("form");
    let values = read_values(values_path.to_str().expect("utf-8 path")).expect("values");

    let payload = export(&form, &values).expect("valid values");
    let path = payload.write_to(&dir).expect("write payload");

    assert_eq!(path, dir.join("IF-001_payload.json"));
    let written = fs::read_to_string(&path).expect("read payload");
    assert!(written.contains("\"mpan\": \"1200000000001\""));
    assert!(written.ends_with("}\n"));

    cleanup_dir(&dir);
}
