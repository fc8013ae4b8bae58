use std::time::{Duration, Instant};

use mhhs_catalogue::{
    CatalogueError, FAVORITES_KEY, MemoryPreferenceStore, PreferenceStore, Settings,
};
use mhhs_core::{Session, SessionError, SessionParams};
use mhhs_model::{Catalogue, CategoryFilter, SupplierType};

fn sample_catalogue() -> Catalogue {
    serde_json::from_str(
        r#"{
  "interfaces": [
    {
      "id": "IF-001",
      "name": "Registration Request",
      "supplier_type": "supplier_send",
      "composition": [{ "type": "block", "id": "DB-01" }],
      "rejectionCodeIds": ["REJ-2", "REJ-404"]
    },
    {
      "id": "IF-002",
      "name": "Meter Read Submission",
      "supplier_type": "supplier_both",
      "composition": [{ "type": "item", "id": "DI-READ" }]
    },
    {
      "id": "IF-003",
      "name": "Settlement Report",
      "supplier_type": "supplier_receive"
    }
  ],
  "dataItemsCatalogue": {
    "DI-MPAN": { "name": "MPAN Core", "cmo": "M" },
    "DI-READ": { "name": "Meter Read Date", "cmo": "M" }
  },
  "dataBlocksCatalogue": {
    "DB-01": { "title": "Meter Point", "items": ["DI-MPAN"] }
  },
  "rejectionCodesCatalogue": {
    "REJ-1": { "description": "Duplicate message" },
    "REJ-2": { "description": "Unknown MPAN", "resolution": "Check the MPAN" }
  }
}"#,
    )
    .expect("parse sample catalogue")
}

fn session() -> Session {
    Session::initialize(Some(sample_catalogue()), Settings::default()).expect("session")
}

fn result_ids(session: &Session) -> Vec<&str> {
    session.results().into_iter().map(|i| i.id.as_str()).collect()
}

#[test]
fn missing_catalogue_refuses_to_start() {
    let error = Session::initialize(None, Settings::default()).unwrap_err();
    assert!(matches!(error, SessionError::CatalogueUnavailable));
}

#[test]
fn starts_with_everything_in_catalogue_order() {
    let session = session();
    assert_eq!(result_ids(&session), vec!["IF-001", "IF-002", "IF-003"]);
    assert!(session.params().to_pairs().is_empty());
}

#[test]
fn typed_search_waits_for_debounce() {
    let mut session = session();
    let start = Instant::now();

    session.set_search_term("settlement", start);
    assert_eq!(result_ids(&session).len(), 3);
    assert!(!session.poll(start + Duration::from_millis(100)));

    assert!(session.poll(start + Duration::from_millis(200)));
    assert_eq!(result_ids(&session), vec!["IF-003"]);
}

#[test]
fn applying_suggestion_refreshes_immediately() {
    let mut session = session();
    session.set_search_term("meter", Instant::now());

    let suggestions = session.suggestions();
    assert_eq!(suggestions, vec!["Meter Read Submission".to_string()]);

    session.apply_suggestion(&suggestions[0]);
    assert_eq!(session.search_term(), "Meter Read Submission");
    assert_eq!(result_ids(&session).first().copied(), Some("IF-002"));
}

#[test]
fn filter_applies_before_search() {
    let mut session = session();
    session.set_filter(CategoryFilter::Supplier(SupplierType::Send));
    assert_eq!(result_ids(&session), vec!["IF-001", "IF-002"]);

    session.search_now("settlement");
    assert!(result_ids(&session).is_empty());
}

#[test]
fn params_round_trip() {
    let params = SessionParams::from_pairs([
        ("search", "meter"),
        ("filter", "supplier_receive"),
        ("selected", "IF-002"),
    ]);
    let session =
        Session::with_params(Some(sample_catalogue()), Settings::default(), params.clone())
            .expect("session");

    assert_eq!(session.selected_id(), Some("IF-002"));
    assert_eq!(result_ids(&session), vec!["IF-002"]);
    assert_eq!(session.params(), params);
    assert_eq!(
        session.params().to_pairs(),
        vec![
            ("search", "meter".to_string()),
            ("filter", "supplier_receive".to_string()),
            ("selected", "IF-002".to_string()),
        ]
    );
}

#[test]
fn unknown_selection_is_ignored() {
    let params = SessionParams {
        selected: Some("IF-404".to_string()),
        ..SessionParams::default()
    };
    let mut session =
        Session::with_params(Some(sample_catalogue()), Settings::default(), params)
            .expect("session");
    assert_eq!(session.selected_id(), None);

    session.select("IF-001").expect("select");
    let error = session.select("IF-404").unwrap_err();
    assert!(matches!(error, SessionError::UnknownInterface { .. }));
    assert_eq!(session.selected_id(), Some("IF-001"));
}

#[test]
fn selected_interface_details() {
    let mut session = session();
    assert!(matches!(
        session.resolved_selected().unwrap_err(),
        SessionError::NothingSelected
    ));

    session.select("IF-001").expect("select");
    assert_eq!(session.resolved_selected().expect("resolved").len(), 1);

    let codes: Vec<&str> = session
        .selected_rejection_codes()
        .expect("codes")
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    assert_eq!(codes, vec!["REJ-2"]);

    let form = session.form_for_selected().expect("form");
    assert_eq!(form.header.interface_id, "IF-001");
    assert_eq!(form.field_count(), 1);

    assert_eq!(session.search_rejection_codes("").len(), 2);
    assert_eq!(session.search_rejection_codes("check")[0].0, "REJ-2");
}

#[test]
fn favorites_persist_through_store() {
    let mut store = MemoryPreferenceStore::new();
    let mut session = session();

    assert!(session.toggle_favorite("IF-003", &mut store).expect("toggle"));
    assert!(session.is_favorite("IF-003"));
    assert_eq!(
        store.read(FAVORITES_KEY).expect("read").as_deref(),
        Some(r#"["IF-003"]"#)
    );

    let mut restored = self::session();
    restored.load_favorites(&store);
    assert!(restored.is_favorite("IF-003"));

    assert!(matches!(
        session.toggle_favorite("IF-404", &mut store).unwrap_err(),
        SessionError::UnknownInterface { .. }
    ));
}

struct ReadOnlyStore;

impl PreferenceStore for ReadOnlyStore {
    fn read(&self, _key: &str) -> Result<Option<String>, CatalogueError> {
        Ok(None)
    }

    fn write(&mut self, _key: &str, _value: &str) -> Result<(), CatalogueError> {
        Err(CatalogueError::Unavailable {
            message: "read-only preferences".to_string(),
        })
    }
}

#[test]
fn failed_save_reverts_favorite() {
    let mut store = ReadOnlyStore;
    let mut session = session();

    assert!(matches!(
        session.toggle_favorite("IF-003", &mut store).unwrap_err(),
        SessionError::Preferences(_)
    ));
    assert!(!session.is_favorite("IF-003"));
    assert!(session.favorites().is_empty());

    let mut memory = MemoryPreferenceStore::new();
    session.toggle_favorite("IF-001", &mut memory).expect("toggle");
    assert!(session.toggle_favorite("IF-001", &mut store).is_err());
    assert!(session.is_favorite("IF-001"));
}

#[test]
fn reset_keeps_catalogue_and_favorites() {
    let mut store = MemoryPreferenceStore::new();
    let mut session = session();
    session.toggle_favorite("IF-001", &mut store).expect("toggle");
    session.set_filter(CategoryFilter::Supplier(SupplierType::Receive));
    session.search_now("settlement");
    session.select("IF-003").expect("select");

    session.reset();

    assert_eq!(session.search_term(), "");
    assert_eq!(session.filter(), CategoryFilter::All);
    assert_eq!(session.selected_id(), None);
    assert_eq!(result_ids(&session).len(), 3);
    assert!(session.is_favorite("IF-001"));
}
